//! RemoteTM API client library
//!
//! Async client for the REST endpoints the RemoteTM web console talks to.

pub mod error;
pub mod session;
pub mod upload;

mod client;

pub use client::*;
pub use session::Session;
pub use session::SessionProvider;
pub use session::StaticSession;
pub use upload::TmxUploader;
pub use upload::UploadFile;
pub use upload::UploadResponse;
