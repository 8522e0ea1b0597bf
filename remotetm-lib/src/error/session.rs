//! Session error types

/// Errors raised while obtaining the session token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No user is signed in.
    #[error("No active session")]
    Missing,
}
