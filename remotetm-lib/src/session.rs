//! Session tokens

use async_trait::async_trait;

use crate::error::SessionError;

/// Name of the header carrying the session token.
pub const SESSION_HEADER: &str = "Session";

/// Opaque credential identifying the signed-in user.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("token", &"***").finish()
    }
}

/// Source of the session token attached to every request.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn session(&self) -> Result<Session, SessionError>;
}

/// A provider returning a fixed session, for tokens obtained elsewhere.
#[derive(Debug, Clone)]
pub struct StaticSession {
    session: Option<Session>,
}

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            session: Some(Session::new(token)),
        }
    }

    /// A provider for a signed-out console; every request fails.
    pub fn none() -> Self {
        Self { session: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn session(&self) -> Result<Session, SessionError> {
        self.session.clone().ok_or(SessionError::Missing)
    }
}
