//! Session context
//!
//! The signed-in user and their bearer token. A session is created empty,
//! begun on login and ended on logout or when the API reports the token is no
//! longer accepted. Callers own it and pass it to every service call.

use std::fmt;

use tracing::{info, warn};
use zeroize::Zeroize;

use crate::gateway::GatewayError;

/// Bearer token issued by the API.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(**redacted**)")
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// User id
    pub id: u64,

    /// Username
    pub username: String,

    /// Email address
    pub email: Option<String>,

    /// Role, e.g. `admin` or `user`
    pub role: Option<String>,
}

impl SessionUser {
    /// Whether the user has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// Session
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<SessionUser>,
    token: Option<BearerToken>,
}

impl Session {
    /// An anonymous session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session carrying a pre-issued token but no known user.
    #[must_use]
    pub fn with_token(token: BearerToken) -> Self {
        Self {
            user: None,
            token: Some(token),
        }
    }

    /// Start a session after a successful login.
    pub fn begin(&mut self, user: SessionUser, token: BearerToken) {
        info!(user = %user.username, "session started");

        self.user = Some(user);
        self.token = Some(token);
    }

    /// Tear the session down, dropping (and zeroing) the token.
    pub fn end(&mut self) {
        if self.token.is_some() {
            info!("session ended");
        }

        self.user = None;
        self.token = None;
    }

    /// Whether a token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The signed-in user, when known.
    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// The bearer token, when held.
    #[must_use]
    pub const fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    /// Pass a gateway result through, ending the session if the API rejected
    /// the token.
    ///
    /// # Errors
    ///
    /// Returns the error contained in `result` unchanged.
    pub fn observe<T>(&mut self, result: Result<T, GatewayError>) -> Result<T, GatewayError> {
        if matches!(result, Err(GatewayError::Unauthenticated)) && self.is_authenticated() {
            warn!("token rejected by the API, ending session");

            self.end();
        }

        result
    }
}
