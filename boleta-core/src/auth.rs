//! Seed/token handshake state.
//!
//! The handshake is driven by [`SiiClient::authenticate`][crate::api::SiiClient::authenticate]:
//! a [`Seed`] is fetched, wrapped with the caller's signature material into an
//! [`AuthRequest`], and exchanged for a [`SessionToken`] that ends up in a
//! caller-owned [`Session`].
pub mod request;

pub use request::AuthRequest;

use std::fmt;
use thiserror::Error;

/// Errors raised while obtaining a seed. These abort the handshake.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed request failed with status code: {status}")]
    Transport { status: u16 },
    #[error("seed refused by the service (ESTADO {estado})")]
    RemoteRejection { estado: i64 },
    #[error("error fetching seed: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("invalid seed response: {0}")]
    InvalidResponse(String),
}

/// One-time challenge issued by the seed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed(String);

impl Seed {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a token exchange: the envelope's ESTADO, GLOSA and TOKEN.
///
/// A present `SessionToken` only means the envelope could be read; the token
/// itself is `None` when the service declined to issue one.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    status: i64,
    message: String,
    token: Option<String>,
}

impl SessionToken {
    pub fn new(status: i64, message: impl Into<String>, token: Option<String>) -> Self {
        Self {
            status,
            message: message.into(),
            token,
        }
    }

    pub fn status(&self) -> i64 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("status", &self.status)
            .field("message", &self.message)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Authentication state for one logical caller.
///
/// Each authentication cycle overwrites the previous result. Share a session
/// across tasks only behind the caller's own synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<SessionToken>,
    authenticated: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored exchange result; authenticated iff a token was issued.
    pub fn store(&mut self, token: Option<SessionToken>) {
        self.authenticated = token.as_ref().and_then(SessionToken::token).is_some();
        self.token = token;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The last exchange result, including ESTADO/GLOSA of a refused exchange.
    pub fn session_token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// The issued token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().and_then(SessionToken::token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_sets_authenticated_only_for_issued_tokens() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        session.store(Some(SessionToken::new(0, "Token Creado", Some("tok".into()))));
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));

        session.store(Some(SessionToken::new(-7, "Firma invalida", None)));
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.session_token().map(SessionToken::status), Some(-7));

        session.store(None);
        assert!(!session.is_authenticated());
        assert!(session.session_token().is_none());
    }

    #[test]
    fn session_token_debug_redacts_value() {
        let token = SessionToken::new(0, "OK", Some("secret-token".into()));
        let rendered = format!("{token:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret-token"));
    }

    #[test]
    fn seed_error_messages() {
        assert_eq!(
            SeedError::Transport { status: 503 }.to_string(),
            "seed request failed with status code: 503"
        );
        assert_eq!(
            SeedError::RemoteRejection { estado: 2 }.to_string(),
            "seed refused by the service (ESTADO 2)"
        );
    }
}
