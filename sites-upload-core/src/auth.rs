//! # auth: credential resolution for the sites service
//!
//! Credentials arrive as three optional strings. They are resolved exactly once
//! into an [`AuthChoice`], and only a non-[`AuthChoice::Missing`] choice can be
//! turned into an [`Authenticator`].
//!
//! ## Precedence
//! A complete user/password pair always wins over a token. An empty string is
//! treated the same as an absent value.

use std::fmt;

use tracing::{error, info};

use crate::error::Error;

/// Outcome of credential resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChoice {
    Credentials { user: String, password: String },
    Token { value: String },
    Missing,
}

impl AuthChoice {
    /// Resolve the credential strategy from optional inputs.
    ///
    /// Credentials require both `user` and `password` to be non-empty; a lone
    /// user or password falls through to the token check.
    pub fn resolve(token: Option<&str>, user: Option<&str>, password: Option<&str>) -> Self {
        let present = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_owned);

        match (present(user), present(password), present(token)) {
            (Some(user), Some(password), _) => AuthChoice::Credentials { user, password },
            (_, _, Some(value)) => AuthChoice::Token { value },
            _ => AuthChoice::Missing,
        }
    }

    /// Build the authenticator for this choice.
    ///
    /// # Errors
    /// [`Error::MissingCredentials`] when nothing usable was supplied.
    pub fn into_authenticator(self) -> Result<Authenticator, Error> {
        match self {
            AuthChoice::Credentials { user, password } => {
                Ok(Authenticator::from_credentials(user, password))
            }
            AuthChoice::Token { value } => Ok(Authenticator::from_token(value)),
            AuthChoice::Missing => {
                error!("No token, or user/password was provided");
                Err(Error::MissingCredentials)
            }
        }
    }
}

/// Proves identity to the sites service.
#[derive(Clone, PartialEq, Eq)]
pub enum Authenticator {
    Credentials { username: String, password: String },
    Token(String),
}

impl Authenticator {
    pub fn from_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        info!(username = %username, "Authenticator built from credentials");
        Authenticator::Credentials {
            username,
            password: password.into(),
        }
    }

    pub fn from_token(token: impl Into<String>) -> Self {
        info!("Authenticator built from token");
        Authenticator::Token(token.into())
    }

    /// Short label for logs and user-facing messages.
    pub fn method(&self) -> &'static str {
        match self {
            Authenticator::Credentials { .. } => "user/password",
            Authenticator::Token(_) => "token",
        }
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authenticator::Credentials { username, .. } => f
                .debug_struct("Credentials")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Authenticator::Token(_) => f.debug_tuple("Token").field(&"<redacted>").finish(),
        }
    }
}
