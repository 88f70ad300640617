//! Domain service for registration, login and session resolution.
//!
//! The access guards are provided methods layered on
//! [`AuthService::resolve_session`], so every implementation gets the same
//! "authenticated" and "administrator" semantics.

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::SessionView;
use crate::services::token::IssuedToken;

/// Errors specific to registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already in use")]
    EmailInUse,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Failure of an access guard. Both variants are request-scoped; the caller
/// picks the presentation (redirect or JSON status).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Administrator access required")]
    AuthorizationDenied { user_id: i32 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: SessionView,
    pub token: IssuedToken,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account. The first account ever created is an administrator.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailInUse`] if the email is already registered.
    async fn register(&self, registration: Registration) -> Result<SessionView, AuthError>;

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Resolves the session cookie value to the current user.
    ///
    /// Missing, malformed, expired or forged tokens, unknown users and
    /// lookup failures all yield `None`.
    async fn resolve_session(&self, token: Option<&str>) -> Option<SessionView>;

    async fn require_authenticated(&self, token: Option<&str>) -> Result<SessionView, AccessError> {
        match self.resolve_session(token).await {
            Some(session) => Ok(session),
            None => {
                info!(reason = "no_session", "Authentication required");
                Err(AccessError::AuthenticationRequired)
            }
        }
    }

    async fn require_administrator(&self, token: Option<&str>) -> Result<SessionView, AccessError> {
        let session = self.require_authenticated(token).await?;

        if !session.is_admin() {
            warn!(
                user_id = session.id,
                role = %session.role,
                reason = "not_admin",
                "Administrator access denied"
            );
            return Err(AccessError::AuthorizationDenied {
                user_id: session.id,
            });
        }

        Ok(session)
    }
}
