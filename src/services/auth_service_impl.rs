//! `SeaORM` implementation of the `AuthService` trait.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::config::SecurityConfig;
use crate::db::{NewUser, NewUserOutcome, Store};
use crate::domain::SessionView;
use crate::services::auth_service::{AuthError, AuthService, LoginResult, Registration};
use crate::services::token::{SessionTokens, TokenError};

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid regex"))
}

const MAX_NAME_LEN: usize = 100;

pub struct SeaOrmAuthService {
    store: Store,
    tokens: Arc<SessionTokens>,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, tokens: Arc<SessionTokens>, security: SecurityConfig) -> Self {
        Self {
            store,
            tokens,
            security,
        }
    }
}

/// Lower-cases and trims an email address.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_registration(
    registration: &Registration,
    min_password_length: usize,
) -> Result<NewUser, AuthError> {
    let name = registration.name.trim();
    if name.is_empty() {
        return Err(AuthError::Validation("Name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AuthError::Validation(format!(
            "Name must be {MAX_NAME_LEN} characters or less"
        )));
    }

    let email = normalize_email(&registration.email);
    if !email_regex().is_match(&email) {
        return Err(AuthError::Validation("A valid email is required".to_string()));
    }

    if registration.password.chars().count() < min_password_length {
        return Err(AuthError::Validation(format!(
            "Password must be at least {min_password_length} characters"
        )));
    }

    Ok(NewUser {
        name: name.to_string(),
        email,
        password: registration.password.clone(),
    })
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: Registration) -> Result<SessionView, AuthError> {
        let new_user = validate_registration(&registration, self.security.min_password_length)?;

        match self.store.create_user(&new_user, &self.security).await? {
            NewUserOutcome::Created(user) => Ok(SessionView::from(user)),
            NewUserOutcome::EmailTaken => {
                info!("Registration rejected: email already in use");
                Err(AuthError::EmailInUse)
            }
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AuthError::Validation("Email is required".to_string()));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        let user = self
            .store
            .verify_user_password(&email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let user = SessionView::from(user);
        let token = self
            .tokens
            .issue(&user)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        info!(user_id = user.id, "User logged in");
        Ok(LoginResult { user, token })
    }

    async fn resolve_session(&self, token: Option<&str>) -> Option<SessionView> {
        let token = token.filter(|t| !t.is_empty())?;

        let claims = match self.tokens.verify(token) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => {
                debug!("Session token expired");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Rejected session token");
                return None;
            }
        };

        let Ok(user_id) = claims.sub.parse::<i32>() else {
            warn!("Session token carries a non-numeric subject");
            return None;
        };

        match self.store.get_user_by_id(user_id).await {
            Ok(Some(user)) => Some(SessionView::from(user)),
            Ok(None) => {
                debug!(user_id, "Session token refers to a missing user");
                None
            }
            Err(e) => {
                error!(user_id, error = %e, "Failed to load session user");
                None
            }
        }
    }
}
