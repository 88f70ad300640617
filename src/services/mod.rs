pub mod auth_service;
pub use auth_service::{AccessError, AuthError, AuthService, LoginResult, Registration};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod token;
pub use token::{IssuedToken, SessionClaims, SessionTokens, TokenError};
