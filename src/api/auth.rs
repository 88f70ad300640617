use axum::{
    Extension, Json,
    extract::{Request, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{cookies, observability};
use super::{ApiError, AppState, LoginRequest, LoginResponse, MessageResponse};
use crate::domain::SessionView;
use crate::services::Registration;

// ============================================================================
// Middleware
// ============================================================================

/// Admits only requests whose session cookie resolves to a live
/// administrator. The resolved [`SessionView`] is added as a request
/// extension.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = cookies::session_token(request.headers());
    let session = state.auth().require_administrator(token.as_deref()).await?;

    observability::record_user(&request, session.id);
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
/// Create an account. The first account becomes an administrator.
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let Json(registration) = payload?;
    let user = state.auth().register(registration).await?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login
/// Verify credentials and set the session cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let result = state.auth().login(&payload.email, &payload.password).await?;

    let cookie = cookies::session_cookie(
        &result.token.token,
        state.shared.tokens.ttl(),
        state.config().server.secure_cookies,
    )
    .ok_or_else(|| ApiError::internal("Failed to encode session cookie"))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse { user: result.user }),
    )
        .into_response())
}

/// POST /auth/logout
/// Clear the session cookie. Succeeds whether or not a session existed.
pub async fn logout(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let cookie = cookies::removal_cookie(state.config().server.secure_cookies)
        .ok_or_else(|| ApiError::internal("Failed to encode session cookie"))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
        .into_response())
}

/// GET /auth/me
/// The current session's user.
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SessionView>, ApiError> {
    let token = cookies::session_token(&headers);
    let session = state.auth().require_authenticated(token.as_deref()).await?;
    Ok(Json(session))
}

/// GET /users
/// Every account, without password material. Admin only.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<SessionView>,
) -> Result<Json<Vec<SessionView>>, ApiError> {
    let users = state.store().list_users().await.map_err(ApiError::database)?;

    tracing::debug!(admin_id = admin.id, count = users.len(), "Listed users");

    Ok(Json(users.into_iter().map(SessionView::from).collect()))
}
