//! Server-rendered admin shell.
//!
//! Every `/admin` page passes through [`admin_gate`], which lets only a live
//! administrator session through and sends everyone else to the login page.

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use std::sync::Arc;

use crate::api::{AppState, cookies, observability};
use crate::domain::SessionView;
use crate::services::AuthService;

pub mod layout;
pub mod pages;

pub const LOGIN_PATH: &str = "/login";

/// Result of checking a visitor against the admin shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Allowed(SessionView),
    Redirected,
}

/// Resolves the session and decides whether an admin page may render.
pub async fn evaluate(auth: &dyn AuthService, token: Option<&str>) -> GateOutcome {
    match auth.resolve_session(token).await {
        Some(session) if session.is_admin() => GateOutcome::Allowed(session),
        Some(session) => {
            tracing::warn!(
                user_id = session.id,
                reason = "not_admin",
                "Admin shell access denied"
            );
            GateOutcome::Redirected
        }
        None => {
            tracing::debug!(reason = "no_session", "Admin shell requires sign-in");
            GateOutcome::Redirected
        }
    }
}

/// Login URL that returns the visitor to `path` afterwards.
#[must_use]
pub fn login_redirect_target(path: &str) -> String {
    format!("{LOGIN_PATH}?next={}", urlencoding::encode(path))
}

pub async fn admin_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = cookies::session_token(request.headers());

    match evaluate(state.auth(), token.as_deref()).await {
        GateOutcome::Allowed(session) => {
            observability::record_user(&request, session.id);
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        GateOutcome::Redirected => {
            let path = request
                .uri()
                .path_and_query()
                .map_or_else(|| request.uri().path(), |pq| pq.as_str());
            Redirect::to(&login_redirect_target(path)).into_response()
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route("/admin", get(pages::dashboard))
        .route("/admin/{resource}", get(pages::resource_page))
        .route_layer(middleware::from_fn_with_state(state, admin_gate));

    Router::new()
        .route("/", get(|| async { Redirect::to("/admin") }))
        .route(LOGIN_PATH, get(pages::login_page).post(pages::login_submit))
        .route("/logout", post(pages::logout_submit))
        .merge(admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_target_encodes_original_path() {
        assert_eq!(login_redirect_target("/admin"), "/login?next=%2Fadmin");
        assert_eq!(
            login_redirect_target("/admin/teams?page=2"),
            "/login?next=%2Fadmin%2Fteams%3Fpage%3D2"
        );
    }
}
