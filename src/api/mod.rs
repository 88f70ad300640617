use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::AuthService;
use crate::state::SharedState;

pub mod auth;
mod clubs;
pub mod cookies;
mod error;
mod health;
mod leagues;
mod lookups;
pub mod observability;
mod players;
mod playgrounds;
mod seasons;
mod teams;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth(&self) -> &dyn AuthService {
        self.shared.auth.as_ref()
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// The whole application: `/api` JSON routes plus the admin pages.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/health", get(health::health));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
    };
    let cors_layer = cors_layer
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", api_router)
        .merge(crate::web::router(state.clone()))
        .with_state(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
}

/// Every route here requires an administrator session.
fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/seasons",
            get(seasons::list_seasons).post(seasons::create_season),
        )
        .route(
            "/leagues",
            get(leagues::list_leagues).post(leagues::create_league),
        )
        .route(
            "/league-types",
            get(lookups::list_league_types).post(lookups::create_league_type),
        )
        .route(
            "/match-systems",
            get(lookups::list_match_systems).post(lookups::create_match_system),
        )
        .route(
            "/genders",
            get(lookups::list_genders).post(lookups::create_gender),
        )
        .route(
            "/positions",
            get(lookups::list_positions).post(lookups::create_position),
        )
        .route("/clubs", get(clubs::list_clubs).post(clubs::create_club))
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/players",
            get(players::list_players).post(players::create_player),
        )
        .route(
            "/playgrounds",
            get(playgrounds::list_playgrounds).post(playgrounds::create_playground),
        )
        .route("/users", get(auth::list_users))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin))
}
