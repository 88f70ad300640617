use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, Span, field, info, info_span, warn};
use uuid::Uuid;

use crate::api::AppState;

/// GET /metrics
/// Prometheus text exposition. Admin only.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    state.prometheus_handle.as_ref().map_or_else(
        || {
            (
                StatusCode::NOT_FOUND,
                "Metrics not enabled or failed to initialize",
            )
                .into_response()
        },
        |handle| handle.render().into_response(),
    )
}

/// The `request` span opened by [`logging_middleware`], carried in request
/// extensions so guards further in can record the signed-in user on it.
#[derive(Clone)]
pub struct RequestSpan(Span);

/// Attaches the resolved user to the request's wide event.
pub fn record_user(request: &Request, user_id: i32) {
    if let Some(RequestSpan(span)) = request.extensions().get::<RequestSpan>() {
        span.record("user_id", user_id);
    }
}

fn surface(path: &str) -> &'static str {
    if path == "/api" || path.starts_with("/api/") {
        "api"
    } else {
        "admin"
    }
}

/// Opens one `request` span per call, counts it, and emits a single
/// `request_completed` event carrying status, latency and (once a guard has
/// resolved one) the user id.
pub async fn logging_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let surface = surface(&path);
    // Metric label is the route template when one matched.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| path.clone(), |mp| mp.as_str().to_owned());
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_owned();

    let span = info_span!(
        "request",
        %request_id,
        %method,
        %path,
        %route,
        surface,
        user_id = field::Empty,
    );
    req.extensions_mut().insert(RequestSpan(span.clone()));

    let mut response = next.run(req).instrument(span.clone()).await;

    let elapsed = start.elapsed();
    let status = response.status();
    let labels = [
        ("method", method.to_string()),
        ("route", route),
        ("status", status.as_u16().to_string()),
        ("surface", surface.to_owned()),
    ];
    metrics::counter!("leaguedesk_http_requests_total", &labels).increment(1);
    metrics::histogram!("leaguedesk_http_request_duration_seconds", &labels)
        .record(elapsed.as_secs_f64());

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert("x-request-id", value);
    }

    span.in_scope(|| {
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if status.is_server_error() {
            warn!(event = "request_completed", status = status.as_u16(), duration_ms, %user_agent);
        } else {
            info!(event = "request_completed", status = status.as_u16(), duration_ms, %user_agent);
        }
    });

    response
}

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static(
            "default-src 'self'; img-src 'self' data:; style-src 'self' 'unsafe-inline'; form-action 'self'; frame-ancestors 'none'; base-uri 'self'",
        ),
    );

    response
}
