#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use leaguedesk::api::{self, AppState};
use leaguedesk::config::Config;
use leaguedesk::state::SharedState;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";
pub const PASSWORD: &str = "correct horse battery";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header, if any.
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }

    /// `auth_token=<value>` ready to send back as a `Cookie` header.
    pub fn session_cookie(&self) -> String {
        let set_cookie = self.set_cookie().expect("response sets a cookie");
        set_cookie
            .split(';')
            .next()
            .expect("cookie pair")
            .to_string()
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

pub fn test_config(db_path: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.general.database_url = format!("sqlite:{}", db_path.display());
    config.general.max_db_connections = 2;
    config.server.secure_cookies = false;
    config.security.session_secret = SECRET.to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config.observability.metrics_enabled = false;
    config
}

pub async fn spawn_app() -> TestApp {
    let db_path = std::env::temp_dir().join(format!("leaguedesk-test-{}.db", uuid::Uuid::new_v4()));
    let config = test_config(&db_path);

    let shared = SharedState::new(config)
        .await
        .expect("Failed to create shared state");
    let state = api::create_app_state(Arc::new(shared), None);
    let router = api::router(state.clone());

    TestApp {
        router,
        state,
        db_path,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn register(&self, name: &str, email: &str) -> TestResponse {
        self.post_json(
            "/api/auth/register",
            &json!({"name": name, "email": email, "password": PASSWORD}),
            None,
        )
        .await
    }

    /// Logs in and returns the `Cookie` header value for later requests.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .post_json(
                "/api/auth/login",
                &json!({"email": email, "password": PASSWORD}),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.session_cookie()
    }

    /// Registers the first (administrator) account and logs it in.
    pub async fn admin_cookie(&self) -> String {
        let response = self.register("Admin", "admin@example.com").await;
        assert_eq!(response.status, StatusCode::CREATED);
        self.login("admin@example.com").await
    }

    /// Registers a second, non-administrator account and logs it in.
    pub async fn user_cookie(&self) -> String {
        let response = self.register("Member", "member@example.com").await;
        assert_eq!(response.status, StatusCode::CREATED);
        self.login("member@example.com").await
    }
}
