mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{SECRET, spawn_app};
use leaguedesk::domain::{Role, SessionView};
use leaguedesk::services::{AccessError, AuthService, SessionTokens};
use serde_json::json;

fn session_for(id: i32, role: Role) -> SessionView {
    SessionView {
        id,
        name: "Admin".to_string(),
        email: "admin@example.com".to_string(),
        role,
    }
}

#[tokio::test]
async fn test_first_registrant_is_admin() {
    let app = spawn_app().await;

    let first = app.register("Ada", "ada@example.com").await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["role"], "ADMIN");
    assert_eq!(first.body["email"], "ada@example.com");
    assert!(first.body.get("password").is_none());
    assert!(first.body.get("password_hash").is_none());
    // Registration does not sign the user in.
    assert!(first.set_cookie().is_none());

    let second = app.register("Bob", "bob@example.com").await;
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(second.body["role"], "USER");

    let duplicate = app.register("Ada again", "ada@example.com").await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["error"], "Email already in use");

    assert_eq!(app.state.store().count_users().await.unwrap(), 2);
}

#[tokio::test]
async fn test_duplicate_email_ignores_case() {
    let app = spawn_app().await;

    app.register("Ada", "ada@example.com").await;
    let duplicate = app.register("Ada", "  ADA@Example.com ").await;

    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["error"], "Email already in use");
}

#[tokio::test]
async fn test_registration_validation() {
    let app = spawn_app().await;

    let short_password = app
        .post_json(
            "/api/auth/register",
            &json!({"name": "Ada", "email": "ada@example.com", "password": "short"}),
            None,
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
    assert!(short_password.body["error"].is_string());

    let bad_email = app
        .post_json(
            "/api/auth/register",
            &json!({"name": "Ada", "email": "not-an-email", "password": "long enough"}),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let missing_fields = app
        .post_json("/api/auth/register", &json!({"name": "Ada"}), None)
        .await;
    assert_eq!(missing_fields.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.state.store().count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = spawn_app().await;
    app.register("Ada", "ada@example.com").await;

    let response = app
        .post_json(
            "/api/auth/login",
            &json!({"email": "ada@example.com", "password": common::PASSWORD}),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["email"], "ada@example.com");
    assert_eq!(response.body["user"]["role"], "ADMIN");

    let set_cookie = response.set_cookie().unwrap();
    assert!(set_cookie.starts_with("auth_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains(&format!("Max-Age={}", 168 * 3600)));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = spawn_app().await;
    app.register("Ada", "ada@example.com").await;

    let wrong_password = app
        .post_json(
            "/api/auth/login",
            &json!({"email": "ada@example.com", "password": "wrong password"}),
            None,
        )
        .await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["error"], "Invalid email or password");
    assert!(wrong_password.set_cookie().is_none());

    let unknown = app
        .post_json(
            "/api/auth/login",
            &json!({"email": "nobody@example.com", "password": "whatever123"}),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["error"], "Invalid email or password");

    let empty = app
        .post_json("/api/auth/login", &json!({"email": "", "password": ""}), None)
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_requires_session() {
    let app = spawn_app().await;

    let response = app.get("/api/auth/me", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body["error"].is_string());

    let cookie = app.admin_cookie().await;
    let response = app.get("/api/auth/me", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "admin@example.com");
    assert_eq!(response.body["role"], "ADMIN");
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_resolution_is_repeatable() {
    let app = spawn_app().await;
    let cookie = app.admin_cookie().await;
    let token = cookie.trim_start_matches("auth_token=");

    let first = app.state.auth().resolve_session(Some(token)).await;
    let second = app.state.auth().resolve_session(Some(token)).await;

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let app = spawn_app().await;
    app.admin_cookie().await;

    let other = SessionTokens::new(&"k".repeat(40), Duration::hours(1)).unwrap();
    let forged = other.issue(&session_for(1, Role::Admin)).unwrap();
    let cookie = format!("auth_token={}", forged.token);

    let response = app.get("/api/auth/me", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.get("/api/seasons", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = spawn_app().await;
    app.admin_cookie().await;

    let tokens = SessionTokens::new(SECRET, Duration::hours(1)).unwrap();
    let stale = tokens
        .issue_at(&session_for(1, Role::Admin), Utc::now() - Duration::hours(3))
        .unwrap();
    let cookie = format!("auth_token={}", stale.token);

    let response = app.get("/api/auth/me", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let app = spawn_app().await;
    let cookie = app.admin_cookie().await;

    let user = app
        .state
        .store()
        .get_user_by_email("admin@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(app.state.store().delete_user(user.id).await.unwrap());

    let response = app.get("/api/auth/me", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_role_is_forbidden_from_admin_api() {
    let app = spawn_app().await;
    let admin = app.admin_cookie().await;
    let member = app.user_cookie().await;

    let response = app.get("/api/seasons", Some(&member)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.body["error"].is_string());

    let response = app.get("/api/users", Some(&member)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Authenticated, just not an administrator.
    let response = app.get("/api/auth/me", Some(&member)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["role"], "USER");

    let response = app.get("/api/seasons", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_guards_report_denial_reason() {
    let app = spawn_app().await;
    app.admin_cookie().await;
    let member = app.user_cookie().await;
    let token = member.trim_start_matches("auth_token=");

    let auth = app.state.auth();

    let session = auth.require_authenticated(Some(token)).await.unwrap();
    assert_eq!(session.role, Role::User);

    let denied = auth.require_administrator(Some(token)).await.unwrap_err();
    assert_eq!(
        denied,
        AccessError::AuthorizationDenied {
            user_id: session.id
        }
    );

    assert_eq!(
        auth.require_administrator(None).await.unwrap_err(),
        AccessError::AuthenticationRequired
    );
}

#[tokio::test]
async fn test_role_change_applies_on_next_request() {
    let app = spawn_app().await;
    let admin = app.admin_cookie().await;
    let member = app.user_cookie().await;

    assert!(
        app.state
            .store()
            .set_user_role("member@example.com", Role::Admin)
            .await
            .unwrap()
    );
    let response = app.get("/api/seasons", Some(&member)).await;
    assert_eq!(response.status, StatusCode::OK);

    assert!(
        app.state
            .store()
            .set_user_role("admin@example.com", Role::User)
            .await
            .unwrap()
    );
    let response = app.get("/api/seasons", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_always_succeeds() {
    let app = spawn_app().await;

    let anonymous = app.post_json("/api/auth/logout", &json!({}), None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.body["message"], "Logged out successfully");

    let cookie = app.admin_cookie().await;
    let response = app
        .post_json("/api/auth/logout", &json!({}), Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out successfully");

    let removal = response.set_cookie().unwrap();
    assert!(removal.starts_with("auth_token=;"));
    assert!(removal.contains("Max-Age=0"));

    // The browser now sends the emptied cookie.
    let response = app.get("/api/auth/me", Some("auth_token=")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_hides_password_material() {
    let app = spawn_app().await;
    let admin = app.admin_cookie().await;
    app.register("Member", "member@example.com").await;

    let response = app.get("/api/users", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);

    let users = response.body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["role"], "ADMIN");
    assert_eq!(users[1]["role"], "USER");
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}
