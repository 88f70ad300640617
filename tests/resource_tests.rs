mod common;

use axum::http::StatusCode;
use common::{TestApp, spawn_app};
use serde_json::{Value, json};

async fn create(app: &TestApp, cookie: &str, path: &str, body: Value) -> Value {
    let response = app.post_json(path, &body, Some(cookie)).await;
    assert_eq!(
        response.status,
        StatusCode::CREATED,
        "POST {path} failed: {}",
        response.body
    );
    response.body
}

async fn list(app: &TestApp, cookie: &str, path: &str) -> Vec<Value> {
    let response = app.get(path, Some(cookie)).await;
    assert_eq!(response.status, StatusCode::OK, "GET {path} failed");
    response.body.as_array().cloned().unwrap()
}

#[tokio::test]
async fn test_resources_require_admin_session() {
    let app = spawn_app().await;

    for path in [
        "/api/seasons",
        "/api/leagues",
        "/api/league-types",
        "/api/match-systems",
        "/api/genders",
        "/api/positions",
        "/api/clubs",
        "/api/teams",
        "/api/players",
        "/api/playgrounds",
        "/api/users",
        "/api/metrics",
    ] {
        let response = app.get(path, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "GET {path}");
    }

    let response = app
        .post_json("/api/genders", &json!({"name": "Women"}), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_health_is_open() {
    let app = spawn_app().await;

    let response = app.get("/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_full_league_structure() {
    let app = spawn_app().await;
    let cookie = app.admin_cookie().await;

    let women = create(&app, &cookie, "/api/genders", json!({"name": "Women"})).await;
    let keeper = create(
        &app,
        &cookie,
        "/api/positions",
        json!({"name": "Goalkeeper", "abbreviation": "GK"}),
    )
    .await;
    let first_division = create(
        &app,
        &cookie,
        "/api/league-types",
        json!({"name": "First division", "description": "Top tier"}),
    )
    .await;
    let round_robin = create(
        &app,
        &cookie,
        "/api/match-systems",
        json!({"name": "Round robin"}),
    )
    .await;
    let season = create(
        &app,
        &cookie,
        "/api/seasons",
        json!({"name": "2024/25", "start_date": "2024-09-01", "end_date": "2025-06-30", "is_active": true}),
    )
    .await;
    assert_eq!(season["_count"]["leagues"], 0);

    let league = create(
        &app,
        &cookie,
        "/api/leagues",
        json!({
            "name": "Extraliga",
            "season_id": season["id"],
            "league_type_id": first_division["id"],
            "match_system_id": round_robin["id"],
            "gender_id": women["id"]
        }),
    )
    .await;
    assert_eq!(league["season"]["name"], "2024/25");

    let arena = create(
        &app,
        &cookie,
        "/api/playgrounds",
        json!({"name": "City Arena", "city": "Brno", "capacity": 1200}),
    )
    .await;
    let club = create(
        &app,
        &cookie,
        "/api/clubs",
        json!({"name": "Sparta", "city": "Brno", "founded_year": 1921, "playground_id": arena["id"]}),
    )
    .await;
    let team = create(
        &app,
        &cookie,
        "/api/teams",
        json!({"name": "Sparta A", "club_id": club["id"], "gender_id": women["id"], "league_id": league["id"]}),
    )
    .await;
    let player = create(
        &app,
        &cookie,
        "/api/players",
        json!({
            "first_name": "Eva",
            "last_name": "Novak",
            "birth_date": "2001-04-12",
            "jersey_number": 1,
            "team_id": team["id"],
            "position_id": keeper["id"],
            "gender_id": women["id"]
        }),
    )
    .await;
    assert_eq!(player["team"]["name"], "Sparta A");
    assert_eq!(player["position"]["name"], "Goalkeeper");

    let genders = list(&app, &cookie, "/api/genders").await;
    assert_eq!(genders.len(), 1);
    assert_eq!(genders[0]["_count"]["leagues"], 1);
    assert_eq!(genders[0]["_count"]["teams"], 1);
    assert_eq!(genders[0]["_count"]["players"], 1);

    let positions = list(&app, &cookie, "/api/positions").await;
    assert_eq!(positions[0]["abbreviation"], "GK");
    assert_eq!(positions[0]["_count"]["players"], 1);

    let seasons = list(&app, &cookie, "/api/seasons").await;
    assert_eq!(seasons[0]["_count"]["leagues"], 1);

    let leagues = list(&app, &cookie, "/api/leagues").await;
    assert_eq!(leagues[0]["league_type"]["name"], "First division");
    assert_eq!(leagues[0]["match_system"]["name"], "Round robin");
    assert_eq!(leagues[0]["gender"]["name"], "Women");
    assert_eq!(leagues[0]["_count"]["teams"], 1);

    let playgrounds = list(&app, &cookie, "/api/playgrounds").await;
    assert_eq!(playgrounds[0]["_count"]["clubs"], 1);

    let clubs = list(&app, &cookie, "/api/clubs").await;
    assert_eq!(clubs[0]["playground"]["name"], "City Arena");
    assert_eq!(clubs[0]["_count"]["teams"], 1);

    let teams = list(&app, &cookie, "/api/teams").await;
    assert_eq!(teams[0]["club"]["name"], "Sparta");
    assert_eq!(teams[0]["league"]["name"], "Extraliga");
    assert_eq!(teams[0]["_count"]["players"], 1);

    let players = list(&app, &cookie, "/api/players").await;
    assert_eq!(players[0]["gender"]["name"], "Women");
}

#[tokio::test]
async fn test_create_validation() {
    let app = spawn_app().await;
    let cookie = app.admin_cookie().await;

    let blank = app
        .post_json("/api/genders", &json!({"name": "   "}), Some(&cookie))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert!(blank.body["error"].is_string());

    let inverted = app
        .post_json(
            "/api/seasons",
            &json!({"name": "Backwards", "start_date": "2025-06-30", "end_date": "2024-09-01"}),
            Some(&cookie),
        )
        .await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);

    let bad_date = app
        .post_json(
            "/api/seasons",
            &json!({"name": "Bad", "start_date": "next year", "end_date": "2024-09-01"}),
            Some(&cookie),
        )
        .await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);

    let negative = app
        .post_json(
            "/api/playgrounds",
            &json!({"name": "Field", "capacity": -5}),
            Some(&cookie),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);

    let dangling = app
        .post_json(
            "/api/teams",
            &json!({"name": "Ghosts", "club_id": 999, "gender_id": 999}),
            Some(&cookie),
        )
        .await;
    assert_eq!(dangling.status, StatusCode::BAD_REQUEST);
    assert!(dangling.body["error"].as_str().unwrap().contains("club_id"));

    let malformed = app
        .post_json("/api/clubs", &json!({"city": "Brno"}), Some(&cookie))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    assert!(list(&app, &cookie, "/api/teams").await.is_empty());
    assert!(list(&app, &cookie, "/api/seasons").await.is_empty());
}

#[tokio::test]
async fn test_duplicate_unique_name_is_a_create_failure() {
    let app = spawn_app().await;
    let cookie = app.admin_cookie().await;

    create(&app, &cookie, "/api/genders", json!({"name": "Men"})).await;
    let duplicate = app
        .post_json("/api/genders", &json!({"name": "Men"}), Some(&cookie))
        .await;

    assert_eq!(duplicate.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(duplicate.body["error"], "Failed to create gender");
}

#[tokio::test]
async fn test_lists_are_sorted() {
    let app = spawn_app().await;
    let cookie = app.admin_cookie().await;

    for name in ["Women", "Men", "Mixed"] {
        create(&app, &cookie, "/api/genders", json!({"name": name})).await;
    }

    let names: Vec<String> = list(&app, &cookie, "/api/genders")
        .await
        .iter()
        .map(|g| g["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Men", "Mixed", "Women"]);

    for (name, start, end) in [
        ("2025/26", "2025-09-01", "2026-06-30"),
        ("2023/24", "2023-09-01", "2024-06-30"),
        ("2024/25", "2024-09-01", "2025-06-30"),
    ] {
        create(
            &app,
            &cookie,
            "/api/seasons",
            json!({"name": name, "start_date": start, "end_date": end}),
        )
        .await;
    }

    let seasons: Vec<String> = list(&app, &cookie, "/api/seasons")
        .await
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(seasons, ["2023/24", "2024/25", "2025/26"]);
}
