use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::layout;
use crate::api::{AppState, cookies};
use crate::db::{LookupKind, ResourceCounts, Store};
use crate::domain::SessionView;
use crate::services::AuthError;

/// Tables browsable under `/admin/{slug}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminResource {
    Seasons,
    Leagues,
    LeagueTypes,
    MatchSystems,
    Genders,
    Positions,
    Clubs,
    Teams,
    Players,
    Playgrounds,
    Users,
}

impl AdminResource {
    pub const ALL: [Self; 11] = [
        Self::Seasons,
        Self::Leagues,
        Self::LeagueTypes,
        Self::MatchSystems,
        Self::Genders,
        Self::Positions,
        Self::Clubs,
        Self::Teams,
        Self::Players,
        Self::Playgrounds,
        Self::Users,
    ];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Seasons => "seasons",
            Self::Leagues => "leagues",
            Self::LeagueTypes => "league-types",
            Self::MatchSystems => "match-systems",
            Self::Genders => "genders",
            Self::Positions => "positions",
            Self::Clubs => "clubs",
            Self::Teams => "teams",
            Self::Players => "players",
            Self::Playgrounds => "playgrounds",
            Self::Users => "users",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Seasons => "Seasons",
            Self::Leagues => "Leagues",
            Self::LeagueTypes => "League types",
            Self::MatchSystems => "Match systems",
            Self::Genders => "Genders",
            Self::Positions => "Positions",
            Self::Clubs => "Clubs",
            Self::Teams => "Teams",
            Self::Players => "Players",
            Self::Playgrounds => "Playgrounds",
            Self::Users => "Users",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.slug() == slug)
    }

    const fn columns(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Seasons => &[
                ("Name", "name"),
                ("Start", "start_date"),
                ("End", "end_date"),
                ("Active", "is_active"),
                ("Leagues", "_count.leagues"),
            ],
            Self::Leagues => &[
                ("Name", "name"),
                ("Season", "season"),
                ("Type", "league_type"),
                ("Match system", "match_system"),
                ("Gender", "gender"),
                ("Teams", "_count.teams"),
            ],
            Self::LeagueTypes | Self::MatchSystems => &[
                ("Name", "name"),
                ("Description", "description"),
                ("Leagues", "_count.leagues"),
            ],
            Self::Genders => &[
                ("Name", "name"),
                ("Leagues", "_count.leagues"),
                ("Teams", "_count.teams"),
                ("Players", "_count.players"),
            ],
            Self::Positions => &[
                ("Name", "name"),
                ("Abbreviation", "abbreviation"),
                ("Players", "_count.players"),
            ],
            Self::Clubs => &[
                ("Name", "name"),
                ("City", "city"),
                ("Founded", "founded_year"),
                ("Playground", "playground"),
                ("Teams", "_count.teams"),
            ],
            Self::Teams => &[
                ("Name", "name"),
                ("Club", "club"),
                ("Gender", "gender"),
                ("League", "league"),
                ("Players", "_count.players"),
            ],
            Self::Players => &[
                ("Last name", "last_name"),
                ("First name", "first_name"),
                ("Born", "birth_date"),
                ("Number", "jersey_number"),
                ("Team", "team"),
                ("Position", "position"),
                ("Gender", "gender"),
            ],
            Self::Playgrounds => &[
                ("Name", "name"),
                ("Address", "address"),
                ("City", "city"),
                ("Capacity", "capacity"),
                ("Clubs", "_count.clubs"),
            ],
            Self::Users => &[
                ("Name", "name"),
                ("Email", "email"),
                ("Role", "role"),
                ("Created", "created_at"),
            ],
        }
    }

    fn count(self, counts: &ResourceCounts) -> u64 {
        match self {
            Self::Seasons => counts.seasons,
            Self::Leagues => counts.leagues,
            Self::LeagueTypes => counts.league_types,
            Self::MatchSystems => counts.match_systems,
            Self::Genders => counts.genders,
            Self::Positions => counts.positions,
            Self::Clubs => counts.clubs,
            Self::Teams => counts.teams,
            Self::Players => counts.players,
            Self::Playgrounds => counts.playgrounds,
            Self::Users => counts.users,
        }
    }

    async fn rows(self, store: &Store) -> anyhow::Result<Vec<Value>> {
        match self {
            Self::Seasons => to_values(store.list_seasons().await?),
            Self::Leagues => to_values(store.list_leagues().await?),
            Self::LeagueTypes => to_values(store.list_lookups(LookupKind::LeagueType).await?),
            Self::MatchSystems => to_values(store.list_lookups(LookupKind::MatchSystem).await?),
            Self::Genders => to_values(store.list_lookups(LookupKind::Gender).await?),
            Self::Positions => to_values(store.list_lookups(LookupKind::Position).await?),
            Self::Clubs => to_values(store.list_clubs().await?),
            Self::Teams => to_values(store.list_teams().await?),
            Self::Players => to_values(store.list_players().await?),
            Self::Playgrounds => to_values(store.list_playgrounds().await?),
            Self::Users => to_values(store.list_users().await?),
        }
    }
}

fn to_values<T: Serialize>(rows: Vec<T>) -> anyhow::Result<Vec<Value>> {
    rows.into_iter()
        .map(|row| serde_json::to_value(row).map_err(Into::into))
        .collect()
}

fn nav() -> Vec<(&'static str, &'static str)> {
    AdminResource::ALL
        .iter()
        .map(|r| (r.slug(), r.title()))
        .collect()
}

/// Only same-site absolute paths are followed after login.
#[must_use]
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if is_local_path(path) => path,
        _ => "/admin",
    }
}

/// Browsers drop tab and newline bytes from URLs, so `/\t/host` reads as
/// `//host`. Any control or whitespace character disqualifies the path.
fn is_local_path(path: &str) -> bool {
    if path
        .chars()
        .any(|c| c.is_ascii_control() || c.is_whitespace() || c == '\\')
    {
        return false;
    }

    let mut chars = path.chars();
    chars.next() == Some('/') && chars.next() != Some('/')
}

fn error_page(status: StatusCode, message: &str) -> Response {
    (
        status,
        Html(layout::document(
            "Error",
            &format!("<main><h1>{}</h1></main>", html_escape::encode_text(message)),
        )),
    )
        .into_response()
}

// ============================================================================
// Login / logout
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

/// GET /login
pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    Html(layout::login_form(query.next.as_deref(), "", None))
}

/// POST /login
/// Signs an administrator in and follows `next`. Non-administrators get the
/// form back without a cookie.
pub async fn login_submit(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Response {
    let next = form.next.as_deref();
    let rerender = |status: StatusCode, message: &str| {
        (
            status,
            Html(layout::login_form(next, form.email.trim(), Some(message))),
        )
            .into_response()
    };

    let result = match state.auth().login(&form.email, &form.password).await {
        Ok(result) => result,
        Err(AuthError::InvalidCredentials) => {
            return rerender(StatusCode::UNAUTHORIZED, "Invalid email or password");
        }
        Err(AuthError::Validation(msg)) => return rerender(StatusCode::BAD_REQUEST, &msg),
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            return rerender(StatusCode::INTERNAL_SERVER_ERROR, "Sign-in is unavailable");
        }
    };

    if !result.user.is_admin() {
        tracing::warn!(
            user_id = result.user.id,
            reason = "not_admin",
            "Admin sign-in refused"
        );
        return rerender(StatusCode::FORBIDDEN, "Administrator access required");
    }

    let Some(cookie) = cookies::session_cookie(
        &result.token.token,
        state.shared.tokens.ttl(),
        state.config().server.secure_cookies,
    ) else {
        return rerender(StatusCode::INTERNAL_SERVER_ERROR, "Sign-in is unavailable");
    };

    (
        [(header::SET_COOKIE, cookie)],
        Redirect::to(safe_next(next)),
    )
        .into_response()
}

/// POST /logout
pub async fn logout_submit(State(state): State<Arc<AppState>>) -> Response {
    match cookies::removal_cookie(state.config().server.secure_cookies) {
        Some(cookie) => ([(header::SET_COOKIE, cookie)], Redirect::to("/login")).into_response(),
        None => error_page(StatusCode::INTERNAL_SERVER_ERROR, "Failed to sign out"),
    }
}

// ============================================================================
// Admin shell
// ============================================================================

/// GET /admin
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionView>,
) -> Response {
    let counts = match state.store().resource_counts().await {
        Ok(counts) => counts,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load dashboard counts");
            return error_page(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load dashboard");
        }
    };

    let rows: String = AdminResource::ALL
        .iter()
        .map(|r| {
            format!(
                "<tr><td><a href=\"/admin/{}\">{}</a></td><td>{}</td></tr>\n",
                r.slug(),
                r.title(),
                r.count(&counts)
            )
        })
        .collect();
    let content = format!(
        "<table>\n<thead><tr><th>Resource</th><th>Records</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>"
    );

    Html(layout::admin_page("Dashboard", &user, &nav(), &content)).into_response()
}

/// GET /admin/{resource}
pub async fn resource_page(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionView>,
    Path(slug): Path<String>,
) -> Response {
    let Some(resource) = AdminResource::from_slug(&slug) else {
        return error_page(StatusCode::NOT_FOUND, "Unknown resource");
    };

    match resource.rows(state.store()).await {
        Ok(rows) => {
            let content = layout::table(resource.columns(), &rows);
            Html(layout::admin_page(resource.title(), &user, &nav(), &content)).into_response()
        }
        Err(e) => {
            tracing::error!(resource = resource.slug(), error = %e, "Failed to load admin table");
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load records")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_must_be_a_local_path() {
        assert_eq!(safe_next(Some("/admin/teams")), "/admin/teams");
        assert_eq!(safe_next(Some("//evil.example")), "/admin");
        assert_eq!(safe_next(Some("https://evil.example")), "/admin");
        assert_eq!(safe_next(Some("/\\evil.example")), "/admin");
        assert_eq!(safe_next(Some("/\t/evil.example")), "/admin");
        assert_eq!(safe_next(Some("/\r\n/evil.example")), "/admin");
        assert_eq!(safe_next(Some("/ /evil.example")), "/admin");
        assert_eq!(safe_next(Some("/admin/teams?page=2")), "/admin/teams?page=2");
        assert_eq!(safe_next(None), "/admin");
    }

    #[test]
    fn slugs_round_trip() {
        for resource in AdminResource::ALL {
            assert_eq!(AdminResource::from_slug(resource.slug()), Some(resource));
        }
        assert_eq!(AdminResource::from_slug("fixtures"), None);
    }
}
