//! The `auth_token` session cookie.

use axum::http::{HeaderMap, HeaderValue, header};
use tower_sessions::cookie::{Cookie, SameSite};

pub const SESSION_COOKIE: &str = "auth_token";

/// Value of the session cookie, if the request carries one.
///
/// Looks through every `Cookie` header; malformed pairs are skipped.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a fresh session token.
#[must_use]
pub fn session_cookie(token: &str, ttl: chrono::Duration, secure: bool) -> Option<HeaderValue> {
    let cookie = base(token.to_string(), secure)
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build();

    HeaderValue::from_str(&cookie.to_string()).ok()
}

/// `Set-Cookie` value that deletes the session cookie.
#[must_use]
pub fn removal_cookie(secure: bool) -> Option<HeaderValue> {
    let mut cookie = base(String::new(), secure).build();
    cookie.make_removal();

    HeaderValue::from_str(&cookie.to_string()).ok()
}

fn base(value: String, secure: bool) -> tower_sessions::cookie::CookieBuilder<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(secure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("lang=cs; auth_token=abc.def.ghi"),
        );

        assert_eq!(session_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn empty_or_missing_cookie_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn session_cookie_has_required_attributes() {
        let value = session_cookie("tok", chrono::Duration::hours(1), true).unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with("auth_token=tok"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("Secure"));
        assert!(value.contains("Max-Age=3600"));
    }

    #[test]
    fn insecure_cookie_omits_secure_flag() {
        let value = session_cookie("tok", chrono::Duration::hours(1), false).unwrap();
        assert!(!value.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let value = removal_cookie(false).unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with("auth_token=;"));
        assert!(value.contains("Max-Age=0"));
    }
}
