//! Types shared by the auth flow and the HTTP layer.

use serde::{Deserialize, Serialize};

use crate::db::User;
pub use crate::entities::users::Role;

/// Public projection of a user account.
///
/// Produced fresh by every session resolution and returned by the
/// registration and login endpoints. It never carries the password hash.
///
/// # Examples
///
/// ```rust
/// use leaguedesk::domain::{Role, SessionView};
///
/// let view = SessionView {
///     id: 1,
///     name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
///     role: Role::Admin,
/// };
/// assert!(view.is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl SessionView {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<User> for SessionView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"USER\"");
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn session_view_has_no_password_field() {
        let view = SessionView::from(User {
            id: 7,
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            role: Role::User,
            created_at: String::new(),
            updated_at: String::new(),
        });

        let json = serde_json::to_value(&view).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(!view.is_admin());
    }
}
