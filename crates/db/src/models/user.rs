//! User entity model and response projection.

use orderdesk_core::schema::user::UserPatch;
use orderdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Carries `created_at` / `updated_at`, which are internal. Use
/// [`UserResponse`] for anything sent to a client.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub city: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Merge a partial update into this row. Only allow-listed columns can
    /// change; `id` and timestamps are never touched.
    pub fn apply(mut self, patch: UserPatch) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        self.city = patch.city.apply_to(self.city);
        self
    }
}

/// Client-facing user representation. `id` is read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub city: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            city: user.city,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use orderdesk_core::validation::Patch;

    use super::*;

    fn alice() -> User {
        let now = Utc::now();
        User {
            id: 1,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            city: Some("Wonderland".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let user = alice();
        assert_eq!(user.clone().apply(UserPatch::default()), user);
    }

    #[test]
    fn patch_replaces_only_supplied_fields() {
        let patch = UserPatch {
            city: Patch::Set("New City".into()),
            ..UserPatch::default()
        };
        let updated = alice().apply(patch);
        assert_eq!(updated.city.as_deref(), Some("New City"));
        assert_eq!(updated.name, "Alice");
        assert_eq!(updated.email, "alice@example.com");
    }

    #[test]
    fn patch_can_clear_city() {
        let patch = UserPatch {
            city: Patch::Clear,
            ..UserPatch::default()
        };
        assert_eq!(alice().apply(patch).city, None);
    }

    #[test]
    fn response_omits_timestamps() {
        let json = serde_json::to_value(UserResponse::from(alice())).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["city", "email", "id", "name"]);
    }
}
