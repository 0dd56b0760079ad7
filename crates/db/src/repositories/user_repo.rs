//! Repository for the `users` table.

use orderdesk_core::schema::user::NewUser;
use orderdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, city, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(conn: &mut PgConnection, input: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, city)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.city)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by ID and lock the row until the transaction ends.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List all users in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Write the updatable columns of `user` back to its row.
    ///
    /// Returns `None` if the row no longer exists.
    pub async fn update(conn: &mut PgConnection, user: &User) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = $2,
                email = $3,
                city = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.city)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Permanently delete a user. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign key violation while the user still has orders.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
