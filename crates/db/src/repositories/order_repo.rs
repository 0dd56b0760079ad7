//! Repository for the `orders` table.

use orderdesk_core::schema::order::NewOrder;
use orderdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::order::Order;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, customer_id, product, quantity, total_price, order_date, created_at, updated_at";

/// Provides CRUD operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order, returning the created row.
    ///
    /// Fails with a foreign key violation if `customer_id` has no user.
    pub async fn create(conn: &mut PgConnection, input: &NewOrder) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders (customer_id, product, quantity, total_price, order_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(input.customer_id)
            .bind(&input.product)
            .bind(input.quantity)
            .bind(input.total_price)
            .bind(input.order_date)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find an order by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an order by ID and lock the row until the transaction ends.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List all orders in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders ORDER BY id");
        sqlx::query_as::<_, Order>(&query).fetch_all(pool).await
    }

    /// List the orders placed by one customer, in insertion order.
    pub async fn list_by_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY id");
        sqlx::query_as::<_, Order>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Write the updatable columns of `order` back to its row.
    ///
    /// Returns `None` if the row no longer exists.
    pub async fn update(
        conn: &mut PgConnection,
        order: &Order,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                customer_id = $2,
                product = $3,
                quantity = $4,
                total_price = $5,
                order_date = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(order.id)
            .bind(order.customer_id)
            .bind(&order.product)
            .bind(order.quantity)
            .bind(order.total_price)
            .bind(order.order_date)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Permanently delete an order. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
