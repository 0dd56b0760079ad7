//! Order entity model and response projection.

use chrono::NaiveDate;
use orderdesk_core::schema::order::OrderPatch;
use orderdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full order row from the `orders` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Order {
    pub id: DbId,
    pub customer_id: DbId,
    pub product: String,
    pub quantity: i32,
    pub total_price: Option<f64>,
    pub order_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Merge a partial update into this row.
    pub fn apply(mut self, patch: OrderPatch) -> Self {
        if let Some(customer_id) = patch.customer_id {
            self.customer_id = customer_id;
        }
        if let Some(product) = patch.product {
            self.product = product;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        self.total_price = patch.total_price.apply_to(self.total_price);
        self.order_date = patch.order_date.apply_to(self.order_date);
        self
    }
}

/// Client-facing order representation. `order_date` serializes as
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderResponse {
    pub id: DbId,
    pub customer_id: DbId,
    pub product: String,
    pub quantity: i32,
    pub total_price: Option<f64>,
    pub order_date: Option<NaiveDate>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            product: order.product,
            quantity: order.quantity,
            total_price: order.total_price,
            order_date: order.order_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use orderdesk_core::validation::Patch;

    use super::*;

    fn widget_order() -> Order {
        let now = Utc::now();
        Order {
            id: 10,
            customer_id: 1,
            product: "Widget".into(),
            quantity: 2,
            total_price: Some(19.98),
            order_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn patch_updates_quantity_and_clears_price() {
        let patch = OrderPatch {
            quantity: Some(5),
            total_price: Patch::Clear,
            ..OrderPatch::default()
        };
        let updated = widget_order().apply(patch);
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.total_price, None);
        assert_eq!(updated.product, "Widget");
        assert_eq!(updated.order_date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn response_formats_date() {
        let json = serde_json::to_value(OrderResponse::from(widget_order())).unwrap();
        assert_eq!(json["order_date"], "2024-05-01");
        assert!(json.get("created_at").is_none());
    }
}
