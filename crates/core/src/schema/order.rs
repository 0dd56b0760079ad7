//! Schema for the `orders` resource.

use chrono::NaiveDate;
use serde_json::Value;

use super::required;
use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{Field, FieldErrors, Mode, Patch, PayloadReader};

pub const CUSTOMER_ID: Field = Field::required("customer_id");
pub const PRODUCT: Field = Field::required("product");
pub const QUANTITY: Field = Field::optional("quantity");
pub const TOTAL_PRICE: Field = Field::optional("total_price").nullable();
pub const ORDER_DATE: Field = Field::optional("order_date").nullable();

/// Every field an order payload may carry.
pub const FIELDS: &[Field] = &[CUSTOMER_ID, PRODUCT, QUANTITY, TOTAL_PRICE, ORDER_DATE];

/// Quantity stored when a create payload omits it.
pub const DEFAULT_QUANTITY: i32 = 1;

/// Validated input for inserting an order.
///
/// `customer_id` is not checked against `users` here; the foreign key does
/// that when the row is written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: DbId,
    pub product: String,
    pub quantity: i32,
    pub total_price: Option<f64>,
    pub order_date: Option<NaiveDate>,
}

/// Validated partial update of an order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub customer_id: Option<DbId>,
    pub product: Option<String>,
    pub quantity: Option<i32>,
    pub total_price: Patch<f64>,
    pub order_date: Patch<NaiveDate>,
}

impl OrderPatch {
    pub fn is_empty(&self) -> bool {
        self.customer_id.is_none()
            && self.product.is_none()
            && self.quantity.is_none()
            && self.total_price.is_unchanged()
            && self.order_date.is_unchanged()
    }
}

struct OrderFields {
    customer_id: Patch<DbId>,
    product: Patch<String>,
    quantity: Patch<i32>,
    total_price: Patch<f64>,
    order_date: Patch<NaiveDate>,
}

fn read(payload: &Value, mode: Mode) -> Result<OrderFields, FieldErrors> {
    let mut reader = PayloadReader::new(payload, mode, FIELDS);
    let fields = OrderFields {
        customer_id: reader.read_integer(CUSTOMER_ID),
        product: reader.read_text(PRODUCT),
        quantity: reader.read_integer(QUANTITY),
        total_price: reader.read_number(TOTAL_PRICE),
        order_date: reader.read_date(ORDER_DATE),
    };
    reader.finish()?;
    Ok(fields)
}

/// List every problem with `payload` without building anything.
pub fn validate(payload: &Value, mode: Mode) -> FieldErrors {
    read(payload, mode).err().unwrap_or_default()
}

/// Load a complete order payload for creation.
pub fn load_create(payload: &Value) -> Result<NewOrder, CoreError> {
    let fields = read(payload, Mode::Full).map_err(CoreError::Validation)?;
    Ok(NewOrder {
        customer_id: required(fields.customer_id, CUSTOMER_ID.name)?,
        product: required(fields.product, PRODUCT.name)?,
        quantity: fields.quantity.into_option().unwrap_or(DEFAULT_QUANTITY),
        total_price: fields.total_price.into_option(),
        order_date: fields.order_date.into_option(),
    })
}

/// Load a partial order payload for an update.
pub fn load_update(payload: &Value) -> Result<OrderPatch, CoreError> {
    let fields = read(payload, Mode::Partial).map_err(CoreError::Validation)?;
    Ok(OrderPatch {
        customer_id: fields.customer_id.into_option(),
        product: fields.product.into_option(),
        quantity: fields.quantity.into_option(),
        total_price: fields.total_price,
        order_date: fields.order_date,
    })
}
