//! Per-resource payload schemas.
//!
//! Each schema owns the allow-list of fields its resource accepts and turns
//! a raw JSON payload into a typed create DTO or update patch. Anything not
//! on the allow-list, including the read-only `id`, is rejected.

pub mod order;
pub mod user;

use crate::error::CoreError;
use crate::validation::{messages, FieldErrors, Patch};

/// Unwrap a field that [`crate::validation::Mode::Full`] guarantees is set.
fn required<T>(patch: Patch<T>, field: &str) -> Result<T, CoreError> {
    patch
        .into_option()
        .ok_or_else(|| CoreError::Validation(FieldErrors::single(field, messages::MISSING)))
}
