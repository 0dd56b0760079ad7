//! Payload validation toolkit.
//!
//! Request bodies arrive as untyped JSON. [`PayloadReader`] walks a JSON
//! object against a fixed allow-list of [`Field`]s and reads typed values
//! out of it, collecting *every* problem into [`FieldErrors`] instead of
//! stopping at the first one. The per-resource schemas in
//! [`crate::schema`] are built on top of it.

mod errors;
mod patch;
mod reader;

pub use errors::FieldErrors;
pub use patch::Patch;
pub use reader::{Field, PayloadReader};

/// Key under which payload-level (not field-level) problems are reported.
pub const SCHEMA_KEY: &str = "_schema";

/// Whether a payload must be complete or may omit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Create: every required field must be present.
    Full,
    /// Update: omitted fields are left untouched, supplied ones are still
    /// type- and format-checked.
    Partial,
}

/// Field-level error messages returned to clients.
pub mod messages {
    pub const MISSING: &str = "Missing data for required field.";
    pub const NULL: &str = "Field may not be null.";
    pub const BLANK: &str = "Field may not be blank.";
    pub const UNKNOWN: &str = "Unknown field.";
    pub const INVALID_INPUT: &str = "Invalid input type.";
    pub const NOT_STRING: &str = "Not a valid string.";
    pub const NOT_EMAIL: &str = "Not a valid email address.";
    pub const NOT_INTEGER: &str = "Not a valid integer.";
    pub const OUT_OF_RANGE: &str = "Number out of range.";
    pub const NOT_NUMBER: &str = "Not a valid number.";
    pub const NOT_DATE: &str = "Not a valid date.";
}
