//! Schema for the `users` resource.

use serde_json::Value;

use super::required;
use crate::error::CoreError;
use crate::validation::{Field, FieldErrors, Mode, Patch, PayloadReader};

pub const NAME: Field = Field::required("name");
pub const EMAIL: Field = Field::required("email");
pub const CITY: Field = Field::optional("city").nullable();

/// Every field a user payload may carry.
pub const FIELDS: &[Field] = &[NAME, EMAIL, CITY];

/// Validated input for inserting a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub city: Option<String>,
}

/// Validated partial update. These are the only user columns a client can
/// change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub city: Patch<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.city.is_unchanged()
    }
}

struct UserFields {
    name: Patch<String>,
    email: Patch<String>,
    city: Patch<String>,
}

fn read(payload: &Value, mode: Mode) -> Result<UserFields, FieldErrors> {
    let mut reader = PayloadReader::new(payload, mode, FIELDS);
    let fields = UserFields {
        name: reader.read_text(NAME),
        email: reader.read_email(EMAIL),
        city: reader.read_text(CITY),
    };
    reader.finish()?;
    Ok(fields)
}

/// List every problem with `payload` without building anything.
pub fn validate(payload: &Value, mode: Mode) -> FieldErrors {
    read(payload, mode).err().unwrap_or_default()
}

/// Load a complete user payload for creation.
pub fn load_create(payload: &Value) -> Result<NewUser, CoreError> {
    let fields = read(payload, Mode::Full).map_err(CoreError::Validation)?;
    Ok(NewUser {
        name: required(fields.name, NAME.name)?,
        email: required(fields.email, EMAIL.name)?,
        city: fields.city.into_option(),
    })
}

/// Load a partial user payload for an update.
pub fn load_update(payload: &Value) -> Result<UserPatch, CoreError> {
    let fields = read(payload, Mode::Partial).map_err(CoreError::Validation)?;
    Ok(UserPatch {
        name: fields.name.into_option(),
        email: fields.email.into_option(),
        city: fields.city,
    })
}
