use chrono::NaiveDate;
use serde_json::{Map, Value};
use validator::ValidateEmail;

use super::messages;
use super::{FieldErrors, Mode, Patch, SCHEMA_KEY};

/// Date format accepted for `DATE` columns.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Describes one field a schema accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    /// Must be present in [`Mode::Full`].
    pub required: bool,
    /// May be supplied as JSON `null`.
    pub nullable: bool,
}

impl Field {
    /// A field that must be present on create and may never be null.
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            nullable: false,
        }
    }

    /// A field that may be omitted but, when supplied, may not be null.
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            nullable: false,
        }
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }
}

/// What the slot lookup found for a field before type checking.
enum Slot<'a> {
    /// Absent, or present but already reported as an error.
    Skip,
    Null,
    Value(&'a Value),
}

/// Reads typed values from a JSON object, accumulating errors.
///
/// Construction rejects non-object payloads and any key that is not in the
/// schema's field list. Each `read_*` call then checks one field; invalid
/// fields yield [`Patch::Unchanged`] and leave a message behind. Call
/// [`PayloadReader::finish`] once every field has been read.
#[derive(Debug)]
pub struct PayloadReader<'a> {
    object: Option<&'a Map<String, Value>>,
    mode: Mode,
    errors: FieldErrors,
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a Value, mode: Mode, fields: &[Field]) -> Self {
        let mut errors = FieldErrors::new();
        let object = payload.as_object();

        match object {
            Some(map) => {
                for key in map.keys() {
                    if !fields.iter().any(|f| f.name == key) {
                        errors.add(key, messages::UNKNOWN);
                    }
                }
            }
            None => errors.add(SCHEMA_KEY, messages::INVALID_INPUT),
        }

        Self {
            object,
            mode,
            errors,
        }
    }

    /// A non-blank string.
    pub fn read_text(&mut self, field: Field) -> Patch<String> {
        match self.slot(field) {
            Slot::Skip => Patch::Unchanged,
            Slot::Null => Patch::Clear,
            Slot::Value(value) => match value.as_str() {
                Some(s) if s.trim().is_empty() => self.reject(field, messages::BLANK),
                Some(s) => Patch::Set(s.to_string()),
                None => self.reject(field, messages::NOT_STRING),
            },
        }
    }

    /// A non-blank string that must also be a well-formed email address.
    pub fn read_email(&mut self, field: Field) -> Patch<String> {
        match self.read_text(field) {
            Patch::Set(email) if !email.validate_email() => {
                self.reject(field, messages::NOT_EMAIL)
            }
            other => other,
        }
    }

    /// A JSON integer that fits in `T`. Floats, booleans, and numeric
    /// strings are rejected.
    pub fn read_integer<T>(&mut self, field: Field) -> Patch<T>
    where
        T: TryFrom<i64>,
    {
        match self.slot(field) {
            Slot::Skip => Patch::Unchanged,
            Slot::Null => Patch::Clear,
            Slot::Value(Value::Number(n)) if n.is_i64() || n.is_u64() => {
                match n.as_i64().and_then(|v| T::try_from(v).ok()) {
                    Some(v) => Patch::Set(v),
                    None => self.reject(field, messages::OUT_OF_RANGE),
                }
            }
            Slot::Value(_) => self.reject(field, messages::NOT_INTEGER),
        }
    }

    /// Any JSON number.
    pub fn read_number(&mut self, field: Field) -> Patch<f64> {
        match self.slot(field) {
            Slot::Skip => Patch::Unchanged,
            Slot::Null => Patch::Clear,
            Slot::Value(value) => match value.as_f64() {
                Some(v) => Patch::Set(v),
                None => self.reject(field, messages::NOT_NUMBER),
            },
        }
    }

    /// A calendar date in `YYYY-MM-DD` form.
    pub fn read_date(&mut self, field: Field) -> Patch<NaiveDate> {
        match self.slot(field) {
            Slot::Skip => Patch::Unchanged,
            Slot::Null => Patch::Clear,
            Slot::Value(value) => match value
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
            {
                Some(date) => Patch::Set(date),
                None => self.reject(field, messages::NOT_DATE),
            },
        }
    }

    /// Errors gathered so far.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Finish reading: `Err` with every recorded problem, if any.
    pub fn finish(self) -> Result<(), FieldErrors> {
        self.errors.into_result()
    }

    fn slot(&mut self, field: Field) -> Slot<'a> {
        let Some(object) = self.object else {
            return Slot::Skip;
        };

        match object.get(field.name) {
            None => {
                if field.required && self.mode == Mode::Full {
                    self.errors.add(field.name, messages::MISSING);
                }
                Slot::Skip
            }
            Some(Value::Null) if field.nullable => Slot::Null,
            Some(Value::Null) => {
                self.errors.add(field.name, messages::NULL);
                Slot::Skip
            }
            Some(value) => Slot::Value(value),
        }
    }

    fn reject<T>(&mut self, field: Field, message: &str) -> Patch<T> {
        self.errors.add(field.name, message);
        Patch::Unchanged
    }
}
