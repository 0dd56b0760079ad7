/// The outcome of reading one field from a payload.
///
/// Partial updates need to tell "not supplied" apart from "explicitly set
/// to null", so a plain `Option` is not enough for nullable columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was omitted (or was invalid and already reported).
    #[default]
    Unchanged,
    /// The field was supplied as `null`.
    Clear,
    /// The field was supplied with a value.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// `Some` only for [`Patch::Set`].
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unchanged | Self::Clear => None,
        }
    }

    /// Merge into the current value of a nullable column.
    pub fn apply_to(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Unchanged => current,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }
}
