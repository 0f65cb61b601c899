//! Three-way updates for nullable fields.

/// Change to apply to an optional stored field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Leave the field as it is.
    #[default]
    Keep,
    /// Store `null` in the field.
    Clear,
    /// Store the given value.
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Builds `Set` from `Some` and `Clear` from `None`.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }

    /// Returns `true` for [`FieldPatch::Keep`].
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}
