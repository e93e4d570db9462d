//! Field-level validation results shared by every form

use serde::Serialize;

/// Key used for errors that belong to the whole form rather than one field.
pub const NON_FIELD_ERRORS: &str = "__all__";

pub(crate) const REQUIRED: &str = "This field is required.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validation errors keyed by field, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Messages recorded for `field`.
    pub fn for_field(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

/// Result of submitting a form: either the accepted value or the errors to show.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome<T> {
    Valid(T),
    Invalid(FormErrors),
}

impl<T> FormOutcome<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FormOutcome<U> {
        match self {
            Self::Valid(value) => FormOutcome::Valid(f(value)),
            Self::Invalid(errors) => FormOutcome::Invalid(errors),
        }
    }

    /// Errors, if the form was rejected.
    pub fn errors(&self) -> Option<&FormErrors> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(errors) => Some(errors),
        }
    }
}
