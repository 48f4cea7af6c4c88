//! Error type shared by every field value object and by `Task`.

use thiserror::Error;

/// Failures raised while building or querying the task model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A raw string broke the format, range or temporal rule of a field.
    #[error("{field}: {message}")]
    Constraint {
        field: &'static str,
        message: &'static str,
    },

    /// A date-based query was made on a field that holds no value.
    #[error("{field} has no value to compare against")]
    EmptyValue { field: &'static str },
}

impl ModelError {
    pub(crate) fn constraint(field: &'static str, message: &'static str) -> Self {
        tracing::debug!(field, message, "field validation failed");
        ModelError::Constraint { field, message }
    }

    /// Name of the field the error is about.
    pub fn field(&self) -> &'static str {
        match self {
            ModelError::Constraint { field, .. } | ModelError::EmptyValue { field } => *field,
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
