//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field was set to null but the column is not nullable
    NullNotAllowed { field: &'static str },

    /// Numeric field outside its allowed range
    OutOfRange { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::NullNotAllowed { field } => {
                write!(f, "{} cannot be null", field)
            }
            Self::OutOfRange { field, reason } => {
                write!(f, "{} {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 255,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 255 characters"
        );

        let err = ValidationError::NullNotAllowed { field: "title" };
        assert_eq!(err.to_string(), "title cannot be null");
    }
}
