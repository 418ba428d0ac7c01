//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A data point must carry at least one field
    #[error("Data point '{measurement}' has no fields")]
    EmptyFieldSet { measurement: String },

    /// Field values must be finite numbers
    #[error("Field '{field}' has a non-finite value")]
    NonFiniteField { field: String },

    /// Measurement name must not be empty
    #[error("Measurement name must not be empty")]
    EmptyMeasurement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_offender() {
        let err = DomainError::NonFiniteField {
            field: "Temperature_3".to_string(),
        };
        assert!(err.to_string().contains("Temperature_3"));

        let err = DomainError::EmptyFieldSet {
            measurement: "forecast".to_string(),
        };
        assert!(err.to_string().contains("forecast"));
    }
}
