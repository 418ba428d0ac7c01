//! Time-series data point value object
//!
//! A single point as accepted by the time-series sink: a measurement name,
//! an (often empty) tag set, one or more numeric fields and a timestamp.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// A point to be written to the time-series sink
///
/// Tags and fields are kept in ordered maps so that any wire encoding of
/// the point is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    measurement: String,
    tags: BTreeMap<String, String>,
    fields: BTreeMap<String, f64>,
    timestamp: DateTime<Utc>,
}

impl DataPoint {
    /// Create a point without tags or fields
    pub fn new(measurement: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            timestamp,
        }
    }

    /// Add a tag
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Add a numeric field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Measurement name
    #[must_use]
    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    /// Tag set
    #[must_use]
    pub const fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Field set
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, f64> {
        &self.fields
    }

    /// Point timestamp
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Check that the point can be represented by a time-series sink
    ///
    /// # Errors
    ///
    /// Returns an error if the measurement is empty, there are no fields,
    /// or any field value is NaN or infinite.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.measurement.is_empty() {
            return Err(DomainError::EmptyMeasurement);
        }
        if self.fields.is_empty() {
            return Err(DomainError::EmptyFieldSet {
                measurement: self.measurement.clone(),
            });
        }
        if let Some((key, _)) = self.fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DomainError::NonFiniteField { field: key.clone() });
        }
        Ok(())
    }
}
