//! Sensor readings as received from the gateway

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};
use crate::traits::Validatable;

/// One scalar measurement from one sensor
///
/// Immutable once built. The core only keeps `value`, and only inside the
/// sensor's window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Sensor identifier, the window key
    pub sensor_id: String,
    /// Measured value
    pub value: f64,
    /// When the value was taken
    pub timestamp: DateTime<Utc>,
    /// Free-form kind, e.g. `vibration`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_type: Option<String>,
    /// Free-form unit, e.g. `m/s2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Reading {
    /// Reading stamped with the current time
    pub fn new(sensor_id: impl Into<String>, value: f64) -> Self {
        Self::at(sensor_id, value, Utc::now())
    }

    /// Reading with an explicit timestamp
    pub fn at(sensor_id: impl Into<String>, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            value,
            timestamp,
            sensor_type: None,
            unit: None,
        }
    }

    /// Attach sensor kind
    pub fn sensor_type(mut self, sensor_type: impl Into<String>) -> Self {
        self.sensor_type = Some(sensor_type.into());
        self
    }

    /// Attach unit
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Gateway-side checks a reading must pass before evaluation
    pub fn validate(&self) -> ValidationResult<()> {
        if self.sensor_id.trim().is_empty() {
            return Err(ValidationError::EmptySensorId);
        }
        if !self.value.is_valid() {
            return Err(ValidationError::InvalidValue);
        }
        if self.value < 0.0 {
            return Err(ValidationError::NegativeValue { value: self.value });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_positive() {
        assert!(Reading::new("mast", 0.0).validate().is_ok());
        assert!(Reading::new("mast", 4.512).validate().is_ok());
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(
            Reading::new("mast", -0.5).validate(),
            Err(ValidationError::NegativeValue { value: -0.5 })
        );
    }

    #[test]
    fn rejects_non_finite_and_blank_id() {
        assert_eq!(Reading::new("mast", f64::NAN).validate(), Err(ValidationError::InvalidValue));
        assert_eq!(
            Reading::new("mast", f64::NEG_INFINITY).validate(),
            Err(ValidationError::InvalidValue)
        );
        assert_eq!(Reading::new("  ", 1.0).validate(), Err(ValidationError::EmptySensorId));
    }

    #[test]
    fn optional_metadata_is_omitted_when_absent() {
        let json = serde_json::to_value(Reading::new("mast", 1.0)).unwrap();
        assert!(json.get("unit").is_none());

        let json = serde_json::to_value(Reading::new("mast", 1.0).unit("m/s2")).unwrap();
        assert_eq!(json["unit"], "m/s2");
    }
}
