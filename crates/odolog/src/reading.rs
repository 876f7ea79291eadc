//! Core reading type for odolog.
//!
//! This module defines the fundamental data structure representing a
//! single odometer reading as recorded for a vehicle.

use serde::{Deserialize, Serialize};

/// Vehicle reference used by the sample reading.
pub const SAMPLE_VEHICLE_ID: i64 = 1;

/// Date used by the sample reading.
pub const SAMPLE_DATE: &str = "1/1/2017";

/// Odometer value used by the sample reading.
pub const SAMPLE_ODOMETER: i64 = 100;

/// A single odometer reading for a vehicle.
///
/// Field values are stored verbatim. The date in particular is free-form
/// text and is never parsed or normalized by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Unique identifier for this reading (assigned by the storage layer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Reference to the vehicle this reading belongs to.
    pub vehicle_id: i64,

    /// Date of the reading.
    pub date: String,

    /// Odometer value at the time of the reading.
    pub odometer: i64,
}

impl Reading {
    /// Create a new reading with the given field values.
    ///
    /// The identifier is left unset until the reading is inserted.
    #[must_use]
    pub fn new(vehicle_id: i64, date: impl Into<String>, odometer: i64) -> Self {
        Self {
            id: None,
            vehicle_id,
            date: date.into(),
            odometer,
        }
    }

    /// The fixed-value sample reading. For debugging purposes only.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(SAMPLE_VEHICLE_ID, SAMPLE_DATE, SAMPLE_ODOMETER)
    }
}
