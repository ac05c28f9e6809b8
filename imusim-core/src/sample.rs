// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Telemetry record schema shared by the file log and the WebSocket feed.
//!
//! The JSON shape is fixed:
//!
//! ```json
//! {
//!   "timestamp": "2025-01-01T12:00:00.123456",
//!   "accelerometer": {"x": 0.1, "y": -1.2, "z": 0.98},
//!   "gyroscope":     {"x": 12.5, "y": -3.0, "z": 240.1},
//!   "magnetometer":  {"x": 100.0, "y": -4000.25, "z": 12.0}
//! }
//! ```

use chrono::NaiveDateTime;
use imusim_error::{Result, TelemetryError};
use serde::{Deserialize, Serialize};

/// Closed interval a sensor axis is allowed to report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Range spanning `[-limit, limit]`
    #[must_use]
    pub const fn symmetric(limit: f64) -> Self {
        Self {
            min: -limit,
            max: limit,
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Accelerometer range in g
pub const ACCELEROMETER_RANGE: AxisRange = AxisRange::symmetric(2.0);
/// Gyroscope range in degrees per second
pub const GYROSCOPE_RANGE: AxisRange = AxisRange::symmetric(250.0);
/// Magnetometer range in microtesla
pub const MAGNETOMETER_RANGE: AxisRange = AxisRange::symmetric(4800.0);

/// One reading per axis of a three-axis sensor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Axes {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Axes {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn check(&self, sensor: &str, range: AxisRange) -> Result<()> {
        for (axis, value) in [("x", self.x), ("y", self.y), ("z", self.z)] {
            if !range.contains(value) {
                return Err(TelemetryError::invalid_sample(
                    format!("{sensor}.{axis}"),
                    value,
                ));
            }
        }
        Ok(())
    }
}

/// A single synthetic 9-axis IMU record.
///
/// Immutable once generated; the controller hands out clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Local wall-clock time at generation, ISO-8601 without offset
    pub timestamp: NaiveDateTime,
    pub accelerometer: Axes,
    pub gyroscope: Axes,
    pub magnetometer: Axes,
}

impl TelemetrySample {
    /// Checks every axis against its documented range.
    ///
    /// # Errors
    /// Returns [`TelemetryError::InvalidSample`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.accelerometer
            .check("accelerometer", ACCELEROMETER_RANGE)?;
        self.gyroscope.check("gyroscope", GYROSCOPE_RANGE)?;
        self.magnetometer.check("magnetometer", MAGNETOMETER_RANGE)
    }

    /// Encodes the sample as a single-line JSON message.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
