// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core types for the imusim 9-axis IMU simulator.
//!
//! - [`TelemetrySample`]: one accelerometer/gyroscope/magnetometer record
//! - [`SampleGenerator`]: uniform random samples within the documented ranges
//! - [`ElapsedClock`]: session start instant and `HH:MM:SS.mmm` formatting
//! - [`Phase`] and [`SessionSnapshot`]: the lifecycle state exposed to callers
//! - [`DisplayUpdate`]: what a display collaborator receives on every tick
//! - [`TelemetryEvent`]: status reports from sinks and the controller

pub mod compact;
pub mod display;
pub mod elapsed_clock;
pub mod event;
pub mod generator;
pub mod phase;
pub mod sample;

pub use self::compact::{CompactGenerator, CompactSample};
pub use self::display::DisplayUpdate;
pub use self::elapsed_clock::{ElapsedClock, ElapsedTime};
pub use self::event::{EventReporter, TelemetryEvent};
pub use self::generator::{
    round_to, SampleGenerator, SampleSource, DEFAULT_PRECISION, MAX_PRECISION,
};
pub use self::phase::{Phase, SessionSnapshot};
pub use self::sample::{
    AxisRange, Axes, TelemetrySample, ACCELEROMETER_RANGE, GYROSCOPE_RANGE, MAGNETOMETER_RANGE,
};
pub use imusim_error::{Result, TelemetryError};
