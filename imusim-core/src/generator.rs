// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Uniform random sample generation.

use crate::sample::{
    AxisRange, Axes, TelemetrySample, ACCELEROMETER_RANGE, GYROSCOPE_RANGE, MAGNETOMETER_RANGE,
};
use chrono::{Local, NaiveDateTime, SubsecRound};
use rand::Rng;
use serde::Serialize;

/// Decimal places kept in the canonical profile
pub const DEFAULT_PRECISION: u32 = 3;

/// Finest precision accepted; larger requests are clamped to it
pub const MAX_PRECISION: u32 = 9;

/// Anything that can produce one serializable record per call.
///
/// The generation loop and the one-shot publisher only need this much.
pub trait SampleSource: Send {
    type Sample: Serialize + Send;

    fn next_sample(&mut self) -> Self::Sample;
}

/// Rounds `value` to `precision` decimal places, at most [`MAX_PRECISION`].
#[must_use]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = f64::from(10u32.pow(precision.min(MAX_PRECISION)));
    (value * factor).round() / factor
}

pub(crate) fn now_timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

/// Stateless producer of [`TelemetrySample`] values.
///
/// Every axis is drawn independently from a uniform distribution over its range
/// and rounded to the configured precision. Generation cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleGenerator {
    precision: u32,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl SampleGenerator {
    /// Precision above [`MAX_PRECISION`] is clamped.
    pub const fn new(precision: u32) -> Self {
        let precision = if precision > MAX_PRECISION {
            MAX_PRECISION
        } else {
            precision
        };
        Self { precision }
    }

    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Generates a sample using the thread-local RNG.
    pub fn generate(&self) -> TelemetrySample {
        self.generate_with(&mut rand::rng())
    }

    /// Generates a sample from the given RNG.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> TelemetrySample {
        TelemetrySample {
            timestamp: now_timestamp(),
            accelerometer: self.axes(rng, ACCELEROMETER_RANGE),
            gyroscope: self.axes(rng, GYROSCOPE_RANGE),
            magnetometer: self.axes(rng, MAGNETOMETER_RANGE),
        }
    }

    fn axes<R: Rng + ?Sized>(&self, rng: &mut R, range: AxisRange) -> Axes {
        Axes::new(
            self.value(rng, range),
            self.value(rng, range),
            self.value(rng, range),
        )
    }

    fn value<R: Rng + ?Sized>(&self, rng: &mut R, range: AxisRange) -> f64 {
        // rounding can land on a bound but never past it
        round_to(rng.random_range(range.min..=range.max), self.precision)
    }
}

impl SampleSource for SampleGenerator {
    type Sample = TelemetrySample;

    fn next_sample(&mut self) -> TelemetrySample {
        self.generate()
    }
}
