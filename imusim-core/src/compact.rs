// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flat "lite" record used by the one-shot WebSocket publisher.
//!
//! Gyroscope values are raw integer counts, the other axes are floats with six
//! decimals, and every field sits at the top level of the JSON object.

use crate::generator::{now_timestamp, round_to, SampleSource};
use crate::sample::AxisRange;
use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};

const COMPACT_PRECISION: u32 = 6;

pub const COMPACT_GYRO_LIMIT: i32 = 15_000;
pub const COMPACT_AX_RANGE: AxisRange = AxisRange {
    min: -12.0,
    max: 2.0,
};
pub const COMPACT_AY_RANGE: AxisRange = AxisRange { min: 0.0, max: 6.0 };
pub const COMPACT_AZ_RANGE: AxisRange = AxisRange {
    min: 0.0,
    max: 10.0,
};
pub const COMPACT_MAG_RANGE: AxisRange = AxisRange::symmetric(1.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactSample {
    pub gx: i32,
    pub gy: i32,
    pub gz: i32,
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub mx: f64,
    pub my: f64,
    pub mz: f64,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompactGenerator;

impl CompactGenerator {
    pub fn generate(&self) -> CompactSample {
        self.generate_with(&mut rand::rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> CompactSample {
        let mut float = |range: AxisRange| {
            round_to(rng.random_range(range.min..=range.max), COMPACT_PRECISION)
        };
        let (ax, ay, az) = (
            float(COMPACT_AX_RANGE),
            float(COMPACT_AY_RANGE),
            float(COMPACT_AZ_RANGE),
        );
        let (mx, my, mz) = (
            float(COMPACT_MAG_RANGE),
            float(COMPACT_MAG_RANGE),
            float(COMPACT_MAG_RANGE),
        );
        let gyro = COMPACT_GYRO_LIMIT;

        CompactSample {
            gx: rng.random_range(-gyro..=gyro),
            gy: rng.random_range(-gyro..=gyro),
            gz: rng.random_range(-gyro..=gyro),
            ax,
            ay,
            az,
            mx,
            my,
            mz,
            timestamp: now_timestamp(),
        }
    }
}

impl SampleSource for CompactGenerator {
    type Sample = CompactSample;

    fn next_sample(&mut self) -> CompactSample {
        self.generate()
    }
}
