// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::NaiveDate;
use imusim_core::{Axes, TelemetrySample};

/// A fixed in-range sample whose values are derived from `seed`.
pub fn sample_with_seed(seed: u32) -> TelemetrySample {
    let step = f64::from(seed % 100);
    TelemetrySample {
        timestamp: NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_micro_opt(12, 0, seed % 60, 125_000))
            .expect("fixture timestamp"),
        accelerometer: Axes::new(step / 100.0, -step / 100.0, 1.0),
        gyroscope: Axes::new(step, -step, 2.5 * step),
        magnetometer: Axes::new(10.0 * step, -10.0 * step, 4800.0),
    }
}

pub fn sample_alpha() -> TelemetrySample {
    sample_with_seed(1)
}

pub fn sample_bravo() -> TelemetrySample {
    sample_with_seed(2)
}

pub fn sample_charlie() -> TelemetrySample {
    sample_with_seed(3)
}
