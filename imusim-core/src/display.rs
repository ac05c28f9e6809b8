// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-tick payload for display collaborators and its plain-text rendering.

use crate::elapsed_clock::ElapsedTime;
use crate::sample::{Axes, TelemetrySample};
use core::fmt;

const NO_PREVIOUS: &str = "No previous data.";
const GENERATING: &str = "Generating data...";

/// Everything a display needs to render one tick: the previous and current
/// sample, the formatted session time and the running sample count.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUpdate {
    pub previous: Option<TelemetrySample>,
    pub current: TelemetrySample,
    pub elapsed: ElapsedTime,
    pub count: u64,
}

impl DisplayUpdate {
    /// Text block shown for this tick: previous sample, current sample and a
    /// trailing progress line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = sample_lines(self.previous.as_ref());
        lines.extend(sample_lines(Some(&self.current)));
        lines.push(GENERATING.to_string());
        lines
    }

    /// `Timelapse: ..` and `Data Generated: ..` status labels.
    pub fn status_lines(&self) -> [String; 2] {
        [
            format!("Timelapse: {}", self.elapsed),
            format!("Data Generated: {}", self.count),
        ]
    }
}

impl fmt::Display for DisplayUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

fn sample_lines(sample: Option<&TelemetrySample>) -> Vec<String> {
    let Some(sample) = sample else {
        return vec![NO_PREVIOUS.to_string()];
    };
    vec![
        format!("Timestamp: {}", sample.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f")),
        format!("Accelerometer: {}", axes(&sample.accelerometer)),
        format!("Gyroscope:     {}", axes(&sample.gyroscope)),
        format!("Magnetometer:  {}", axes(&sample.magnetometer)),
    ]
}

fn axes(axes: &Axes) -> String {
    format!("x={} y={} z={}", axes.x, axes.y, axes.z)
}
