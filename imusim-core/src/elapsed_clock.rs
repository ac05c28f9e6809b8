// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Session wall clock.
//!
//! The clock is not frozen while a session is paused: elapsed time keeps
//! advancing even though no samples are produced.
//!
//! It is built on [`tokio::time::Instant`], so it follows tokio's paused test
//! clock as well as real time.

use core::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Elapsed session time, displayed as zero-padded `HH:MM:SS.mmm`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ElapsedTime(Duration);

impl ElapsedTime {
    pub const ZERO: Self = Self(Duration::ZERO);

    pub const fn as_duration(&self) -> Duration {
        self.0
    }
}

impl From<Duration> for ElapsedTime {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.0.as_secs();
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;
        let millis = self.0.subsec_millis();
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
    }
}

/// Tracks when the current session started.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElapsedClock {
    started_at: Option<Instant>,
}

impl ElapsedClock {
    pub const fn new() -> Self {
        Self { started_at: None }
    }

    /// Records the current instant as the session start.
    pub fn on_start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Time since [`on_start`](Self::on_start), or zero if no session started.
    pub fn elapsed(&self) -> ElapsedTime {
        self.started_at
            .map(|start| ElapsedTime(start.elapsed()))
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.started_at = None;
    }

    pub const fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub const fn is_started(&self) -> bool {
        self.started_at.is_some()
    }
}
