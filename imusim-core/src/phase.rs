// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::elapsed_clock::ElapsedTime;
use crate::sample::TelemetrySample;
use core::fmt;
use std::path::PathBuf;

/// Lifecycle state of a stream controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// Owned, consistent copy of a controller's session state.
///
/// Taken under the controller's lock; later changes do not show up here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub sample_count: u64,
    pub elapsed: ElapsedTime,
    pub last_sample: Option<TelemetrySample>,
    pub persist_path: Option<PathBuf>,
    pub network_connected: bool,
}
