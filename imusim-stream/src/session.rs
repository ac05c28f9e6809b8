// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use imusim_core::{DisplayUpdate, ElapsedClock, Phase, SessionSnapshot, TelemetrySample};
use imusim_sink::FilePersistenceSink;

/// Mutable session state, only ever touched under the controller's lock.
///
/// `epoch` increases on every start and reset; a loop task only writes while
/// the epoch it was spawned with is still current.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) phase: Phase,
    pub(crate) epoch: u64,
    pub(crate) sample_count: u64,
    pub(crate) clock: ElapsedClock,
    pub(crate) last_sample: Option<TelemetrySample>,
    pub(crate) file_sink: Option<FilePersistenceSink>,
}

/// Work left for the sinks after a sample was recorded.
pub(crate) struct TickOutput {
    pub(crate) update: DisplayUpdate,
    pub(crate) file_sink: Option<FilePersistenceSink>,
}

impl SessionState {
    pub(crate) fn begin(&mut self, file_sink: Option<FilePersistenceSink>) -> u64 {
        self.epoch += 1;
        self.phase = Phase::Running;
        self.sample_count = 0;
        self.clock.on_start();
        self.last_sample = None;
        self.file_sink = file_sink;
        self.epoch
    }

    pub(crate) fn clear(&mut self) {
        self.epoch += 1;
        self.phase = Phase::Idle;
        self.sample_count = 0;
        self.clock.reset();
        self.last_sample = None;
        self.file_sink = None;
    }

    pub(crate) fn accepts(&self, epoch: u64) -> bool {
        self.epoch == epoch && self.phase == Phase::Running
    }

    pub(crate) fn record(&mut self, sample: TelemetrySample) -> TickOutput {
        let previous = self.last_sample.replace(sample.clone());
        self.sample_count += 1;
        TickOutput {
            update: DisplayUpdate {
                previous,
                current: sample,
                elapsed: self.clock.elapsed(),
                count: self.sample_count,
            },
            file_sink: self.file_sink.clone(),
        }
    }

    pub(crate) fn snapshot(&self, network_connected: bool) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            sample_count: self.sample_count,
            elapsed: self.clock.elapsed(),
            last_sample: self.last_sample.clone(),
            persist_path: self
                .file_sink
                .as_ref()
                .map(|sink| sink.path().to_path_buf()),
            network_connected,
        }
    }
}
