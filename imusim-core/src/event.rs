// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Status reports flowing from the controller and its sinks to the caller.

use crate::phase::Phase;
use std::path::PathBuf;
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    /// The controller moved between lifecycle phases
    PhaseChanged { from: Phase, to: Phase },
    /// Writing the JSON log failed; generation continues
    PersistenceFailed { path: PathBuf, reason: String },
    /// The network link came up or went down
    ConnectionChanged {
        connected: bool,
        reason: Option<String>,
    },
}

/// Cloneable handle publishing [`TelemetryEvent`]s to any number of subscribers.
///
/// Reporting never fails: with no subscriber the event is dropped, and slow
/// subscribers observe `RecvError::Lagged` rather than blocking the reporter.
#[derive(Debug, Clone)]
pub struct EventReporter {
    tx: broadcast::Sender<TelemetryEvent>,
}

impl EventReporter {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TelemetryEvent> {
        self.tx.subscribe()
    }

    pub fn report(&self, event: TelemetryEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventReporter {
    fn default() -> Self {
        Self::new(64)
    }
}
