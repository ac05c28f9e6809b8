// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use imusim_core::DisplayUpdate;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Captures every [`DisplayUpdate`] handed to a display callback.
///
/// Updates are both stored for later inspection and forwarded to a channel so
/// tests can await them one at a time.
#[derive(Clone)]
pub struct RecordingDisplay {
    updates: Arc<Mutex<Vec<DisplayUpdate>>>,
    notify: UnboundedSender<DisplayUpdate>,
}

impl RecordingDisplay {
    pub fn new() -> (Self, UnboundedReceiver<DisplayUpdate>) {
        let (notify, rx) = unbounded_channel();
        let display = Self {
            updates: Arc::new(Mutex::new(Vec::new())),
            notify,
        };
        (display, rx)
    }

    /// A display callback feeding this recorder.
    pub fn callback(&self) -> impl Fn(DisplayUpdate) + Send + Sync + 'static {
        let recorder = self.clone();
        move |update| recorder.record(update)
    }

    pub fn record(&self, update: DisplayUpdate) {
        self.updates.lock().push(update.clone());
        let _ = self.notify.send(update);
    }

    pub fn updates(&self) -> Vec<DisplayUpdate> {
        self.updates.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.updates.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
