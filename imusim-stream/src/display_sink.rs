// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use imusim_core::DisplayUpdate;

/// Observer receiving one [`DisplayUpdate`] per generated sample.
///
/// Called from the generation loop with no controller lock held, so an
/// implementation may read the controller's accessors. It should return
/// quickly: the file and network sinks run after it within the same tick.
pub trait DisplaySink: Send + Sync + 'static {
    fn show(&self, update: DisplayUpdate);
}

impl<F> DisplaySink for F
where
    F: Fn(DisplayUpdate) + Send + Sync + 'static,
{
    fn show(&self, update: DisplayUpdate) {
        self(update);
    }
}
