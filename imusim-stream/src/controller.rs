// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The Idle/Running/Paused state machine and its generation loop.

use crate::config::{ControllerConfig, StartOptions};
use crate::display_sink::DisplaySink;
use crate::session::{SessionState, TickOutput};
use imusim_core::{
    ElapsedTime, EventReporter, Phase, SampleGenerator, SessionSnapshot, TelemetryEvent,
    TelemetrySample,
};
use imusim_error::{Result, TelemetryError};
use imusim_sink::{FilePersistenceSink, NetworkSink, NetworkTarget};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::select;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

struct Worker {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

struct Shared {
    runtime: Handle,
    config: ControllerConfig,
    generator: SampleGenerator,
    state: Mutex<SessionState>,
    network: RwLock<Option<Arc<NetworkSink>>>,
    display: Arc<dyn DisplaySink>,
    reporter: EventReporter,
}

/// Drives one telemetry session at a time.
///
/// Control calls may come from any thread, inside the runtime or not: the
/// loop and connect tasks are spawned on the runtime captured at construction.
/// At most one generation loop is alive per controller; `start` while a
/// session exists is a no-op. The display callback and the sinks are always
/// invoked with no lock held, so a callback may read accessors such as
/// [`sample_count`](Self::sample_count).
pub struct StreamController {
    shared: Arc<Shared>,
    worker: Mutex<Option<Worker>>,
}

impl StreamController {
    /// Controller bound to the tokio runtime the caller is running in.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Config`] if `config` does not validate or if
    /// called outside a tokio runtime; use [`with_runtime`](Self::with_runtime)
    /// from a plain thread.
    pub fn new(config: ControllerConfig, display: impl DisplaySink) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|err| {
            TelemetryError::config(format!("no tokio runtime to run the generation loop: {err}"))
        })?;
        Self::with_runtime(config, display, runtime)
    }

    /// Controller whose tasks run on `runtime`; usable from any thread.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Config`] if `config` does not validate.
    pub fn with_runtime(
        config: ControllerConfig,
        display: impl DisplaySink,
        runtime: Handle,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, Arc::new(display), runtime))
    }

    /// Controller with the default 500 ms cadence.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Config`] if called outside a tokio runtime.
    pub fn with_defaults(display: impl DisplaySink) -> Result<Self> {
        Self::new(ControllerConfig::default(), display)
    }

    fn build(config: ControllerConfig, display: Arc<dyn DisplaySink>, runtime: Handle) -> Self {
        let shared = Shared {
            runtime,
            generator: SampleGenerator::new(config.precision),
            reporter: EventReporter::new(config.event_capacity),
            state: Mutex::new(SessionState::default()),
            network: RwLock::new(None),
            display,
            config,
        };
        Self {
            shared: Arc::new(shared),
            worker: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.shared.config
    }

    /// Starts a session from Idle. Returns `false` and changes nothing when a
    /// session is already running or paused.
    ///
    /// The first sample is produced immediately, then one per tick interval.
    pub fn start(&self, options: StartOptions) -> bool {
        let mut worker = self.worker.lock();
        let mut state = self.shared.state.lock();
        if state.phase != Phase::Idle {
            return false;
        }

        // the state lock is held until `begin`, so the first tick sees its epoch
        let epoch = state.epoch + 1;
        let cancel = CancellationToken::new();
        let shared = Arc::clone(&self.shared);
        let token = cancel.clone();
        let handle = self
            .shared
            .runtime
            .spawn(async move { shared.run_loop(epoch, token).await });

        let file_sink = options.persist_path.map(|path| {
            FilePersistenceSink::new(path).with_indent(self.shared.config.pretty_indent)
        });
        state.begin(file_sink);
        self.shared.phase_changed(Phase::Idle, Phase::Running);
        drop(state);
        *worker = Some(Worker { cancel, handle });
        drop(worker);

        info!("Telemetry session {} started", epoch);
        true
    }

    /// Running to Paused. The loop keeps ticking but produces nothing.
    pub fn pause(&self) -> bool {
        self.transition(Phase::Running, Phase::Paused)
    }

    /// Paused to Running.
    pub fn resume(&self) -> bool {
        self.transition(Phase::Paused, Phase::Running)
    }

    /// Ends the session and clears counters, clock and last sample.
    ///
    /// Waits for the loop task to observe cancellation, for at most one tick
    /// interval. A sink write already in flight is not interrupted; whatever it
    /// does after the reset cannot touch the cleared state. Idempotent on an
    /// idle controller.
    pub async fn reset(&self) {
        let worker = {
            let mut worker = self.worker.lock();
            let mut state = self.shared.state.lock();
            let from = state.phase;
            if from == Phase::Idle {
                return;
            }
            state.clear();
            self.shared.phase_changed(from, Phase::Idle);
            drop(state);
            worker.take()
        };

        let Some(Worker { cancel, handle }) = worker else {
            return;
        };
        cancel.cancel();
        match timeout(self.shared.config.tick_interval(), handle).await {
            Ok(Ok(())) => info!("Telemetry session stopped"),
            Ok(Err(err)) => error!("Generation loop ended abnormally: {}", err),
            Err(_) => warn!(
                "Generation loop still busy after {:?}; continuing reset",
                self.shared.config.tick_interval()
            ),
        }
    }

    /// Opens a network link in the background.
    ///
    /// Generation is never blocked by the attempt. On success the new link
    /// replaces any previous one; on failure the current link is left alone.
    /// Both outcomes are reported as [`TelemetryEvent::ConnectionChanged`].
    /// The handle resolves to whether the link was established.
    pub fn connect_network(&self, target: NetworkTarget) -> JoinHandle<bool> {
        let shared = Arc::clone(&self.shared);
        self.shared.runtime.spawn(async move {
            match NetworkSink::connect(&target, shared.reporter.clone()).await {
                Ok(sink) => {
                    *shared.network.write() = Some(Arc::new(sink));
                    true
                }
                Err(_) => false,
            }
        })
    }

    /// Installs an already established link, replacing any previous one.
    pub fn attach_network(&self, sink: NetworkSink) {
        *self.shared.network.write() = Some(Arc::new(sink));
    }

    /// Closes and removes the current link, if any.
    pub async fn disconnect_network(&self) {
        let sink = self.shared.network.write().take();
        if let Some(sink) = sink {
            sink.close().await;
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<TelemetryEvent> {
        self.shared.reporter.subscribe()
    }

    /// Reporter shared with this controller's sinks
    pub fn reporter(&self) -> EventReporter {
        self.shared.reporter.clone()
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.lock().phase
    }

    pub fn sample_count(&self) -> u64 {
        self.shared.state.lock().sample_count
    }

    pub fn elapsed(&self) -> ElapsedTime {
        self.shared.state.lock().clock.elapsed()
    }

    pub fn last_sample(&self) -> Option<TelemetrySample> {
        self.shared.state.lock().last_sample.clone()
    }

    pub fn network_connected(&self) -> bool {
        self.shared
            .network
            .read()
            .as_ref()
            .is_some_and(|sink| sink.is_connected())
    }

    /// Consistent view of the whole session, taken under one lock.
    pub fn snapshot(&self) -> SessionSnapshot {
        let connected = self.network_connected();
        self.shared.state.lock().snapshot(connected)
    }

    fn transition(&self, from: Phase, to: Phase) -> bool {
        let mut state = self.shared.state.lock();
        if state.phase != from {
            return false;
        }
        state.phase = to;
        self.shared.phase_changed(from, to);
        true
    }
}

impl Drop for StreamController {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.get_mut().take() {
            worker.cancel.cancel();
        }
    }
}

impl core::fmt::Debug for StreamController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StreamController")
            .field("config", &self.shared.config)
            .field("phase", &self.phase())
            .field("sample_count", &self.sample_count())
            .finish_non_exhaustive()
    }
}

impl Shared {
    async fn run_loop(&self, epoch: u64, cancel: CancellationToken) {
        let mut ticker = interval(self.config.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            select! {
                biased;
                () = cancel.cancelled() => break,
                _ = ticker.tick() => self.tick(epoch).await,
            }
        }
        debug!("Generation loop for session {} exited", epoch);
    }

    async fn tick(&self, epoch: u64) {
        let output = {
            let mut state = self.state.lock();
            if !state.accepts(epoch) {
                return;
            }
            state.record(self.generator.generate())
        };
        let TickOutput { update, file_sink } = output;
        let sample = update.current.clone();

        self.display.show(update);

        if let Some(sink) = file_sink {
            if let Err(err) = sink.append(&sample).await {
                error!("{}", err);
                self.reporter.report(TelemetryEvent::PersistenceFailed {
                    path: sink.path().to_path_buf(),
                    reason: err.to_string(),
                });
            }
        }

        let network = self.network.read().clone();
        if let Some(sink) = network {
            sink.send(&sample).await;
        }
    }

    fn phase_changed(&self, from: Phase, to: Phase) {
        self.reporter.report(TelemetryEvent::PhaseChanged { from, to });
    }
}
