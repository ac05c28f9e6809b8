// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # imusim
//!
//! Synthetic 9-axis IMU telemetry for exercising downstream consumers without
//! hardware.
//!
//! ## Overview
//!
//! A [`StreamController`] runs one generation loop per session. Each tick
//! while running it produces a [`TelemetrySample`] and fans it out to:
//!
//! - a caller-supplied display callback, receiving a [`DisplayUpdate`]
//! - an optional pretty-printed JSON array file ([`FilePersistenceSink`])
//! - an optional WebSocket link ([`NetworkSink`])
//!
//! Sink failures never stop generation. They surface as [`TelemetryEvent`]s
//! on the controller's event channel.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imusim::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> imusim::Result<()> {
//!     let controller = StreamController::new(ControllerConfig::default(), |update: DisplayUpdate| {
//!         println!("{update}");
//!     })?;
//!
//!     controller.start(StartOptions::persist_to("telemetry.json"));
//!     controller.connect_network(NetworkTarget::default());
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     controller.reset().await;
//!     Ok(())
//! }
//! ```

pub use imusim_core::{
    round_to, Axes, AxisRange, CompactGenerator, CompactSample, DisplayUpdate, ElapsedClock,
    ElapsedTime, EventReporter, Phase, SampleGenerator, SampleSource, SessionSnapshot,
    TelemetryEvent, TelemetrySample,
};
pub use imusim_error::{Result, TelemetryError};
pub use imusim_sink::{
    read_samples, FilePersistenceSink, MessageTransport, NetworkSink, NetworkTarget,
    WebSocketTransport,
};
pub use imusim_stream::{
    CancellationToken, ControllerConfig, DisplaySink, OneShotPublisher, StartOptions,
    StreamController,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use imusim_core::{DisplayUpdate, Phase, TelemetryEvent, TelemetrySample};
    pub use imusim_error::TelemetryError;
    pub use imusim_sink::NetworkTarget;
    pub use imusim_stream::{ControllerConfig, StartOptions, StreamController};
}
