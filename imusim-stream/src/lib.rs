// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Telemetry stream controller.
//!
//! [`StreamController`] owns one background generation loop and its
//! Idle/Running/Paused lifecycle. Every tick while running it generates a
//! sample, hands it to the [`DisplaySink`], then to the file and network sinks
//! when those are enabled. Sink failures are reported as
//! [`TelemetryEvent`](imusim_core::TelemetryEvent)s and never stop the loop.
//!
//! ```text
//!  caller ── start/pause/resume/reset ──▶ StreamController
//!                                              │ spawns
//!                                              ▼
//!                                      generation loop (tick)
//!                                   ┌──────────┼───────────┐
//!                                   ▼          ▼           ▼
//!                               display    JSON file   WebSocket
//! ```
//!
//! [`OneShotPublisher`] is the short-lived script form: one connection, one
//! sample per interval, any failure ends the run.

#[macro_use]
mod logging;

pub mod config;
pub mod controller;
pub mod display_sink;
pub mod one_shot;
mod session;

pub use config::{ControllerConfig, StartOptions};
pub use controller::StreamController;
pub use display_sink::DisplaySink;
pub use one_shot::OneShotPublisher;
pub use tokio_util::sync::CancellationToken;
