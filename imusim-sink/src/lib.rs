// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Telemetry sinks.
//!
//! - [`FilePersistenceSink`]: keeps every sample in one JSON array file
//! - [`NetworkSink`]: pushes each sample as one text message over a
//!   [`MessageTransport`], normally a [`WebSocketTransport`]
//!
//! Sinks report failures through [`imusim_core::EventReporter`] or their
//! return values; none of them panics or blocks the generation loop on error.

#[macro_use]
mod logging;

pub mod file;
pub mod network;
pub mod target;

pub use file::{read_samples, FilePersistenceSink, DEFAULT_INDENT};
pub use network::{MessageTransport, NetworkSink, WebSocketTransport};
pub use target::NetworkTarget;
