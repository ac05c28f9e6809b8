// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the imusim workspace.
//!
//! Designed for use in development and testing only, not for production code.
//!
//! # Key Types
//!
//! - [`ScriptedTransport`]: in-memory [`MessageTransport`](imusim_sink::MessageTransport)
//!   that records messages and fails on demand
//! - [`RecordingDisplay`]: display callback that captures every update
//! - [`TempJsonPath`]: JSON file path inside a temp directory removed on drop
//! - [`fixtures`]: deterministic telemetry samples
//! - [`helpers`]: receive-with-timeout assertions for tokio channels

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod fixtures;
pub mod helpers;
pub mod recording_display;
pub mod scripted_transport;
pub mod temp_file;

pub use helpers::{assert_no_recv, recv_timeout};
pub use recording_display::RecordingDisplay;
pub use scripted_transport::{ScriptedTransport, SentMessages};
pub use temp_file::TempJsonPath;
