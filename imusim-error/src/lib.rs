// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the imusim telemetry simulator
//!
//! Every fallible operation in the workspace reports a [`TelemetryError`].
//! Sinks never let these escape a generation tick: the stream controller turns
//! them into status events instead.
//!
//! # Examples
//!
//! ```
//! use imusim_error::{TelemetryError, Result};
//!
//! fn open_link() -> Result<()> {
//!     Err(TelemetryError::connect("ws://localhost:8000/ws/data/", "connection refused"))
//! }
//!
//! assert!(open_link().unwrap_err().is_recoverable());
//! ```

use std::path::PathBuf;

/// Root error type for all imusim operations
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Writing the JSON array file failed
    ///
    /// Disk full, missing directory or permission problems end up here.
    /// A corrupt file is *not* reported through this variant: it is discarded.
    #[error("Failed to persist telemetry to {}: {source}", .path.display())]
    Persistence {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A sample could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Opening the WebSocket link failed
    #[error("Failed to connect to {url}: {reason}")]
    Connect {
        /// Endpoint that was dialed
        url: String,
        /// Human readable cause
        reason: String,
    },

    /// Sending a message over an established link failed
    #[error("Failed to send telemetry: {reason}")]
    Send {
        /// Human readable cause
        reason: String,
    },

    /// A configuration value is out of its accepted range or unparsable
    #[error("Invalid configuration: {reason}")]
    Config {
        /// What was wrong with the configuration
        reason: String,
    },

    /// A sample field lies outside its documented range
    #[error("Sample field {field} out of range: {value}")]
    InvalidSample {
        /// Dotted field name, e.g. `gyroscope.x`
        field: String,
        /// Offending value
        value: f64,
    },
}

impl TelemetryError {
    /// Create a persistence error for the given file
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Create a connect error for the given endpoint
    pub fn connect(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Connect {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a send error
    pub fn send(reason: impl ToString) -> Self {
        Self::Send {
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create an out-of-range sample error
    pub fn invalid_sample(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidSample {
            field: field.into(),
            value,
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors leave the generation loop running; the caller may
    /// retry the failed operation (reconnect, pick another file).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Persistence { .. } | Self::Connect { .. } | Self::Send { .. }
        )
    }

    /// Check if this error indicates a permanent failure
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::Serialization(_) | Self::Config { .. } | Self::InvalidSample { .. }
        )
    }
}

/// Specialized Result type for imusim operations
pub type Result<T> = std::result::Result<T, TelemetryError>;
