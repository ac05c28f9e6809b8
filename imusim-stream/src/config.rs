// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Controller settings and per-session start options.

use imusim_core::{DEFAULT_PRECISION, MAX_PRECISION};
use imusim_error::{Result, TelemetryError};
use imusim_sink::DEFAULT_INDENT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings fixed for the lifetime of a [`StreamController`](crate::StreamController).
///
/// Every field has a default, so a TOML document only needs the keys it changes:
///
/// ```toml
/// tick_interval_ms = 250
/// precision = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Cadence of the generation loop; also bounds how long `reset` waits
    pub tick_interval_ms: u64,
    /// Decimal places kept for every axis value
    pub precision: u32,
    /// Buffered status events per subscriber before it starts lagging
    pub event_capacity: usize,
    /// Spaces per indentation level in the JSON log
    pub pretty_indent: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            precision: DEFAULT_PRECISION,
            event_capacity: 64,
            pretty_indent: DEFAULT_INDENT,
        }
    }
}

impl ControllerConfig {
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// # Errors
    /// Returns [`TelemetryError::Config`] for a zero tick interval, a precision
    /// above nine decimals or a zero event capacity.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(TelemetryError::config("tick_interval_ms must be positive"));
        }
        if self.precision > MAX_PRECISION {
            return Err(TelemetryError::config(format!(
                "precision must be at most {MAX_PRECISION}, got {}",
                self.precision
            )));
        }
        if self.event_capacity == 0 {
            return Err(TelemetryError::config("event_capacity must be positive"));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Config`] if the document is malformed or invalid.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|err| TelemetryError::config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Config`] if the file cannot be read or is invalid.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| {
            TelemetryError::config(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }
}

/// What a new session writes besides the display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartOptions {
    pub persist_path: Option<PathBuf>,
}

impl StartOptions {
    /// Persist every sample to the JSON array file at `path`.
    pub fn persist_to(path: impl Into<PathBuf>) -> Self {
        Self {
            persist_path: Some(path.into()),
        }
    }

    /// Mirrors a "save to file?" prompt: persistence needs both the flag and a path.
    pub fn from_flags(persist_to_file: bool, file_path: Option<PathBuf>) -> Self {
        Self {
            persist_path: file_path.filter(|_| persist_to_file),
        }
    }
}
