// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use imusim_error::{Result, TelemetryError};
use serde::{Deserialize, Serialize};

/// WebSocket endpoint the network sink dials.
///
/// Loadable from TOML:
///
/// ```toml
/// host = "telemetry.local"
/// port = 8443
/// path = "/ws/data/"
/// use_tls = true
/// accept_invalid_certs = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkTarget {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub use_tls: bool,
    /// Skip certificate and hostname validation for `wss://`
    pub accept_invalid_certs: bool,
}

impl Default for NetworkTarget {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
            path: "/ws/data/".to_string(),
            use_tls: false,
            accept_invalid_certs: false,
        }
    }
}

impl NetworkTarget {
    pub fn new(host: impl Into<String>, port: u16, path: impl Into<String>, use_tls: bool) -> Self {
        Self {
            host: host.into(),
            port,
            path: path.into(),
            use_tls,
            accept_invalid_certs: false,
        }
    }

    #[must_use]
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// `ws://host:port/path` or `wss://host:port/path`
    pub fn url(&self) -> String {
        let scheme = if self.use_tls { "wss" } else { "ws" };
        let separator = if self.path.starts_with('/') { "" } else { "/" };
        format!(
            "{scheme}://{}:{}{separator}{}",
            self.host, self.port, self.path
        )
    }

    /// # Errors
    /// Returns [`TelemetryError::Config`] if the document does not describe a target.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|err| TelemetryError::config(err.to_string()))
    }
}
