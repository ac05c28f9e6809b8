// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fire-and-forget telemetry push over a message link.

mod transport;
mod websocket;

pub use transport::MessageTransport;
pub use websocket::WebSocketTransport;

use crate::target::NetworkTarget;
use imusim_core::{EventReporter, TelemetryEvent, TelemetrySample};
use imusim_error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// Sends every sample as one JSON text message over an established link.
///
/// Send failures never escape [`send`](Self::send): the sink flips to
/// disconnected, reports a [`TelemetryEvent::ConnectionChanged`] and keeps
/// accepting samples. There is no automatic reconnect.
pub struct NetworkSink {
    transport: Mutex<Box<dyn MessageTransport>>,
    connected: AtomicBool,
    reporter: EventReporter,
    endpoint: String,
}

impl NetworkSink {
    /// Wraps an already established transport. The sink starts connected.
    pub fn new(
        transport: Box<dyn MessageTransport>,
        endpoint: impl Into<String>,
        reporter: EventReporter,
    ) -> Self {
        Self {
            transport: Mutex::new(transport),
            connected: AtomicBool::new(true),
            reporter,
            endpoint: endpoint.into(),
        }
    }

    /// Opens a WebSocket link to `target` and reports the outcome.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Connect`](imusim_error::TelemetryError::Connect)
    /// when the handshake fails; the failure is reported as a disconnected
    /// status with the error text as reason.
    pub async fn connect(target: &NetworkTarget, reporter: EventReporter) -> Result<Self> {
        let endpoint = target.url();
        match WebSocketTransport::connect(target).await {
            Ok(transport) => {
                info!("Connected to {}", endpoint);
                reporter.report(TelemetryEvent::ConnectionChanged {
                    connected: true,
                    reason: None,
                });
                Ok(Self::new(Box::new(transport), endpoint, reporter))
            }
            Err(err) => {
                warn!("{}", err);
                reporter.report(TelemetryEvent::ConnectionChanged {
                    connected: false,
                    reason: Some(err.to_string()),
                });
                Err(err)
            }
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Sends `sample` as a single text message. Returns whether it went out.
    pub async fn send(&self, sample: &TelemetrySample) -> bool {
        let message = match sample.to_json() {
            Ok(message) => message,
            Err(err) => {
                error!("Dropping sample for {}: {}", self.endpoint, err);
                return false;
            }
        };

        let outcome = self.transport.lock().await.send_text(message).await;
        match outcome {
            Ok(()) => true,
            Err(err) => {
                self.mark_disconnected(err.to_string());
                false
            }
        }
    }

    /// Closes the underlying link and marks the sink disconnected.
    pub async fn close(&self) {
        let outcome = self.transport.lock().await.close().await;
        let reason = match outcome {
            Ok(()) => "closed".to_string(),
            Err(err) => err.to_string(),
        };
        self.mark_disconnected(reason);
    }

    fn mark_disconnected(&self, reason: String) {
        if self.connected.swap(false, Ordering::AcqRel) {
            warn!("Link to {} lost: {}", self.endpoint, reason);
            self.reporter.report(TelemetryEvent::ConnectionChanged {
                connected: false,
                reason: Some(reason),
            });
        }
    }
}

impl core::fmt::Debug for NetworkSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NetworkSink")
            .field("endpoint", &self.endpoint)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}
