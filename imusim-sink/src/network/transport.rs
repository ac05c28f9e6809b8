// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use imusim_error::Result;

/// A bidirectional text-message link owned by a [`NetworkSink`](super::NetworkSink).
#[async_trait]
pub trait MessageTransport: Send {
    /// Sends one complete text message.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Send`](imusim_error::TelemetryError::Send) on I/O failure.
    async fn send_text(&mut self, text: String) -> Result<()>;

    /// Closes the link.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Send`](imusim_error::TelemetryError::Send) if the close handshake fails.
    async fn close(&mut self) -> Result<()>;
}
