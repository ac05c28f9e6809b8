// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Script-form publisher: connect once, push until told to stop or broken.

use imusim_core::{CompactGenerator, SampleSource};
use imusim_error::{Result, TelemetryError};
use imusim_sink::{MessageTransport, WebSocketTransport};
use std::time::Duration;
use tokio::select;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

/// Sends one sample per interval over a single connection.
///
/// Unlike [`StreamController`](crate::StreamController) there is no recovery:
/// a failed connect or send ends the run. A link that was never opened is
/// never closed.
#[derive(Debug)]
pub struct OneShotPublisher<S> {
    url: String,
    interval: Duration,
    source: S,
}

impl OneShotPublisher<CompactGenerator> {
    /// Compact samples once per second.
    pub fn compact(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            interval: Duration::from_secs(1),
            source: CompactGenerator,
        }
    }
}

impl<S: SampleSource> OneShotPublisher<S> {
    /// # Errors
    /// Returns [`TelemetryError::Config`] for a zero interval.
    pub fn new(url: impl Into<String>, interval: Duration, source: S) -> Result<Self> {
        if interval.is_zero() {
            return Err(TelemetryError::config("publish interval must be positive"));
        }
        Ok(Self {
            url: url.into(),
            interval,
            source,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connects to the configured URL and publishes until `cancel` fires.
    ///
    /// # Errors
    /// Returns the connect error, or the first send error after closing the link.
    pub async fn run(self, cancel: CancellationToken) -> Result<u64> {
        let transport = WebSocketTransport::connect_url(&self.url).await?;
        info!("Connected to {}", self.url);
        self.run_with(transport, cancel).await
    }

    /// Publishes over an already open transport. Returns how many samples went out.
    ///
    /// # Errors
    /// Returns the first send error; the transport is closed either way.
    pub async fn run_with<T: MessageTransport>(
        mut self,
        mut transport: T,
        cancel: CancellationToken,
    ) -> Result<u64> {
        let mut ticker = interval(self.interval);
        let mut sent = 0u64;

        let outcome = loop {
            select! {
                biased;
                () = cancel.cancelled() => break Ok(sent),
                _ = ticker.tick() => {
                    let sample = self.source.next_sample();
                    let message = match serde_json::to_string(&sample) {
                        Ok(message) => message,
                        Err(err) => break Err(err.into()),
                    };
                    if let Err(err) = transport.send_text(message.clone()).await {
                        break Err(err);
                    }
                    sent += 1;
                    debug!("Sent: {}", message);
                }
            }
        };

        if let Err(err) = transport.close().await {
            warn!("Closing {} failed: {}", self.url, err);
        }
        if let Err(err) = &outcome {
            error!("Publishing to {} stopped: {}", self.url, err);
        }
        outcome
    }
}
