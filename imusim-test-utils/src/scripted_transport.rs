// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use imusim_error::{Result, TelemetryError};
use imusim_sink::MessageTransport;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Shared view of the messages a [`ScriptedTransport`] accepted.
#[derive(Debug, Clone, Default)]
pub struct SentMessages {
    messages: Arc<Mutex<Vec<String>>>,
    attempts: Arc<Mutex<usize>>,
    closed: Arc<Mutex<bool>>,
}

impl SentMessages {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `send_text` calls, successful or not
    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock()
    }
}

/// In-memory transport that records messages and breaks on a chosen send.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    sent: SentMessages,
    fail_from: Option<usize>,
    send_delay: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new() -> (Self, SentMessages) {
        let transport = Self::default();
        let sent = transport.sent.clone();
        (transport, sent)
    }

    /// Makes the `attempt`-th send (1-based) and every later one fail, like a
    /// link whose peer went away.
    #[must_use]
    pub fn failing_from(mut self, attempt: usize) -> Self {
        self.fail_from = Some(attempt);
        self
    }

    /// Makes every send take `delay` before it completes, like a stalled peer.
    #[must_use]
    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = Some(delay);
        self
    }
}

#[async_trait]
impl MessageTransport for ScriptedTransport {
    async fn send_text(&mut self, text: String) -> Result<()> {
        let attempt = {
            let mut attempts = self.sent.attempts.lock();
            *attempts += 1;
            *attempts
        };
        if let Some(delay) = self.send_delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_from.is_some_and(|from| attempt >= from) {
            return Err(TelemetryError::send("broken pipe"));
        }
        self.sent.messages.lock().push(text);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        *self.sent.closed.lock() = true;
        Ok(())
    }
}
