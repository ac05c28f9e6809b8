// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::transport::MessageTransport;
use crate::target::NetworkTarget;
use async_trait::async_trait;
use futures::SinkExt;
use imusim_error::{Result, TelemetryError};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async_tls_with_config, Connector, MaybeTlsStream, WebSocketStream};

/// WebSocket client link, plain (`ws://`) or TLS (`wss://`).
pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketTransport {
    /// Connects to the endpoint described by `target`.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Connect`] if the TLS setup or the handshake fails.
    pub async fn connect(target: &NetworkTarget) -> Result<Self> {
        let url = target.url();
        let connector = Self::connector_for(target)?;
        Self::open(&url, connector).await
    }

    /// TLS connector for `target`: one that skips certificate and hostname
    /// checks when `wss` is used with `accept_invalid_certs`, otherwise `None`
    /// for the library default.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Connect`] if the TLS backend cannot be built.
    pub fn connector_for(target: &NetworkTarget) -> Result<Option<Connector>> {
        if !(target.use_tls && target.accept_invalid_certs) {
            return Ok(None);
        }
        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .build()
            .map_err(|err| TelemetryError::connect(target.url(), err))?;
        Ok(Some(Connector::NativeTls(tls)))
    }

    /// Connects to a full `ws://` or `wss://` URL with default TLS validation.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Connect`] if the handshake fails.
    pub async fn connect_url(url: &str) -> Result<Self> {
        Self::open(url, None).await
    }

    async fn open(url: &str, connector: Option<Connector>) -> Result<Self> {
        let (stream, _response) = connect_async_tls_with_config(url, None, false, connector)
            .await
            .map_err(|err| TelemetryError::connect(url, err))?;
        Ok(Self { stream })
    }
}

#[async_trait]
impl MessageTransport for WebSocketTransport {
    async fn send_text(&mut self, text: String) -> Result<()> {
        self.stream
            .send(Message::text(text))
            .await
            .map_err(TelemetryError::send)
    }

    async fn close(&mut self) -> Result<()> {
        self.stream.close(None).await.map_err(TelemetryError::send)
    }
}
