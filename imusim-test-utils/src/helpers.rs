// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

/// Receives the next item or returns `None` after `timeout_ms`.
pub async fn recv_timeout<T>(rx: &mut UnboundedReceiver<T>, timeout_ms: u64) -> Option<T> {
    timeout(Duration::from_millis(timeout_ms), rx.recv())
        .await
        .ok()
        .flatten()
}

/// Panics if anything arrives within `timeout_ms`.
pub async fn assert_no_recv<T: core::fmt::Debug>(rx: &mut UnboundedReceiver<T>, timeout_ms: u64) {
    if let Ok(Some(item)) = timeout(Duration::from_millis(timeout_ms), rx.recv()).await {
        panic!("Unexpected item received, expected no output: {item:?}");
    }
}
