// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use imusim::prelude::*;
use imusim::read_samples;
use imusim_test_utils::{recv_timeout, RecordingDisplay, TempJsonPath};
use std::time::Duration;

#[tokio::test]
async fn test_full_session_renders_and_persists() -> anyhow::Result<()> {
    // Arrange
    let file = TempJsonPath::new("facade-session");
    let (display, mut rx) = RecordingDisplay::new();
    let config = ControllerConfig::default().with_tick_interval(Duration::from_millis(30));
    let controller = StreamController::new(config, display.callback())?;

    // Act
    controller.start(StartOptions::persist_to(file.path()));
    let first = recv_timeout(&mut rx, 2_000).await.expect("first update");
    let second = recv_timeout(&mut rx, 2_000).await.expect("second update");
    controller.pause();
    tokio::time::sleep(Duration::from_millis(100)).await;
    let snapshot = controller.snapshot();
    controller.reset().await;

    // Assert
    let first_text = first.to_string();
    assert!(first_text.starts_with("No previous data.\nTimestamp: "));
    assert!(first_text.ends_with("Generating data..."));
    assert!(second.to_string().starts_with("Timestamp: "));
    assert_eq!(second.status_lines()[1], "Data Generated: 2");

    assert_eq!(snapshot.phase, Phase::Paused);
    assert_eq!(snapshot.persist_path.as_deref(), Some(file.path()));
    let persisted = read_samples(file.path()).await?;
    assert_eq!(persisted.len() as u64, snapshot.sample_count);
    assert_eq!(persisted[0].timestamp, first.current.timestamp);

    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(controller.sample_count(), 0);

    Ok(())
}
