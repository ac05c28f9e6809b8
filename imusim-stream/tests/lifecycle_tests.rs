// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use imusim_core::{ElapsedTime, Phase, TelemetryEvent};
use imusim_error::TelemetryError;
use imusim_sink::NetworkSink;
use imusim_stream::{ControllerConfig, StartOptions, StreamController};
use imusim_test_utils::{assert_no_recv, recv_timeout, RecordingDisplay, ScriptedTransport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::{sleep, Instant};

fn controller(tick_ms: u64) -> anyhow::Result<(StreamController, RecordingDisplay)> {
    let (display, _rx) = RecordingDisplay::new();
    let config = ControllerConfig::default().with_tick_interval(Duration::from_millis(tick_ms));
    let controller = StreamController::new(config, display.callback())?;
    Ok((controller, display))
}

#[tokio::test(start_paused = true)]
async fn test_running_session_counts_one_sample_per_tick() -> anyhow::Result<()> {
    // Arrange
    let (controller, display) = controller(500)?;

    // Act
    assert!(controller.start(StartOptions::default()));
    sleep(Duration::from_millis(2_500)).await;

    // Assert
    let count = controller.sample_count();
    assert!((4..=6).contains(&count), "count was {count}");
    assert_eq!(display.len() as u64, count);
    assert_eq!(controller.phase(), Phase::Running);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_paused_window_produces_nothing() -> anyhow::Result<()> {
    // Arrange
    let (controller, _display) = controller(500)?;

    // Act
    controller.start(StartOptions::default());
    assert!(controller.pause());
    sleep(Duration::from_secs(2)).await;
    let while_paused = controller.sample_count();
    assert!(controller.resume());
    sleep(Duration::from_secs(1)).await;

    // Assert
    assert_eq!(while_paused, 0);
    let count = controller.sample_count();
    assert!((1..=3).contains(&count), "count was {count}");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_count_is_frozen_while_paused_and_resumes_at_same_cadence() -> anyhow::Result<()> {
    // Arrange
    let (controller, _display) = controller(500)?;
    controller.start(StartOptions::default());
    sleep(Duration::from_millis(1_200)).await;

    // Act
    controller.pause();
    let at_pause = controller.sample_count();
    for _ in 0..6 {
        sleep(Duration::from_millis(500)).await;
        assert_eq!(controller.sample_count(), at_pause);
    }
    controller.resume();
    sleep(Duration::from_millis(1_200)).await;

    // Assert
    assert_eq!(at_pause, 3);
    let resumed = controller.sample_count() - at_pause;
    assert!((2..=3).contains(&resumed), "resumed window produced {resumed}");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_second_start_never_spawns_another_loop() -> anyhow::Result<()> {
    // Arrange
    let (controller, _display) = controller(500)?;

    // Act
    let first = controller.start(StartOptions::default());
    let second = controller.start(StartOptions::default());
    sleep(Duration::from_millis(1_200)).await;
    let third = controller.start(StartOptions::default());

    // Assert
    assert!(first);
    assert!(!second);
    assert!(!third);
    assert_eq!(controller.sample_count(), 3);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_start_while_paused_is_a_no_op() -> anyhow::Result<()> {
    // Arrange
    let (controller, _display) = controller(500)?;
    controller.start(StartOptions::default());
    controller.pause();

    // Act
    let started = controller.start(StartOptions::default());

    // Assert
    assert!(!started);
    assert_eq!(controller.phase(), Phase::Paused);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reset_from_running_clears_everything() -> anyhow::Result<()> {
    // Arrange
    let (controller, display) = controller(500)?;
    controller.start(StartOptions::default());
    sleep(Duration::from_millis(1_200)).await;
    assert!(controller.last_sample().is_some());

    // Act
    controller.reset().await;
    let shown = display.len();
    sleep(Duration::from_secs(2)).await;

    // Assert
    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(controller.sample_count(), 0);
    assert_eq!(controller.last_sample(), None);
    assert_eq!(controller.elapsed(), ElapsedTime::ZERO);
    assert_eq!(display.len(), shown);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reset_from_paused_clears_everything() -> anyhow::Result<()> {
    // Arrange
    let (controller, _display) = controller(500)?;
    controller.start(StartOptions::default());
    sleep(Duration::from_millis(700)).await;
    controller.pause();

    // Act
    controller.reset().await;

    // Assert
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert_eq!(snapshot.sample_count, 0);
    assert_eq!(snapshot.last_sample, None);
    assert_eq!(snapshot.elapsed, ElapsedTime::ZERO);
    assert!(!controller.resume());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reset_on_idle_controller_is_idempotent() -> anyhow::Result<()> {
    // Arrange
    let (controller, _display) = controller(500)?;
    let mut events = controller.subscribe_events();

    // Act
    controller.reset().await;
    controller.reset().await;

    // Assert
    assert_eq!(controller.phase(), Phase::Idle);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_reset_begins_a_fresh_session() -> anyhow::Result<()> {
    // Arrange
    let (controller, display) = controller(500)?;
    controller.start(StartOptions::default());
    sleep(Duration::from_millis(1_200)).await;
    controller.reset().await;
    let before_restart = display.len();

    // Act
    assert!(controller.start(StartOptions::default()));
    sleep(Duration::from_millis(200)).await;

    // Assert
    assert_eq!(controller.sample_count(), 1);
    let updates = display.updates();
    let first_of_new_session = &updates[before_restart];
    assert_eq!(first_of_new_session.count, 1);
    assert_eq!(first_of_new_session.previous, None);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_display_receives_previous_and_current_samples() -> anyhow::Result<()> {
    // Arrange
    let (display, mut rx) = RecordingDisplay::new();
    let config = ControllerConfig::default().with_tick_interval(Duration::from_millis(500));
    let controller = StreamController::new(config, display.callback())?;

    // Act
    controller.start(StartOptions::default());
    let first = recv_timeout(&mut rx, 1_000).await.expect("first update");
    let second = recv_timeout(&mut rx, 1_000).await.expect("second update");

    // Assert
    assert_eq!(first.previous, None);
    assert_eq!(first.count, 1);
    assert_eq!(second.previous.as_ref(), Some(&first.current));
    assert_eq!(second.count, 2);
    assert!(second.elapsed >= first.elapsed);
    assert_eq!(controller.last_sample(), Some(second.current.clone()));
    second.current.validate()?;

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_elapsed_keeps_advancing_while_paused() -> anyhow::Result<()> {
    // Arrange
    let (controller, _display) = controller(500)?;
    controller.start(StartOptions::default());
    sleep(Duration::from_millis(300)).await;
    controller.pause();

    // Act
    let t1 = controller.elapsed();
    sleep(Duration::from_secs(2)).await;
    let t2 = controller.elapsed();

    // Assert
    assert!(t2 > t1);
    assert!(t2.as_duration() - t1.as_duration() >= Duration::from_secs(2));
    assert!(t2.to_string().starts_with("00:00:02."));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_phase_changes_are_reported_in_order() -> anyhow::Result<()> {
    // Arrange
    let (controller, _display) = controller(500)?;
    let mut events = controller.subscribe_events();

    // Act
    controller.start(StartOptions::default());
    controller.pause();
    controller.resume();
    controller.reset().await;

    // Assert
    let expected = [
        (Phase::Idle, Phase::Running),
        (Phase::Running, Phase::Paused),
        (Phase::Paused, Phase::Running),
        (Phase::Running, Phase::Idle),
    ];
    for (from, to) in expected {
        assert_eq!(events.try_recv()?, TelemetryEvent::PhaseChanged { from, to });
    }
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_pause_and_resume_outside_their_phase_are_no_ops() -> anyhow::Result<()> {
    // Arrange
    let (controller, _display) = controller(500)?;

    // Act
    let paused_idle = controller.pause();
    let resumed_idle = controller.resume();
    controller.start(StartOptions::default());
    let resumed_running = controller.resume();

    // Assert
    assert!(!paused_idle);
    assert!(!resumed_idle);
    assert!(!resumed_running);
    assert_eq!(controller.phase(), Phase::Running);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reset_returns_within_one_tick_while_a_sink_is_stalled() -> anyhow::Result<()> {
    // Arrange
    let (display, mut rx) = RecordingDisplay::new();
    let config = ControllerConfig::default().with_tick_interval(Duration::from_millis(500));
    let controller = StreamController::new(config, display.callback())?;
    let (transport, sent) = ScriptedTransport::new();
    controller.attach_network(NetworkSink::new(
        Box::new(transport.with_send_delay(Duration::from_secs(10))),
        "ws://stalled/",
        controller.reporter(),
    ));
    controller.start(StartOptions::default());
    recv_timeout(&mut rx, 1_000).await.expect("first update");

    // Act
    let begun = Instant::now();
    controller.reset().await;
    let waited = begun.elapsed();

    // Assert
    assert!(waited <= controller.config().tick_interval(), "reset waited {waited:?}");
    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(controller.sample_count(), 0);
    assert_eq!(controller.last_sample(), None);

    assert_no_recv(&mut rx, 15_000).await;
    assert_eq!(controller.sample_count(), 0);
    assert_eq!(sent.attempts(), 1);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_start_from_a_thread_outside_the_runtime() -> anyhow::Result<()> {
    // Arrange
    let (display, mut rx) = RecordingDisplay::new();
    let config = ControllerConfig::default().with_tick_interval(Duration::from_millis(50));
    let controller = Arc::new(StreamController::new(config, display.callback())?);
    let ui = Arc::clone(&controller);

    // Act
    let started = std::thread::spawn(move || ui.start(StartOptions::default()))
        .join()
        .expect("ui thread");
    let first = recv_timeout(&mut rx, 2_000).await.expect("first update");
    let second = recv_timeout(&mut rx, 2_000).await.expect("second update");

    // Assert
    assert!(started);
    assert_eq!(first.count, 1);
    assert_eq!(second.count, 2);
    assert_eq!(controller.phase(), Phase::Running);

    // Cleanup
    controller.reset().await;

    Ok(())
}

#[test]
fn test_controller_driven_entirely_from_a_plain_thread() -> anyhow::Result<()> {
    // Arrange
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let (display, mut rx) = RecordingDisplay::new();
    let config = ControllerConfig::default().with_tick_interval(Duration::from_millis(50));
    let controller = StreamController::with_runtime(config, display.callback(), runtime.handle().clone())?;

    // Act
    let started = controller.start(StartOptions::default());
    let update = runtime.block_on(recv_timeout(&mut rx, 2_000));
    controller.pause();
    runtime.block_on(controller.reset());

    // Assert
    assert!(started);
    assert_eq!(update.map(|u| u.count), Some(1));
    assert_eq!(controller.phase(), Phase::Idle);
    assert!(controller.start(StartOptions::default()));
    runtime.block_on(controller.reset());

    Ok(())
}

#[test]
fn test_new_outside_a_runtime_is_a_config_error() {
    // Arrange
    let (display, _rx) = RecordingDisplay::new();

    // Act
    let result = StreamController::new(ControllerConfig::default(), display.callback());

    // Assert
    assert!(matches!(result, Err(TelemetryError::Config { .. })));
}
