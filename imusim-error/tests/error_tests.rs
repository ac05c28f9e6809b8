// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use imusim_error::TelemetryError;
use std::error::Error;
use std::io;

#[test]
fn test_error_display() {
    let err = TelemetryError::connect("ws://localhost:8000/ws/data/", "connection refused");
    assert_eq!(
        err.to_string(),
        "Failed to connect to ws://localhost:8000/ws/data/: connection refused"
    );

    let err = TelemetryError::persistence(
        "/tmp/out.json",
        io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    );
    assert_eq!(
        err.to_string(),
        "Failed to persist telemetry to /tmp/out.json: denied"
    );

    let err = TelemetryError::invalid_sample("gyroscope.x", 300.0);
    assert_eq!(err.to_string(), "Sample field gyroscope.x out of range: 300");
}

#[test]
fn test_persistence_error_keeps_source() {
    let err = TelemetryError::persistence("out.json", io::Error::other("disk full"));

    let source = err.source().expect("io source");
    assert_eq!(source.to_string(), "disk full");
}

#[test]
fn test_serialization_error_from_serde_json() {
    let parse_failure = serde_json::from_str::<Vec<u8>>("not-json").unwrap_err();

    let err: TelemetryError = parse_failure.into();

    assert!(matches!(err, TelemetryError::Serialization(_)));
}

#[test]
fn test_is_recoverable() {
    assert!(TelemetryError::connect("ws://h:1/", "refused").is_recoverable());
    assert!(TelemetryError::send("broken pipe").is_recoverable());
    assert!(TelemetryError::persistence("x.json", io::Error::other("full")).is_recoverable());
    assert!(!TelemetryError::config("tick_interval_ms must be positive").is_recoverable());
}

#[test]
fn test_is_permanent() {
    assert!(TelemetryError::config("bad").is_permanent());
    assert!(TelemetryError::invalid_sample("accelerometer.z", 9.0).is_permanent());
    assert!(!TelemetryError::send("broken pipe").is_permanent());
}
