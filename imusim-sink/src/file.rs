// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Durable JSON array log.
//!
//! Every append reads the whole file, parses it as a JSON array, pushes the new
//! sample and rewrites the file. Content that does not parse as an array is
//! discarded and the log restarts from an empty array. Cost is linear in the
//! array length and the file must have a single writer.

use imusim_core::TelemetrySample;
use imusim_error::{Result, TelemetryError};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Spaces per indentation level in the written file
pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePersistenceSink {
    path: PathBuf,
    indent: usize,
}

impl FilePersistenceSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            indent: DEFAULT_INDENT,
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `sample` to the array stored in the target file.
    ///
    /// Creates the file with a one-element array if it does not exist. Returns
    /// the number of entries the file holds afterwards.
    ///
    /// # Errors
    /// Returns [`TelemetryError::Persistence`] if the existing file cannot be
    /// read or the new contents cannot be written.
    pub async fn append(&self, sample: &TelemetrySample) -> Result<usize> {
        let mut entries = self.load_entries().await?;
        entries.push(serde_json::to_value(sample)?);

        let contents = self.encode(&entries)?;
        self.replace_contents(&contents).await?;

        Ok(entries.len())
    }

    async fn load_entries(&self) -> Result<Vec<Value>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(TelemetryError::persistence(&self.path, err)),
        };

        match serde_json::from_slice::<Vec<Value>>(&bytes) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(
                    "Discarding unreadable telemetry log {}: {}",
                    self.path.display(),
                    err
                );
                Ok(Vec::new())
            }
        }
    }

    fn encode(&self, entries: &[Value]) -> Result<Vec<u8>> {
        let indent = vec![b' '; self.indent];
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(&indent));
        entries.serialize(&mut serializer)?;
        Ok(buffer)
    }

    /// Writes a sibling temp file, then renames it over the target.
    async fn replace_contents(&self, contents: &[u8]) -> Result<()> {
        let staging = self.staging_path();

        if let Err(err) = fs::write(&staging, contents).await {
            let _ = fs::remove_file(&staging).await;
            return Err(TelemetryError::persistence(&self.path, err));
        }
        if let Err(err) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(TelemetryError::persistence(&self.path, err));
        }
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("telemetry"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Reads back every sample stored in a telemetry log.
///
/// # Errors
/// Returns [`TelemetryError::Persistence`] if the file cannot be read and
/// [`TelemetryError::Serialization`] if it is not an array of samples.
pub async fn read_samples(path: impl AsRef<Path>) -> Result<Vec<TelemetrySample>> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .await
        .map_err(|err| TelemetryError::persistence(path, err))?;
    Ok(serde_json::from_slice(&bytes)?)
}
