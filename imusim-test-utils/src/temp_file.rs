// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A not yet existing `telemetry.json` path inside a fresh temp directory.
///
/// The directory and everything written into it, staging files included, are
/// removed when this value is dropped.
#[derive(Debug)]
pub struct TempJsonPath {
    dir: TempDir,
    path: PathBuf,
}

impl TempJsonPath {
    pub fn new(label: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("imusim-{label}-"))
            .tempdir()
            .expect("create temp dir");
        let path = dir.path().join("telemetry.json");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding [`path`](Self::path)
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// A path under a subdirectory that does not exist, so writes to it fail.
    pub fn unreachable_path(&self) -> PathBuf {
        self.dir.path().join("missing").join("telemetry.json")
    }

    pub fn write(&self, contents: &str) -> std::io::Result<()> {
        std::fs::write(&self.path, contents)
    }

    pub fn read(&self) -> std::io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}
