//! Shared fixture staging for the integration tests.
//!
//! `TreeFixture` builds small file trees in a temporary directory, which is
//! all the harness's own tests need in the way of a filesystem.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temp-directory-backed tree under construction.
///
/// Paths are given relative to the fixture root; parent directories are
/// created on demand. The whole tree is removed when the fixture drops.
pub struct TreeFixture {
    dir: TempDir,
}

impl TreeFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create fixture directory"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create a directory (and any missing parents) under the root.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(&path).expect("failed to create fixture directory");
        path
    }

    /// Create a file with the given content, creating parents as needed.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture parents");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
