//! Filesystem patch sink
//!
//! Realizes patch operations beneath a root directory. The engine hands this
//! sink operations in apply-safe order (deletions before creations,
//! directories before the files they contain), so each call maps directly
//! onto one `std::fs` mutation.

use crate::patch::PatchSink;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Patch sink applying operations to a real directory tree
#[derive(Debug)]
pub struct FsPatchSink {
    root: PathBuf,
}

impl FsPatchSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn target(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn write_bytes(&self, path: &str, content: &[u8]) -> io::Result<()> {
        let target = self.target(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, content)
    }
}

impl PatchSink for FsPatchSink {
    fn delete_file(&mut self, path: &str) -> io::Result<()> {
        debug!(path = %path, "deleting file");
        fs::remove_file(self.target(path))
    }

    fn delete_directory(&mut self, path: &str) -> io::Result<()> {
        debug!(path = %path, "deleting directory");
        fs::remove_dir_all(self.target(path))
    }

    fn create_directory(&mut self, path: &str) -> io::Result<()> {
        debug!(path = %path, "creating directory");
        fs::create_dir_all(self.target(path))
    }

    fn create_file(&mut self, path: &str, version: &str, content: &[u8]) -> io::Result<()> {
        debug!(path = %path, version = %version, bytes = content.len(), "creating file");
        self.write_bytes(path, content)
    }

    fn write_file(&mut self, path: &str, version: &str, content: &[u8]) -> io::Result<()> {
        debug!(path = %path, version = %version, bytes = content.len(), "overwriting file");
        self.write_bytes(path, content)
    }
}
