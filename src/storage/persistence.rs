//! Snapshot file for the toy collection
//!
//! The whole collection is one pretty-printed JSON array. Every save rewrites
//! it through a temp file in the same directory followed by a rename, so
//! readers never observe a half-written file.

use crate::core::{StoreError, StoreResult, Toy};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the collection. A missing or blank file is an empty collection.
    pub fn load(&self) -> StoreResult<Vec<Toy>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            StoreError::persistence(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            StoreError::persistence(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    pub fn save(&self, toys: &[Toy]) -> StoreResult<()> {
        let bytes = Self::encode(toys)?;
        self.write(&bytes)
    }

    /// Pretty-prints with a four-space indent.
    pub fn encode(toys: &[Toy]) -> StoreResult<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        toys.serialize(&mut serializer)
            .map_err(|e| StoreError::persistence(format!("Failed to serialize toys: {}", e)))?;
        Ok(buf)
    }

    /// Atomically replaces the file with `bytes`.
    pub fn write(&self, bytes: &[u8]) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| {
            StoreError::persistence(format!("Failed to create data directory: {}", e))
        })?;

        let mut temp = NamedTempFile::new_in(&dir)
            .map_err(|e| StoreError::persistence(format!("Failed to create temp file: {}", e)))?;
        temp.write_all(bytes)
            .map_err(|e| StoreError::persistence(format!("Failed to write toys: {}", e)))?;
        temp.flush()
            .map_err(|e| StoreError::persistence(format!("Failed to flush toys: {}", e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| StoreError::persistence(format!("Failed to sync toys: {}", e)))?;
        temp.persist(&self.path).map_err(|e| {
            StoreError::persistence(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e.error
            ))
        })?;
        Ok(())
    }
}
