//! Atomic file writes
//!
//! 1. Write to a temporary file (.tmp)
//! 2. Call sync_all() to flush to disk
//! 3. Rename temp file to final path (atomic on most filesystems)
//!
//! A reader sees either the previous file or the new one, never a partial
//! write.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::EngineResult;

/// Atomically write `content` to `path`, creating parent directories
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> EngineResult<()> {
    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;
    Ok(())
}
