//! filesystem helpers for the command-line driver
//!
//! the core itself only needs `read_file`, `write_file`, and the
//! recursive create/remove primitives; `touch`, `mkdirs`, and
//! `move_path` exist for the `fs-*` convenience commands.

use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::error::{IoResultExt, Result};

/// create an empty file, leaving contents alone if it already exists
pub fn touch(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_path(parent)?;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_path(path)?;
    Ok(())
}

/// create a directory and all missing parents
pub fn mkdirs(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_path(path)
}

/// remove a file or a directory tree
pub fn remove_path(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).with_path(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path).with_path(path)
    } else {
        fs::remove_file(path).with_path(path)
    }
}

/// rename a file or directory
pub fn move_path(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_path(parent)?;
        }
    }
    fs::rename(from, to).with_path(from)
}

/// read a file's bytes
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_path(path)
}

/// write a file's bytes, creating parent directories as needed
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_path(parent)?;
        }
    }
    fs::write(path, data).with_path(path)
}
