use std::fs;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Hash;
use crate::repo::Repository;

/// the single default branch
pub const DEFAULT_REF: &str = "refs/heads/main";

/// point HEAD at a reference path
pub fn set_head(repo: &Repository, ref_path: &str) -> Result<()> {
    validate_ref_path(ref_path)?;
    let head = repo.head_path();
    fs::write(&head, format!("ref: {}\n", ref_path)).with_path(&head)?;
    Ok(())
}

/// reference path HEAD points at, if HEAD is symbolic
pub fn head_target(repo: &Repository) -> Result<Option<String>> {
    let head = repo.head_path();
    let content = match fs::read_to_string(&head) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io { path: head, source: e }),
    };
    match content.strip_prefix("ref: ") {
        Some(rest) => Ok(Some(rest.trim_end_matches('\n').to_string())),
        None => Ok(None),
    }
}

/// read a reference; `None` means unborn (file empty or absent)
pub fn read_ref(repo: &Repository, ref_path: &str) -> Result<Option<Hash>> {
    validate_ref_path(ref_path)?;
    let path = repo.dot_dir().join(ref_path);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io { path, source: e }),
    };
    let hex = content.trim();
    if hex.is_empty() {
        return Ok(None);
    }
    Ok(Some(Hash::from_hex(hex)?))
}

/// update a reference to point at a commit
pub fn write_ref(repo: &Repository, ref_path: &str, hash: &Hash) -> Result<()> {
    validate_ref_path(ref_path)?;
    let path = repo.dot_dir().join(ref_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(&path, format!("{}\n", hash.to_hex())).with_path(&path)?;
    tracing::debug!(%ref_path, %hash, "updated ref");
    Ok(())
}

/// resolve HEAD to a commit digest; `None` when the branch is unborn
pub fn resolve_head(repo: &Repository) -> Result<Option<Hash>> {
    match head_target(repo)? {
        Some(ref_path) => read_ref(repo, &ref_path),
        None => Ok(None),
    }
}

/// reference paths are slash-separated and stay inside `.chronofs`
fn validate_ref_path(ref_path: &str) -> Result<()> {
    if ref_path.is_empty() || ref_path.starts_with('/') || ref_path.ends_with('/') {
        return Err(Error::RefInvalid(ref_path.to_string()));
    }
    for component in ref_path.split('/') {
        if component.is_empty() || component == "." || component == ".." {
            return Err(Error::RefInvalid(ref_path.to_string()));
        }
    }
    Ok(())
}
