use std::fs;

use crate::error::{Error, IoResultExt, Result};
use crate::index::Index;
use crate::object::{write_blob, Mode};
use crate::repo::Repository;
use crate::worktree::normalize_path;

/// stage a file for the next commit
///
/// the path must name a regular file beneath the root. the file's bytes
/// are stored as a blob and the index pins the path to that digest.
/// staging an unchanged file is idempotent.
pub fn add(repo: &Repository, rel: &str) -> Result<()> {
    let path = normalize_path(rel)?;
    let abs = repo.root().join(&path);

    let meta = match fs::metadata(&abs) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::PathNotFound(path))
        }
        Err(e) => return Err(Error::Io { path: abs, source: e }),
    };
    if !meta.is_file() {
        return Err(Error::PathInvalid(path));
    }

    let data = fs::read(&abs).with_path(&abs)?;
    let hash = write_blob(repo, &data)?;

    let mut index = Index::load(repo)?;
    index.add(path.clone(), Mode::Regular, hash);
    index.save(repo)?;

    tracing::debug!(%path, %hash, "staged file");
    Ok(())
}
