use std::fs;
use std::path::Path;

use crate::error::{IoResultExt, Result};
use crate::fsops;
use crate::hash::Hash;
use crate::object::{read_blob, read_commit, read_tree, Mode};
use crate::repo::{Repository, DOT_DIR};

/// restore the working tree to the state of a commit
///
/// every top-level entry except `.chronofs` is removed, then the
/// commit's tree is materialized in its place. unstaged changes are
/// overwritten without any cleanliness check, and the branch reference
/// is left where it was: a later commit continues from the branch tip,
/// not from the restored snapshot. a failed object read aborts with the
/// working tree partially restored.
pub fn checkout(repo: &Repository, commit_hash: &Hash) -> Result<()> {
    let commit = read_commit(repo, commit_hash)?;

    for entry in fs::read_dir(repo.root()).with_path(repo.root())? {
        let entry = entry.with_path(repo.root())?;
        if entry.file_name() == DOT_DIR {
            continue;
        }
        fsops::remove_path(&entry.path())?;
    }

    materialize_tree(repo, &commit.tree, repo.root())?;
    tracing::debug!(commit = %commit_hash, "restored working tree");
    Ok(())
}

fn materialize_tree(repo: &Repository, tree_hash: &Hash, dir: &Path) -> Result<()> {
    let entries = read_tree(repo, tree_hash)?;
    fs::create_dir_all(dir).with_path(dir)?;

    for entry in entries {
        let target = dir.join(&entry.name);
        match entry.mode {
            Mode::Directory => materialize_tree(repo, &entry.hash, &target)?,
            Mode::Regular => {
                let data = read_blob(repo, &entry.hash)?;
                fsops::write_file(&target, &data)?;
            }
        }
    }
    Ok(())
}
