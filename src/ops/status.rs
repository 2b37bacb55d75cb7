use std::collections::BTreeSet;
use std::fmt;

use crate::error::Result;
use crate::index::Index;
use crate::object::blob_digest;
use crate::repo::Repository;
use crate::worktree::{read_working_file, scan_files};

/// classification of one path relative to the staging set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileState {
    /// in the working tree, not staged
    Untracked,
    /// staged, but working contents differ from the pinned digest
    Modified,
    /// staged and working contents match
    Staged,
    /// staged, but gone from the working tree
    Deleted,
    /// nothing to report
    Clean,
}

impl FileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileState::Untracked => "untracked",
            FileState::Modified => "modified",
            FileState::Staged => "staged",
            FileState::Deleted => "deleted",
            FileState::Clean => "clean",
        }
    }
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// one classified path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    pub state: FileState,
}

/// classify every path seen in the working tree or the index
///
/// working files are digested under blob framing so comparison against
/// index entries is meaningful; nothing is written to the store. an
/// empty union yields the single `clean` record.
pub fn status(repo: &Repository) -> Result<Vec<StatusEntry>> {
    let index = Index::load(repo)?;
    let working = scan_files(repo.root())?;
    let working_set: BTreeSet<&str> = working.iter().map(String::as_str).collect();

    let mut out = Vec::new();
    for path in &working {
        let data = read_working_file(repo.root(), path)?;
        let digest = blob_digest(&data);
        let state = match index.get(path) {
            None => FileState::Untracked,
            Some(entry) if entry.hash != digest => FileState::Modified,
            Some(_) => FileState::Staged,
        };
        out.push(StatusEntry {
            path: path.clone(),
            state,
        });
    }

    for (path, _) in index.entries() {
        if !working_set.contains(path.as_str()) {
            out.push(StatusEntry {
                path: path.clone(),
                state: FileState::Deleted,
            });
        }
    }

    if out.is_empty() {
        out.push(StatusEntry {
            path: String::new(),
            state: FileState::Clean,
        });
    }
    Ok(out)
}
