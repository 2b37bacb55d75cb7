use std::collections::HashSet;
use std::fs;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::{hash_bytes, Hash};
use crate::object::{object_exists, read_blob, read_commit, read_tree, Mode};
use crate::refs::resolve_head;
use crate::repo::Repository;

/// one integrity finding
#[derive(Debug)]
pub enum FsckProblem {
    /// object file whose name is not the digest of its contents
    NameMismatch { file: String, actual: Hash },
    /// object that does not parse under any known header
    Malformed { hash: Hash, message: String },
    /// hash referenced by a reachable object but absent from the store
    Missing { hash: Hash, referenced_by: String },
}

impl std::fmt::Display for FsckProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsckProblem::NameMismatch { file, actual } => {
                write!(f, "object {} has digest {}", file, actual)
            }
            FsckProblem::Malformed { hash, message } => {
                write!(f, "object {} is malformed: {}", hash, message)
            }
            FsckProblem::Missing {
                hash,
                referenced_by,
            } => write!(f, "object {} missing (referenced by {})", hash, referenced_by),
        }
    }
}

/// integrity report for the object store
#[derive(Debug, Default)]
pub struct FsckReport {
    /// objects examined on disk
    pub objects_checked: usize,
    /// stored objects not reachable from the current branch
    pub dangling: usize,
    pub problems: Vec<FsckProblem>,
}

impl FsckReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// verify the object store
///
/// checks that every object file's name equals the digest of its
/// contents and that it parses under its header, then walks the commit
/// graph from HEAD confirming every referenced hash resolves. purely
/// diagnostic; nothing is modified or deleted.
pub fn fsck(repo: &Repository) -> Result<FsckReport> {
    let mut report = FsckReport::default();

    // reachability first, so dangling objects can be counted below
    let mut reachable = HashSet::new();
    let mut cursor = resolve_head(repo)?;
    while let Some(commit_hash) = cursor {
        if !reachable.insert(commit_hash) {
            break;
        }
        if !object_exists(repo, &commit_hash) {
            report.problems.push(FsckProblem::Missing {
                hash: commit_hash,
                referenced_by: "HEAD".to_string(),
            });
            break;
        }
        let commit = match read_commit(repo, &commit_hash) {
            Ok(commit) => commit,
            Err(e) => {
                report.problems.push(FsckProblem::Malformed {
                    hash: commit_hash,
                    message: e.to_string(),
                });
                break;
            }
        };
        check_tree(repo, &commit.tree, &commit_hash.to_hex(), &mut reachable, &mut report)?;
        cursor = commit.parent;
    }

    // per-file verification
    let objects_dir = repo.objects_path();
    for entry in fs::read_dir(&objects_dir).with_path(&objects_dir)? {
        let entry = entry.with_path(&objects_dir)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        report.objects_checked += 1;

        let content = fs::read(entry.path()).with_path(entry.path())?;
        let actual = hash_bytes(&content);
        let claimed = match Hash::from_hex(&name) {
            Ok(h) if h == actual => h,
            _ => {
                report.problems.push(FsckProblem::NameMismatch {
                    file: name,
                    actual,
                });
                continue;
            }
        };

        if let Err(e) = parse_any(repo, &claimed, &content) {
            report.problems.push(FsckProblem::Malformed {
                hash: claimed,
                message: e.to_string(),
            });
            continue;
        }

        if !reachable.contains(&claimed) {
            report.dangling += 1;
        }
    }

    Ok(report)
}

fn check_tree(
    repo: &Repository,
    tree_hash: &Hash,
    referenced_by: &str,
    reachable: &mut HashSet<Hash>,
    report: &mut FsckReport,
) -> Result<()> {
    if !reachable.insert(*tree_hash) {
        return Ok(());
    }
    if !object_exists(repo, tree_hash) {
        report.problems.push(FsckProblem::Missing {
            hash: *tree_hash,
            referenced_by: referenced_by.to_string(),
        });
        return Ok(());
    }
    let entries = match read_tree(repo, tree_hash) {
        Ok(entries) => entries,
        Err(e) => {
            report.problems.push(FsckProblem::Malformed {
                hash: *tree_hash,
                message: e.to_string(),
            });
            return Ok(());
        }
    };
    for entry in entries {
        match entry.mode {
            Mode::Directory => {
                check_tree(repo, &entry.hash, &tree_hash.to_hex(), reachable, report)?;
            }
            Mode::Regular => {
                reachable.insert(entry.hash);
                if !object_exists(repo, &entry.hash) {
                    report.problems.push(FsckProblem::Missing {
                        hash: entry.hash,
                        referenced_by: tree_hash.to_hex(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// an object must parse as whichever type its header claims
fn parse_any(repo: &Repository, hash: &Hash, content: &[u8]) -> Result<()> {
    if content.starts_with(b"blob\n") {
        read_blob(repo, hash).map(|_| ())
    } else if content.starts_with(b"tree\n") {
        read_tree(repo, hash).map(|_| ())
    } else if content.starts_with(b"commit\n") {
        read_commit(repo, hash).map(|_| ())
    } else {
        Err(Error::corrupt("object", *hash, "unknown header"))
    }
}
