use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::index::Index;
use crate::object::{read_blob, read_commit, read_tree, write_blob, Mode};
use crate::refs::resolve_head;
use crate::repo::Repository;
use crate::textdiff::diff_lines;
use crate::worktree::{read_working_file, scan_files};

/// compare two repository states line by line
///
/// each side is `WORKING`, `INDEX`, `HEAD`, or a literal commit digest.
/// a side that cannot be resolved (unborn HEAD, unknown commit) yields
/// the corresponding `... side not found` report instead of an error.
pub fn diff(repo: &Repository, left: &str, right: &str) -> Result<String> {
    let Some(left_map) = resolve_side(repo, left)? else {
        return Ok("Left side not found\n".to_string());
    };
    let Some(right_map) = resolve_side(repo, right)? else {
        return Ok("Right side not found\n".to_string());
    };

    let all_paths: BTreeSet<&String> = left_map.keys().chain(right_map.keys()).collect();

    let mut out = String::new();
    for path in all_paths {
        let (lhash, rhash) = (left_map.get(path), right_map.get(path));
        if lhash == rhash {
            continue;
        }
        let left_text = side_text(repo, lhash)?;
        let right_text = side_text(repo, rhash)?;

        out.push_str(&format!("diff -- {}\n", path));
        out.push_str(&format!("--- a/{}\n", path));
        out.push_str(&format!("+++ b/{}\n", path));
        for line in diff_lines(&left_text, &right_text) {
            out.push(line.tag);
            out.push_str(&line.text);
            out.push('\n');
        }
    }

    if out.is_empty() {
        out.push_str("(no differences)\n");
    }
    Ok(out)
}

/// blob contents for one side of a per-file diff; absent means empty
fn side_text(repo: &Repository, hash: Option<&Hash>) -> Result<String> {
    match hash {
        Some(hash) => {
            let bytes = read_blob(repo, hash)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        None => Ok(String::new()),
    }
}

/// resolve a side identifier to a `path -> blob digest` map
fn resolve_side(repo: &Repository, id: &str) -> Result<Option<BTreeMap<String, Hash>>> {
    match id {
        "WORKING" => {
            let mut map = BTreeMap::new();
            for path in scan_files(repo.root())? {
                let data = read_working_file(repo.root(), &path)?;
                // store the blob so its bytes are readable for the line diff
                let hash = write_blob(repo, &data)?;
                map.insert(path, hash);
            }
            Ok(Some(map))
        }
        "INDEX" => {
            let index = Index::load(repo)?;
            Ok(Some(
                index
                    .entries()
                    .map(|(path, entry)| (path.clone(), entry.hash))
                    .collect(),
            ))
        }
        "HEAD" => match resolve_head(repo)? {
            Some(commit) => commit_map(repo, &commit),
            None => Ok(None),
        },
        literal => match Hash::from_hex(literal) {
            Ok(commit) => commit_map(repo, &commit),
            Err(_) => Err(Error::UnknownDiffSide(literal.to_string())),
        },
    }
}

/// flatten a commit's tree into `path -> blob digest`
fn commit_map(repo: &Repository, commit: &Hash) -> Result<Option<BTreeMap<String, Hash>>> {
    let commit = match read_commit(repo, commit) {
        Ok(c) => c,
        Err(Error::ObjectNotFound(_)) => return Ok(None),
        Err(e) => return Err(e),
    };
    let mut map = BTreeMap::new();
    collect_tree(repo, &commit.tree, "", &mut map)?;
    Ok(Some(map))
}

fn collect_tree(
    repo: &Repository,
    tree_hash: &Hash,
    prefix: &str,
    out: &mut BTreeMap<String, Hash>,
) -> Result<()> {
    for entry in read_tree(repo, tree_hash)? {
        let path = format!("{}{}", prefix, entry.name);
        match entry.mode {
            Mode::Directory => {
                let child_prefix = format!("{}/", path);
                collect_tree(repo, &entry.hash, &child_prefix, out)?;
            }
            Mode::Regular => {
                out.insert(path, entry.hash);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{add, commit};
    use std::fs;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn stage(repo: &Repository, dir: &std::path::Path, rel: &str, content: &str) {
        let abs = dir.join(rel);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&abs, content).unwrap();
        add(repo, rel).unwrap();
    }

    #[test]
    fn test_diff_identical_sides() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "a.txt", "same\n");
        commit(&repo, "c", None).unwrap();

        assert_eq!(diff(&repo, "HEAD", "HEAD").unwrap(), "(no differences)\n");
        assert_eq!(
            diff(&repo, "WORKING", "WORKING").unwrap(),
            "(no differences)\n"
        );
        assert_eq!(diff(&repo, "INDEX", "INDEX").unwrap(), "(no differences)\n");
    }

    #[test]
    fn test_diff_two_commits() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "a.txt", "hello\n");
        let first = commit(&repo, "one", None).unwrap();

        stage(&repo, dir.path(), "a.txt", "hello world\n");
        commit(&repo, "two", None).unwrap();

        let out = diff(&repo, "HEAD", &first.to_hex()).unwrap();
        assert!(out.starts_with("diff -- a.txt\n--- a/a.txt\n+++ b/a.txt\n"));
        // left is the newer state, right the older
        assert!(out.contains("-hello world\n"));
        assert!(out.contains("+hello\n"));
    }

    #[test]
    fn test_diff_working_vs_index() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "a.txt", "staged\n");
        fs::write(dir.path().join("a.txt"), "edited\n").unwrap();

        let out = diff(&repo, "INDEX", "WORKING").unwrap();
        assert!(out.contains("-staged\n"));
        assert!(out.contains("+edited\n"));
    }

    #[test]
    fn test_diff_added_file_appears_all_plus() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "a.txt", "base\n");
        let first = commit(&repo, "one", None).unwrap();

        stage(&repo, dir.path(), "b.txt", "one\ntwo\n");
        commit(&repo, "two", None).unwrap();

        let out = diff(&repo, &first.to_hex(), "HEAD").unwrap();
        assert!(out.contains("diff -- b.txt\n"));
        assert!(out.contains("+one\n+two\n"));
        assert!(!out.contains("diff -- a.txt\n"));
    }

    #[test]
    fn test_diff_unknown_commit_not_found() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "a.txt", "x");
        commit(&repo, "c", None).unwrap();

        let missing = "00000000000000000000000000000000000000000000000000000000000000bb";
        assert_eq!(
            diff(&repo, missing, "HEAD").unwrap(),
            "Left side not found\n"
        );
        assert_eq!(
            diff(&repo, "HEAD", missing).unwrap(),
            "Right side not found\n"
        );
    }

    #[test]
    fn test_diff_unborn_head_not_found() {
        let (_dir, repo) = test_repo();
        assert_eq!(
            diff(&repo, "HEAD", "WORKING").unwrap(),
            "Left side not found\n"
        );
    }

    #[test]
    fn test_diff_malformed_side() {
        let (_dir, repo) = test_repo();
        assert!(matches!(
            diff(&repo, "NONSENSE", "WORKING"),
            Err(Error::UnknownDiffSide(_))
        ));
    }

    #[test]
    fn test_diff_nested_paths_use_slash_form() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "sub/deep/f.txt", "v1\n");
        let first = commit(&repo, "one", None).unwrap();

        stage(&repo, dir.path(), "sub/deep/f.txt", "v2\n");
        commit(&repo, "two", None).unwrap();

        let out = diff(&repo, &first.to_hex(), "HEAD").unwrap();
        assert!(out.contains("diff -- sub/deep/f.txt\n"));
    }
}
