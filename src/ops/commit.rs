use crate::error::Result;
use crate::hash::Hash;
use crate::index::{Index, IndexEntry};
use crate::object::{write_commit, write_tree, Commit, Mode, TreeEntry};
use crate::refs::{self, DEFAULT_REF};
use crate::repo::Repository;

/// snapshot the index as a new commit and advance the current branch
///
/// the parent is the commit HEAD resolves to; an unborn branch yields a
/// root commit. author defaults to `user`. the caller is responsible
/// for rejecting empty messages.
pub fn commit(repo: &Repository, message: &str, author: Option<&str>) -> Result<Hash> {
    let index = Index::load(repo)?;
    let tree = write_tree_from_index(repo, &index)?;
    let parent = refs::resolve_head(repo)?;

    let commit = Commit::new(tree, parent, author.unwrap_or("user"), message);
    let hash = write_commit(repo, &commit)?;

    let target = match refs::head_target(repo)? {
        Some(target) => target,
        None => {
            refs::set_head(repo, DEFAULT_REF)?;
            DEFAULT_REF.to_string()
        }
    };
    refs::write_ref(repo, &target, &hash)?;

    tracing::debug!(%hash, tree = %commit.tree, "created commit");
    Ok(hash)
}

/// collapse the index into nested tree objects, returning the root digest
///
/// entries are taken in path order and partitioned on the leading
/// directory segment; each emitted tree lists its files first, then its
/// subdirectories, both ascending. identical indexes always produce the
/// identical root digest.
pub fn write_tree_from_index(repo: &Repository, index: &Index) -> Result<Hash> {
    let items: Vec<(&str, &IndexEntry)> = index
        .entries()
        .map(|(path, entry)| (path.as_str(), entry))
        .collect();
    build_tree(repo, &items, "")
}

fn build_tree(repo: &Repository, items: &[(&str, &IndexEntry)], prefix: &str) -> Result<Hash> {
    let mut entries = Vec::new();
    let mut children: Vec<&str> = Vec::new();

    for (path, entry) in items {
        let Some(rest) = path.strip_prefix(prefix) else {
            continue;
        };
        match rest.split_once('/') {
            None => entries.push(TreeEntry::new(entry.mode, rest, entry.hash)),
            Some((child, _)) => {
                if children.last() != Some(&child) {
                    children.push(child);
                }
            }
        }
    }

    // items arrive sorted, so files are ascending and child names unique
    for child in children {
        let child_prefix = format!("{}{}/", prefix, child);
        let subtree = build_tree(repo, items, &child_prefix)?;
        entries.push(TreeEntry::new(Mode::Directory, child, subtree));
    }

    write_tree(repo, &entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{read_commit, read_tree};
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
        crate::ops::add(repo, rel).unwrap();
    }

    #[test]
    fn test_root_commit() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "a.txt", "hello\n");

        let hash = commit(&repo, "init", Some("alice")).unwrap();

        let c = read_commit(&repo, &hash).unwrap();
        assert!(c.is_root());
        assert_eq!(c.author, "alice");
        assert_eq!(c.message, "init");

        // the branch now points at the commit
        assert_eq!(refs::resolve_head(&repo).unwrap(), Some(hash));
        let raw = fs::read_to_string(repo.dot_dir().join(DEFAULT_REF)).unwrap();
        assert_eq!(raw, format!("{}\n", hash.to_hex()));
    }

    #[test]
    fn test_second_commit_links_parent() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "a.txt", "v1");
        let first = commit(&repo, "one", None).unwrap();

        stage(&repo, dir.path(), "a.txt", "v2");
        let second = commit(&repo, "two", None).unwrap();

        let c = read_commit(&repo, &second).unwrap();
        assert_eq!(c.parent, Some(first));
        assert_eq!(c.author, "user");
    }

    #[test]
    fn test_tree_shape_files_then_dirs() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "zed.txt", "z");
        stage(&repo, dir.path(), "sub/inner.txt", "i");
        stage(&repo, dir.path(), "apple.txt", "a");

        let hash = commit(&repo, "shape", None).unwrap();
        let c = read_commit(&repo, &hash).unwrap();
        let root = read_tree(&repo, &c.tree).unwrap();

        let names: Vec<&str> = root.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["apple.txt", "zed.txt", "sub"]);
        assert_eq!(root[0].mode, Mode::Regular);
        assert_eq!(root[2].mode, Mode::Directory);

        let sub = read_tree(&repo, &root[2].hash).unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub[0].name, "inner.txt");
    }

    #[test]
    fn test_tree_build_deterministic() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "b/one.txt", "1");
        stage(&repo, dir.path(), "a.txt", "a");
        stage(&repo, dir.path(), "b/two.txt", "2");

        let index = Index::load(&repo).unwrap();
        let t1 = write_tree_from_index(&repo, &index).unwrap();
        let t2 = write_tree_from_index(&repo, &index).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn test_empty_index_commits_empty_tree() {
        let (_dir, repo) = test_repo();
        let hash = commit(&repo, "empty", None).unwrap();

        let c = read_commit(&repo, &hash).unwrap();
        assert!(read_tree(&repo, &c.tree).unwrap().is_empty());
    }

    #[test]
    fn test_deep_nesting() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "a/b/c/d/e/leaf.txt", "deep");

        let hash = commit(&repo, "deep", None).unwrap();
        let c = read_commit(&repo, &hash).unwrap();

        // walk five directory levels to the leaf
        let mut tree = read_tree(&repo, &c.tree).unwrap();
        for expected in ["a", "b", "c", "d", "e"] {
            assert_eq!(tree.len(), 1);
            assert_eq!(tree[0].name, expected);
            assert_eq!(tree[0].mode, Mode::Directory);
            tree = read_tree(&repo, &tree[0].hash).unwrap();
        }
        assert_eq!(tree[0].name, "leaf.txt");
        assert_eq!(tree[0].mode, Mode::Regular);
    }

    #[test]
    fn test_identical_contents_share_blobs() {
        let (dir, repo) = test_repo();
        stage(&repo, dir.path(), "one.txt", "shared");
        stage(&repo, dir.path(), "two.txt", "shared");

        let hash = commit(&repo, "share", None).unwrap();
        let c = read_commit(&repo, &hash).unwrap();
        let tree = read_tree(&repo, &c.tree).unwrap();
        assert_eq!(tree[0].hash, tree[1].hash);
    }
}
