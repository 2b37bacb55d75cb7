use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::repo::Repository;

const HEADER: &str = "tree\n";

/// entry mode, a closed set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// regular file, hash references a blob
    Regular,
    /// directory, hash references another tree
    Directory,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Regular => "100644",
            Mode::Directory => "040000",
        }
    }

    pub fn parse(s: &str) -> Option<Mode> {
        match s {
            "100644" => Some(Mode::Regular),
            "040000" => Some(Mode::Directory),
            _ => None,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Mode::Directory)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// one entry of a directory tree object
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: Mode,
    pub name: String,
    pub hash: Hash,
}

impl TreeEntry {
    pub fn new(mode: Mode, name: impl Into<String>, hash: Hash) -> Self {
        Self {
            mode,
            name: name.into(),
            hash,
        }
    }
}

/// entry names are single path segments; the line format additionally
/// cannot carry whitespace
fn validate_entry_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::InvalidEntryName(name.to_string()));
    }
    if name.contains('/') || name.contains('\0') || name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidEntryName(name.to_string()));
    }
    Ok(())
}

/// write a tree object in the given entry order
///
/// the caller fixes the order; identical entry sequences always produce
/// identical digests.
pub fn write_tree(repo: &Repository, entries: &[TreeEntry]) -> Result<Hash> {
    let mut seen = HashSet::new();
    let mut content = String::from(HEADER);
    for entry in entries {
        validate_entry_name(&entry.name)?;
        if !seen.insert(entry.name.as_str()) {
            return Err(Error::DuplicateEntryName(entry.name.clone()));
        }
        content.push_str(entry.mode.as_str());
        content.push(' ');
        content.push_str(&entry.name);
        content.push(' ');
        content.push_str(&entry.hash.to_hex());
        content.push('\n');
    }
    super::write_object(repo, content.as_bytes())
}

/// read a tree object by digest
pub fn read_tree(repo: &Repository, hash: &Hash) -> Result<Vec<TreeEntry>> {
    let content = super::read_object(repo, hash)?;
    let text = std::str::from_utf8(&content)
        .map_err(|_| Error::corrupt("tree", *hash, "not valid utf-8"))?;
    let body = text
        .strip_prefix(HEADER)
        .ok_or_else(|| Error::corrupt("tree", *hash, "missing tree header"))?;

    let mut entries = Vec::new();
    for line in body.lines() {
        let mut fields = line.split_whitespace();
        let (mode, name, hex) = match (fields.next(), fields.next(), fields.next()) {
            (Some(m), Some(n), Some(h)) => (m, n, h),
            _ => return Err(Error::corrupt("tree", *hash, format!("truncated entry: {line:?}"))),
        };
        if fields.next().is_some() {
            return Err(Error::corrupt("tree", *hash, format!("trailing fields: {line:?}")));
        }
        let mode = Mode::parse(mode)
            .ok_or_else(|| Error::corrupt("tree", *hash, format!("unknown mode: {mode}")))?;
        entries.push(TreeEntry {
            mode,
            name: name.to_string(),
            hash: Hash::from_hex(hex)?,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_bytes;
    use crate::object::object_path;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn blob_hash() -> Hash {
        Hash::from_hex("abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789").unwrap()
    }

    #[test]
    fn test_write_and_read_tree() {
        let (_dir, repo) = test_repo();

        let entries = vec![
            TreeEntry::new(Mode::Regular, "a.txt", blob_hash()),
            TreeEntry::new(Mode::Directory, "sub", blob_hash()),
        ];
        let hash = write_tree(&repo, &entries).unwrap();
        assert_eq!(read_tree(&repo, &hash).unwrap(), entries);
    }

    #[test]
    fn test_tree_serialized_form() {
        let (_dir, repo) = test_repo();

        let entries = vec![TreeEntry::new(Mode::Regular, "a.txt", blob_hash())];
        let hash = write_tree(&repo, &entries).unwrap();

        let expected = format!("tree\n100644 a.txt {}\n", blob_hash().to_hex());
        let on_disk = std::fs::read(object_path(&repo, &hash)).unwrap();
        assert_eq!(on_disk, expected.as_bytes());
        assert_eq!(hash, hash_bytes(expected.as_bytes()));
    }

    #[test]
    fn test_empty_tree() {
        let (_dir, repo) = test_repo();

        let hash = write_tree(&repo, &[]).unwrap();
        assert!(read_tree(&repo, &hash).unwrap().is_empty());

        let on_disk = std::fs::read(object_path(&repo, &hash)).unwrap();
        assert_eq!(on_disk, b"tree\n");
    }

    #[test]
    fn test_identical_entries_identical_digest() {
        let (_dir, repo) = test_repo();

        let entries = vec![
            TreeEntry::new(Mode::Regular, "a", blob_hash()),
            TreeEntry::new(Mode::Regular, "b", blob_hash()),
        ];
        let h1 = write_tree(&repo, &entries).unwrap();
        let h2 = write_tree(&repo, &entries).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_tree_rejects_duplicate_names() {
        let (_dir, repo) = test_repo();

        let entries = vec![
            TreeEntry::new(Mode::Regular, "same", blob_hash()),
            TreeEntry::new(Mode::Directory, "same", blob_hash()),
        ];
        assert!(matches!(
            write_tree(&repo, &entries),
            Err(Error::DuplicateEntryName(_))
        ));
    }

    #[test]
    fn test_tree_rejects_bad_names() {
        let (_dir, repo) = test_repo();

        for name in ["", ".", "..", "a/b", "a b", "a\tb", "a\0b"] {
            let entries = vec![TreeEntry::new(Mode::Regular, name, blob_hash())];
            assert!(
                matches!(write_tree(&repo, &entries), Err(Error::InvalidEntryName(_))),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn test_read_tree_wrong_type() {
        let (_dir, repo) = test_repo();

        let hash = crate::object::write_object(&repo, b"blob\ndata").unwrap();
        assert!(matches!(
            read_tree(&repo, &hash),
            Err(Error::ObjectCorrupt { kind: "tree", .. })
        ));
    }

    #[test]
    fn test_read_tree_unknown_mode() {
        let (_dir, repo) = test_repo();

        let content = format!("tree\n120000 link {}\n", blob_hash().to_hex());
        let hash = crate::object::write_object(&repo, content.as_bytes()).unwrap();
        assert!(matches!(
            read_tree(&repo, &hash),
            Err(Error::ObjectCorrupt { kind: "tree", .. })
        ));
    }

    #[test]
    fn test_read_tree_truncated_entry() {
        let (_dir, repo) = test_repo();

        let hash = crate::object::write_object(&repo, b"tree\n100644 lonely\n").unwrap();
        assert!(matches!(
            read_tree(&repo, &hash),
            Err(Error::ObjectCorrupt { kind: "tree", .. })
        ));
    }
}
