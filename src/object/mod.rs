//! content-addressed object store
//!
//! every object is one file under `.chronofs/objects/`, named by the
//! SHA-256 hex of its full serialized form (header line included).
//! objects are write-once; a store write for content that already
//! exists is a no-op returning the same digest.

pub mod blob;
pub mod commit;
pub mod tree;

pub use blob::{blob_digest, read_blob, write_blob};
pub use commit::{read_commit, write_commit, Commit};
pub use tree::{read_tree, write_tree, Mode, TreeEntry};

use std::fs;
use std::path::PathBuf;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::{hash_bytes, Hash};
use crate::repo::Repository;

/// filesystem path of an object
pub fn object_path(repo: &Repository, hash: &Hash) -> PathBuf {
    repo.objects_path().join(hash.to_hex())
}

/// check whether an object is present in the store
pub fn object_exists(repo: &Repository, hash: &Hash) -> bool {
    object_path(repo, hash).exists()
}

/// store serialized object content, returning its digest
///
/// writes through a temp sibling and renames, so a half-written file is
/// never visible under its final digest name.
pub(crate) fn write_object(repo: &Repository, content: &[u8]) -> Result<Hash> {
    let hash = hash_bytes(content);
    let path = object_path(repo, &hash);

    // content equals name: an existing file is already this object
    if path.exists() {
        return Ok(hash);
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).with_path(&tmp)?;
    fs::rename(&tmp, &path).with_path(&path)?;

    tracing::trace!(%hash, len = content.len(), "stored object");
    Ok(hash)
}

/// load serialized object content by digest
pub(crate) fn read_object(repo: &Repository, hash: &Hash) -> Result<Vec<u8>> {
    let path = object_path(repo, hash);
    fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ObjectNotFound(*hash)
        } else {
            Error::Io { path, source: e }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_object_file_named_by_digest() {
        let (_dir, repo) = test_repo();

        let hash = write_object(&repo, b"blob\nhello\n").unwrap();
        let path = object_path(&repo, &hash);
        assert!(path.is_file());

        // file name equals the digest of its contents
        let on_disk = fs::read(&path).unwrap();
        assert_eq!(hash_bytes(&on_disk), hash);
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), hash.to_hex());
    }

    #[test]
    fn test_write_object_idempotent() {
        let (_dir, repo) = test_repo();

        let h1 = write_object(&repo, b"blob\nsame\n").unwrap();
        let h2 = write_object(&repo, b"blob\nsame\n").unwrap();
        assert_eq!(h1, h2);

        // still exactly one object in the store
        assert_eq!(fs::read_dir(repo.objects_path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_object_roundtrip() {
        let (_dir, repo) = test_repo();

        let content = b"tree\n100644 a.txt 0000000000000000000000000000000000000000000000000000000000000000\n";
        let hash = write_object(&repo, content).unwrap();
        assert_eq!(read_object(&repo, &hash).unwrap(), content);
    }

    #[test]
    fn test_read_missing_object() {
        let (_dir, repo) = test_repo();

        let fake =
            Hash::from_hex("0000000000000000000000000000000000000000000000000000000000000000")
                .unwrap();
        assert!(matches!(
            read_object(&repo, &fake),
            Err(Error::ObjectNotFound(_))
        ));
    }
}
