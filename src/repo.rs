use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, IoResultExt, Result};
use crate::refs::DEFAULT_REF;

/// name of the repository metadata directory
pub const DOT_DIR: &str = ".chronofs";

/// a chronofs repository rooted at a working directory
///
/// the repository is a value owning its root path; all durable state
/// lives under `<root>/.chronofs` and is re-read at each operation.
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    /// initialize a repository at the given root
    ///
    /// creates `.chronofs/{objects, refs/heads}`, points HEAD at the
    /// default branch, creates the branch unborn, and persists an empty
    /// index. running on an already-initialized root is a no-op success.
    pub fn init(root: &Path) -> Result<Self> {
        let repo = Self {
            root: root.to_path_buf(),
        };
        if repo.is_initialized() {
            return Ok(repo);
        }

        fs::create_dir_all(repo.objects_path()).with_path(repo.objects_path())?;
        fs::create_dir_all(repo.refs_heads_path()).with_path(repo.refs_heads_path())?;

        crate::refs::set_head(&repo, DEFAULT_REF)?;
        // unborn branch: the ref file exists but is empty
        fs::write(repo.dot_dir().join(DEFAULT_REF), b"")
            .with_path(repo.dot_dir().join(DEFAULT_REF))?;

        let index = crate::index::Index::new();
        index.save(&repo)?;

        tracing::debug!(root = %repo.root.display(), "initialized repository");
        Ok(repo)
    }

    /// open an existing repository
    pub fn open(root: &Path) -> Result<Self> {
        let repo = Self {
            root: root.to_path_buf(),
        };
        if !repo.is_initialized() {
            return Err(Error::NotInitialized(root.to_path_buf()));
        }
        Ok(repo)
    }

    /// whether `.chronofs` exists under the root
    pub fn is_initialized(&self) -> bool {
        self.dot_dir().is_dir()
    }

    /// working-directory root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// path to the `.chronofs` directory
    pub fn dot_dir(&self) -> PathBuf {
        self.root.join(DOT_DIR)
    }

    /// path to the HEAD file
    pub fn head_path(&self) -> PathBuf {
        self.dot_dir().join("HEAD")
    }

    /// path to the index file
    pub fn index_path(&self) -> PathBuf {
        self.dot_dir().join("index")
    }

    /// path to the objects directory
    pub fn objects_path(&self) -> PathBuf {
        self.dot_dir().join("objects")
    }

    /// path to the refs/heads directory
    pub fn refs_heads_path(&self) -> PathBuf {
        self.dot_dir().join("refs").join("heads")
    }
}
