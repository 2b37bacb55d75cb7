use std::path::PathBuf;

use crate::Hash;

/// error type for chronofs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a chronofs repository: {0}")]
    NotInitialized(PathBuf),

    #[error("invalid path: {0}")]
    PathInvalid(String),

    #[error("path not found: {0}")]
    PathNotFound(String),

    #[error("object not found: {0}")]
    ObjectNotFound(Hash),

    #[error("corrupt {kind} object {hash}: {message}")]
    ObjectCorrupt {
        kind: &'static str,
        hash: Hash,
        message: String,
    },

    #[error("corrupt index entry: {0}")]
    IndexCorrupt(String),

    #[error("invalid ref: {0}")]
    RefInvalid(String),

    #[error("invalid tree entry name: {0}")]
    InvalidEntryName(String),

    #[error("duplicate tree entry name: {0}")]
    DuplicateEntryName(String),

    #[error("invalid hash hex: {0}")]
    InvalidHashHex(String),

    #[error("unknown diff side: {0}")]
    UnknownDiffSide(String),

    #[error("commit message must not be empty")]
    EmptyMessage,

    #[error("corrupt object store: {0}")]
    StoreCorrupt(String),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// shorthand for a corrupt-object error
    pub(crate) fn corrupt(kind: &'static str, hash: Hash, message: impl Into<String>) -> Self {
        Error::ObjectCorrupt {
            kind,
            hash,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// helper to wrap io errors with path context
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
