//! chronofs - snapshot-based version control engine
//!
//! a miniature version-control core built on a content-addressed object
//! store: stage files, commit snapshots, inspect status and history,
//! restore any past state, and compare states line by line.
//!
//! # Core concepts
//!
//! - **Blob**: one file's bytes, framed as `blob\n` + data
//! - **Tree**: a directory listing of `mode name hash` lines
//! - **Commit**: a tree plus parent link, author, timestamp, and message
//! - **Index**: the mutable staging set collapsed into trees at commit time
//! - **HEAD / refs**: a symbolic pointer to the single branch `refs/heads/main`
//!
//! every object lives at `.chronofs/objects/<hex>` where `<hex>` is the
//! SHA-256 of its serialized form; equal content means equal digest
//! means one stored file.
//!
//! # Example usage
//!
//! ```no_run
//! use chronofs::{ops, Repository};
//! use std::path::Path;
//!
//! // initialize a repository in the current directory
//! let repo = Repository::init(Path::new(".")).unwrap();
//!
//! // stage and commit a file
//! ops::add(&repo, "notes.txt").unwrap();
//! let hash = ops::commit(&repo, "first snapshot", None).unwrap();
//!
//! // restore it later
//! ops::checkout(&repo, &hash).unwrap();
//! ```

mod error;
mod hash;
mod index;
mod refs;
mod repo;
mod textdiff;
mod worktree;

pub mod fsops;
pub mod object;
pub mod ops;

pub use error::{Error, Result};
pub use hash::{hash_bytes, Hash, Hasher};
pub use index::{Index, IndexEntry};
pub use object::{Commit, Mode, TreeEntry};
pub use refs::{head_target, read_ref, resolve_head, set_head, write_ref, DEFAULT_REF};
pub use repo::{Repository, DOT_DIR};
pub use textdiff::{diff_lines, DiffLine};
pub use worktree::{normalize_path, scan_files};
