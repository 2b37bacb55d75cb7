use std::collections::BTreeMap;
use std::fs;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Hash;
use crate::object::Mode;
use crate::repo::Repository;

/// a staged path: its mode and the blob digest pinned at staging time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub mode: Mode,
    pub hash: Hash,
}

/// the staging set mapping tracked paths to blob identities
///
/// persisted as one `MODE PATH HASH` line per entry. the file is a full
/// snapshot rewritten on every save; a missing file is an empty index.
#[derive(Debug, Default)]
pub struct Index {
    entries: BTreeMap<String, IndexEntry>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// read the index from disk, replacing any in-memory state
    pub fn load(repo: &Repository) -> Result<Self> {
        let path = repo.index_path();
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(Error::Io { path, source: e }),
        };

        let mut entries = BTreeMap::new();
        for line in content.lines() {
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (mode, path, hex) = match (fields.next(), fields.next(), fields.next()) {
                (Some(m), Some(p), Some(h)) => (m, p, h),
                _ => return Err(Error::IndexCorrupt(line.to_string())),
            };
            let mode = Mode::parse(mode).ok_or_else(|| Error::IndexCorrupt(line.to_string()))?;
            entries.insert(
                path.to_string(),
                IndexEntry {
                    mode,
                    hash: Hash::from_hex(hex)?,
                },
            );
        }
        Ok(Self { entries })
    }

    /// rewrite the index file in full
    pub fn save(&self, repo: &Repository) -> Result<()> {
        let mut content = String::new();
        for (path, entry) in &self.entries {
            content.push_str(entry.mode.as_str());
            content.push(' ');
            content.push_str(path);
            content.push(' ');
            content.push_str(&entry.hash.to_hex());
            content.push('\n');
        }
        let index_path = repo.index_path();
        fs::write(&index_path, content).with_path(&index_path)
    }

    /// insert or replace a staged path
    pub fn add(&mut self, path: impl Into<String>, mode: Mode, hash: Hash) {
        self.entries.insert(path.into(), IndexEntry { mode, hash });
    }

    /// delete a staged path; no-op when absent
    pub fn remove(&mut self, path: &str) {
        self.entries.remove(path);
    }

    /// staged entry for a path
    pub fn get(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    /// iterate entries in path order
    pub fn entries(&self) -> impl Iterator<Item = (&String, &IndexEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
