use std::fmt;

use crate::error::Result;
use crate::hash::Hash;
use crate::object::{read_commit, Commit};
use crate::refs::resolve_head;
use crate::repo::Repository;

/// a commit with its digest, for history output
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub hash: Hash,
    pub commit: Commit,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "commit {}", self.hash)?;
        writeln!(f, "Author: {}", self.commit.author)?;
        writeln!(f, "Date:   {}", self.commit.time)?;
        writeln!(f)?;
        for line in self.commit.message.lines() {
            writeln!(f, "    {}", line)?;
        }
        Ok(())
    }
}

/// walk history from HEAD back through parent links, newest first
///
/// an unborn branch yields an empty list.
pub fn log(repo: &Repository, max_count: Option<usize>) -> Result<Vec<LogEntry>> {
    let mut entries = Vec::new();
    let mut cursor = resolve_head(repo)?;

    while let Some(hash) = cursor {
        if let Some(max) = max_count {
            if entries.len() >= max {
                break;
            }
        }
        let commit = read_commit(repo, &hash)?;
        cursor = commit.parent;
        entries.push(LogEntry { hash, commit });
    }
    Ok(entries)
}

/// render stanzas for display; empty history gets the unborn record
pub fn render_log(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return "(no commits yet)\n".to_string();
    }
    entries
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
