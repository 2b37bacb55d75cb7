use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::repo::Repository;

const HEADER: &str = "commit\n";

/// a snapshot record linking a tree and an optional parent commit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    /// root tree digest
    pub tree: Hash,
    /// prior commit, absent for the root commit
    pub parent: Option<Hash>,
    /// author identity
    pub author: String,
    /// seconds since the unix epoch
    pub time: i64,
    /// free-form message, may contain newlines
    pub message: String,
}

impl Commit {
    /// create a commit stamped with the current wall clock
    pub fn new(
        tree: Hash,
        parent: Option<Hash>,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let time = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Self::with_timestamp(tree, parent, author, time, message)
    }

    /// create a commit with an explicit timestamp
    pub fn with_timestamp(
        tree: Hash,
        parent: Option<Hash>,
        author: impl Into<String>,
        time: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tree,
            parent,
            author: author.into(),
            time,
            message: message.into(),
        }
    }

    /// is this the root commit (no parent)
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// write a commit object to the store
pub fn write_commit(repo: &Repository, commit: &Commit) -> Result<Hash> {
    let mut content = String::from(HEADER);
    content.push_str("tree ");
    content.push_str(&commit.tree.to_hex());
    content.push('\n');
    if let Some(parent) = &commit.parent {
        content.push_str("parent ");
        content.push_str(&parent.to_hex());
        content.push('\n');
    }
    content.push_str("author ");
    content.push_str(&commit.author);
    content.push('\n');
    content.push_str("time ");
    content.push_str(&commit.time.to_string());
    content.push('\n');
    content.push_str("message\n");
    content.push_str(&commit.message);
    content.push('\n');
    super::write_object(repo, content.as_bytes())
}

/// read a commit object by digest
///
/// header lines are parsed until the literal `message` line; everything
/// after it is the message, with a single trailing newline stripped.
pub fn read_commit(repo: &Repository, hash: &Hash) -> Result<Commit> {
    let content = super::read_object(repo, hash)?;
    let text = std::str::from_utf8(&content)
        .map_err(|_| Error::corrupt("commit", *hash, "not valid utf-8"))?;
    let body = text
        .strip_prefix(HEADER)
        .ok_or_else(|| Error::corrupt("commit", *hash, "missing commit header"))?;

    let mut tree = None;
    let mut parent = None;
    let mut author = String::new();
    let mut time = 0i64;
    let mut message = String::new();

    let mut remaining = body;
    while !remaining.is_empty() {
        let (line, tail) = match remaining.split_once('\n') {
            Some((line, tail)) => (line, tail),
            None => (remaining, ""),
        };
        if line == "message" {
            message = tail.strip_suffix('\n').unwrap_or(tail).to_string();
            break;
        }
        if let Some(hex) = line.strip_prefix("tree ") {
            tree = Some(Hash::from_hex(hex)?);
        } else if let Some(hex) = line.strip_prefix("parent ") {
            parent = Some(Hash::from_hex(hex)?);
        } else if let Some(rest) = line.strip_prefix("author ") {
            author = rest.to_string();
        } else if let Some(rest) = line.strip_prefix("time ") {
            time = rest
                .parse()
                .map_err(|_| Error::corrupt("commit", *hash, format!("bad timestamp: {rest}")))?;
        }
        remaining = tail;
    }

    let tree = tree.ok_or_else(|| Error::corrupt("commit", *hash, "missing tree line"))?;
    Ok(Commit {
        tree,
        parent,
        author,
        time,
        message,
    })
}
