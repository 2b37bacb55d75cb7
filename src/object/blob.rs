use crate::error::{Error, Result};
use crate::hash::{Hash, Hasher};
use crate::repo::Repository;

const HEADER: &[u8] = b"blob\n";

/// digest a byte sequence under blob framing without storing it
///
/// staging and status must agree on identity, so both hash the framed
/// form (`blob\n` + bytes), never the raw bytes.
pub fn blob_digest(data: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(HEADER);
    hasher.update(data);
    hasher.finalize()
}

/// write file contents to the store as a blob
pub fn write_blob(repo: &Repository, data: &[u8]) -> Result<Hash> {
    let mut content = Vec::with_capacity(HEADER.len() + data.len());
    content.extend_from_slice(HEADER);
    content.extend_from_slice(data);
    super::write_object(repo, &content)
}

/// read blob contents by digest
pub fn read_blob(repo: &Repository, hash: &Hash) -> Result<Vec<u8>> {
    let content = super::read_object(repo, hash)?;
    match content.strip_prefix(HEADER) {
        Some(rest) => Ok(rest.to_vec()),
        None => Err(Error::corrupt("blob", *hash, "missing blob header")),
    }
}
