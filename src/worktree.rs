use std::path::{Component, Path};

use walkdir::WalkDir;

use crate::error::{Error, IoResultExt, Result};
use crate::repo::DOT_DIR;

/// normalize a user-supplied relative path into index form
///
/// index paths are forward-slash relative paths that stay inside the
/// working root: no absolute paths, no `.`/`..` segments, and nothing
/// under the repository's own metadata directory. whitespace is rejected
/// because neither the index nor the tree line format can carry it.
pub fn normalize_path(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(Error::PathInvalid(raw.to_string()));
    }
    let path = Path::new(raw);
    if path.is_absolute() {
        return Err(Error::PathInvalid(raw.to_string()));
    }

    let mut segments = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(seg) => {
                let seg = seg.to_str().ok_or_else(|| Error::PathInvalid(raw.to_string()))?;
                if seg.contains('\0') || seg.chars().any(char::is_whitespace) {
                    return Err(Error::PathInvalid(raw.to_string()));
                }
                segments.push(seg);
            }
            // `.` and `..` never appear in index paths
            _ => return Err(Error::PathInvalid(raw.to_string())),
        }
    }
    if segments.is_empty() || segments[0] == DOT_DIR {
        return Err(Error::PathInvalid(raw.to_string()));
    }
    Ok(segments.join("/"))
}

/// list every file under the root as sorted relative slash paths,
/// skipping the metadata directory without descending into it
pub fn scan_files(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.file_name() != DOT_DIR);

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(|p| p.to_path_buf()).unwrap_or_else(|| root.to_path_buf());
            match e.into_io_error() {
                Some(source) => Error::Io { path, source },
                None => Error::PathInvalid(path.display().to_string()),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| Error::PathInvalid(entry.path().display().to_string()))?;
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push(rel);
    }

    files.sort();
    Ok(files)
}

/// read a working file's bytes
pub fn read_working_file(root: &Path, rel: &str) -> Result<Vec<u8>> {
    let abs = root.join(rel);
    std::fs::read(&abs).with_path(&abs)
}
