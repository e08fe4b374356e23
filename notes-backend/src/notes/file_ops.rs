//! File operations for the notes document
//!
//! Handles reading the document and replacing it atomically via a temporary
//! sibling file and a rename.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Read the document, returning `None` if it does not exist
pub fn read_document(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Temporary sibling path for `path` (e.g. "data.json" -> ".data.json.<uuid>.tmp").
/// Lives in the same directory so the final rename never crosses filesystems.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "notes".to_string());
    let tmp_name = format!(".{}.{}.tmp", name, Uuid::new_v4());
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

/// Write `content` to a fresh temporary file next to `path` and flush it to disk.
/// Returns the temporary path; nothing is visible at `path` until [`install`].
pub fn write_temp(path: &Path, content: &str) -> io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = temp_path_for(path);
    let mut file = fs::File::create(&tmp)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    Ok(tmp)
}

/// Move a fully written temporary file over `path` in a single rename
pub fn install(tmp: &Path, path: &Path) -> io::Result<()> {
    if let Err(e) = fs::rename(tmp, path) {
        if let Err(cleanup) = fs::remove_file(tmp) {
            log::warn!(
                "[NOTES] Failed to remove temporary file {}: {}",
                tmp.display(),
                cleanup
            );
        }
        return Err(e);
    }
    Ok(())
}

/// Replace the document at `path` so readers see either the old or the new content
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let tmp = write_temp(path, content)?;
    install(&tmp, path)
}
