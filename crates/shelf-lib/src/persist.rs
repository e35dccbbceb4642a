//! Catalog file I/O.
//!
//! The catalog is stored as a single pretty-printed JSON array of books,
//! sorted by key, so that saving an unchanged catalog reproduces the file
//! byte for byte.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, ShelfError};
use crate::model::Book;

/// Parse a catalog document.
///
/// A blank document is an empty catalog.
///
/// # Errors
///
/// Returns `CorruptData` if the text is not a JSON array of books.
pub fn from_document(text: &str) -> Result<Vec<Book>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(|e| {
        ShelfError::corrupt(format!("line {} column {}: {e}", e.line(), e.column()))
    })
}

/// Render books as a catalog document (sorted by key, trailing newline).
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn to_document(books: &[Book]) -> Result<String> {
    let mut sorted: Vec<&Book> = books.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));
    let mut text = serde_json::to_string_pretty(&sorted)?;
    text.push('\n');
    Ok(text)
}

/// Load books from a catalog file.
///
/// # Errors
///
/// Returns `FileNotFound` if the file is missing, `Io` if it cannot be read,
/// or `CorruptData` if it cannot be parsed.
pub fn load(path: &Path) -> Result<Vec<Book>> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShelfError::FileNotFound(path.to_path_buf())
        } else {
            ShelfError::Io(e)
        }
    })?;
    let books = from_document(&text).map_err(|e| match e {
        ShelfError::CorruptData { reason } => {
            ShelfError::corrupt(format!("{}: {reason}", path.display()))
        }
        other => other,
    })?;
    tracing::debug!("Loaded {} book(s) from {}", books.len(), path.display());
    Ok(books)
}

/// Save books to a catalog file with atomic write.
///
/// Uses write-to-temp + rename so a failed write never truncates the
/// existing catalog.
///
/// # Errors
///
/// Returns `Storage` if the parent directory does not exist, or `Io` if the
/// file cannot be written.
pub fn save(path: &Path, books: &[Book]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(ShelfError::Storage(format!(
                "cannot write {}: directory {} does not exist",
                path.display(),
                parent.display()
            )));
        }
    }

    let text = to_document(books)?;

    let tmp_path = path.with_extension("json.tmp");
    if let Err(err) = write_and_rename(&tmp_path, path, &text) {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            tracing::debug!("Could not remove {}: {cleanup}", tmp_path.display());
        }
        return Err(err);
    }

    tracing::debug!("Saved {} book(s) to {}", books.len(), path.display());
    Ok(())
}

fn write_and_rename(tmp_path: &Path, path: &Path, text: &str) -> Result<()> {
    let mut file = fs::File::create(tmp_path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    drop(file);

    // Atomic rename
    fs::rename(tmp_path, path)?;
    Ok(())
}
