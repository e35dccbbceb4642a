//! Error types for `shelf-lib`.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for catalog operations.
#[derive(Error, Debug)]
pub enum ShelfError {
    // === Book Errors ===
    /// Book with the specified key was not found.
    #[error("Book not found: {key}")]
    NotFound { key: String },

    /// Attempted to add a book with a key that already exists.
    #[error("Book already exists: {key}")]
    DuplicateKey { key: String },

    /// Attempted to return a book that is not on loan.
    #[error("Book is not borrowed: {key}")]
    NotBorrowed { key: String },

    /// Requester already holds the book.
    #[error("{requester} already has '{key}' checked out")]
    AlreadyBorrowed { key: String, requester: String },

    /// Requester is already queued for the book.
    #[error("{requester} is already on the waitlist for '{key}' (position {position})")]
    AlreadyWaitlisted {
        key: String,
        requester: String,
        position: usize,
    },

    /// Cannot remove a book that is still on loan.
    #[error("Cannot remove '{key}': still borrowed by {borrower}")]
    StillBorrowed { key: String, borrower: String },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {}", join_errors(errors))]
    ValidationErrors { errors: Vec<ValidationError> },

    // === Persistence Errors ===
    /// The catalog file could not be parsed or violates catalog invariants.
    #[error("Corrupt catalog data: {reason}")]
    CorruptData { reason: String },

    /// Generic storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// File not found at the specified path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Operational Errors ===
    /// The request would not change anything.
    #[error("Nothing to do: {reason}")]
    NothingToDo { reason: String },
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ShelfError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptData {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }

    /// True for errors that reject a single command without touching state.
    ///
    /// These are reported at the command boundary; everything else
    /// (corrupt data, I/O, configuration) is fatal to the process.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::DuplicateKey { .. }
                | Self::NotBorrowed { .. }
                | Self::AlreadyBorrowed { .. }
                | Self::AlreadyWaitlisted { .. }
                | Self::StillBorrowed { .. }
                | Self::Validation { .. }
                | Self::ValidationErrors { .. }
                | Self::NothingToDo { .. }
        )
    }
}

/// Result type using `ShelfError`.
pub type Result<T> = std::result::Result<T, ShelfError>;
