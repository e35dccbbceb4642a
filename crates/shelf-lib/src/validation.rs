//! Validation helpers for `shelf-lib`.
//!
//! These routines enforce field limits and loan invariants and return
//! structured validation errors without mutating the catalog.

use std::collections::HashSet;

use crate::error::{Result, ShelfError, ValidationError};
use crate::model::{Book, Status};

const MAX_KEY_LEN: usize = 200;
const MAX_TITLE_LEN: usize = 500;
const MAX_AUTHOR_LEN: usize = 200;
const MAX_REQUESTER_LEN: usize = 100;

/// Validates book fields and loan invariants.
pub struct BookValidator;

impl BookValidator {
    /// Validate a book and return all validation errors found.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any rule is violated.
    pub fn validate(book: &Book) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Key: required, bounded, printable.
        if book.key.trim().is_empty() {
            errors.push(ValidationError::new("key", "cannot be empty"));
        }
        if book.key.chars().count() > MAX_KEY_LEN {
            errors.push(ValidationError::new("key", "exceeds 200 characters"));
        }
        if book.key.chars().any(char::is_control) {
            errors.push(ValidationError::new(
                "key",
                "cannot contain control characters",
            ));
        }

        if book.title.trim().is_empty() {
            errors.push(ValidationError::new("title", "cannot be empty"));
        }
        if book.title.chars().count() > MAX_TITLE_LEN {
            errors.push(ValidationError::new("title", "exceeds 500 characters"));
        }

        if book.author.trim().is_empty() {
            errors.push(ValidationError::new("author", "cannot be empty"));
        }
        if book.author.chars().count() > MAX_AUTHOR_LEN {
            errors.push(ValidationError::new("author", "exceeds 200 characters"));
        }

        errors.extend(Self::loan_errors(book));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Check status/borrower/waitlist consistency.
    fn loan_errors(book: &Book) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        match (book.status, book.borrower.as_deref()) {
            (Status::Borrowed, None) => {
                errors.push(ValidationError::new("borrower", "borrowed book has no borrower"));
            }
            (Status::Available, Some(_)) => {
                errors.push(ValidationError::new(
                    "borrower",
                    "available book cannot have a borrower",
                ));
            }
            _ => {}
        }

        if book.status == Status::Available && !book.waitlist.is_empty() {
            errors.push(ValidationError::new(
                "waitlist",
                "available book cannot have a waitlist",
            ));
        }

        if book.status == Status::Available && book.borrowed_at.is_some() {
            errors.push(ValidationError::new(
                "borrowed_at",
                "available book cannot have a loan date",
            ));
        }

        if let Some(borrower) = book.borrower.as_deref() {
            if book.waitlist.iter().any(|r| r == borrower) {
                errors.push(ValidationError::new(
                    "waitlist",
                    format!("borrower {borrower} is also waitlisted"),
                ));
            }
        }

        let mut seen = HashSet::new();
        for requester in book.borrower.iter().chain(book.waitlist.iter()) {
            if let Err(err) = check_requester(requester) {
                errors.push(err);
            }
            if !seen.insert(requester.as_str()) && book.borrower.as_deref() != Some(requester.as_str()) {
                errors.push(ValidationError::new(
                    "waitlist",
                    format!("{requester} is queued more than once"),
                ));
            }
        }

        errors
    }
}

fn check_requester(requester: &str) -> std::result::Result<(), ValidationError> {
    if requester.trim().is_empty() {
        return Err(ValidationError::new("requester", "cannot be empty"));
    }
    if requester.chars().count() > MAX_REQUESTER_LEN {
        return Err(ValidationError::new("requester", "exceeds 100 characters"));
    }
    Ok(())
}

/// Validate a requester identifier.
///
/// # Errors
///
/// Returns `Validation` if the identifier is blank or too long.
pub fn validate_requester(requester: &str) -> Result<()> {
    check_requester(requester)
        .map_err(|err| ShelfError::validation(err.field, err.message))
}
