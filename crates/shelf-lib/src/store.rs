//! In-memory catalog backed by `HashMap`.
//!
//! Provides the book, loan and waitlist API without touching the
//! filesystem until `save()` is called.

use std::collections::{HashMap, HashSet, hash_map};
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{Result, ShelfError};
use crate::model::{Book, BorrowOutcome, ReturnOutcome, Status};
use crate::persist;
use crate::query::{Availability, BookUpdate, ListQuery, SortKey};
use crate::validation::{BookValidator, validate_requester};

/// In-memory library catalog.
///
/// All data lives in memory. Use `open()` to load from a catalog file
/// and `save()` to persist back.
#[derive(Debug, Default)]
pub struct Catalog {
    books: HashMap<String, Book>,
    dirty_keys: HashSet<String>,
    path: Option<PathBuf>,
}

/// Lazy listing over the catalog.
///
/// Cloning yields an independent iterator from the same starting point,
/// so a listing can be replayed without querying the catalog again.
#[derive(Debug, Clone)]
pub struct Books<'a> {
    inner: hash_map::Values<'a, String, Book>,
    filter: Availability,
}

impl<'a> Iterator for Books<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.inner.by_ref().find(|book| filter.matches(book))
    }
}

impl Catalog {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from loaded books, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns `CorruptData` on duplicate keys or invalid books.
    pub fn from_books(books: Vec<Book>) -> Result<Self> {
        let mut catalog = Self::new();
        for book in books {
            if let Err(errors) = BookValidator::validate(&book) {
                let detail: Vec<String> = errors.iter().map(ToString::to_string).collect();
                return Err(ShelfError::corrupt(format!(
                    "book '{}': {}",
                    book.key,
                    detail.join("; ")
                )));
            }
            if catalog.books.contains_key(&book.key) {
                return Err(ShelfError::corrupt(format!(
                    "duplicate key '{}'",
                    book.key
                )));
            }
            catalog.books.insert(book.key.clone(), book);
        }
        Ok(catalog)
    }

    /// Open and load from a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file is missing, `CorruptData` if it
    /// cannot be parsed or breaks an invariant, `Io` on read failure.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let books = persist::load(path)?;
        let mut catalog = Self::from_books(books).map_err(|e| match e {
            ShelfError::CorruptData { reason } => {
                ShelfError::corrupt(format!("{}: {reason}", path.display()))
            }
            other => other,
        })?;
        catalog.path = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Open a catalog file, starting empty if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Same as `open()`, except a missing file is not an error.
    pub fn open_or_empty(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match Self::open(path) {
            Err(ShelfError::FileNotFound(_)) => {
                tracing::debug!("No catalog at {}, starting empty", path.display());
                Ok(Self::empty_at(path))
            }
            other => other,
        }
    }

    /// An empty catalog that will save to `path`.
    #[must_use]
    pub fn empty_at(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// File this catalog was opened from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Save to the file that was opened.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if no file path is set, or `Io` on write failure.
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| ShelfError::Storage("No file path set; use save_to()".to_string()))?;
        self.save_to(path)
    }

    /// Save to a specific file path.
    ///
    /// # Errors
    ///
    /// Returns `Storage` or `Io` on write failure.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        persist::save(path.as_ref(), &self.export_books())
    }

    /// Render the catalog exactly as `save()` would write it.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails.
    pub fn to_document(&self) -> Result<String> {
        persist::to_document(&self.export_books())
    }

    // ========================================================================
    // Books
    // ========================================================================

    /// Add a book keyed by its title.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the title is already a key, or
    /// `Validation` if title or author is blank.
    pub fn add_book(&mut self, title: &str, author: &str) -> Result<Book> {
        self.add_book_with_key(title, title, author)
    }

    /// Add a book under an explicit key.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the key exists, or `Validation` if a
    /// field is blank or too long.
    pub fn add_book_with_key(&mut self, key: &str, title: &str, author: &str) -> Result<Book> {
        let book = Book::new(key.trim(), title.trim(), author.trim(), Utc::now());
        BookValidator::validate(&book).map_err(ShelfError::from_validation_errors)?;

        if self.books.contains_key(&book.key) {
            return Err(ShelfError::DuplicateKey { key: book.key });
        }

        tracing::info!(key = %book.key, author = %book.author, "Added book");
        self.dirty_keys.insert(book.key.clone());
        self.books.insert(book.key.clone(), book.clone());
        Ok(book)
    }

    /// Get a single book by key.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the key is absent.
    pub fn get_book(&self, key: &str) -> Result<&Book> {
        self.books
            .get(key)
            .ok_or_else(|| ShelfError::NotFound { key: key.to_string() })
    }

    /// Change a book's title and/or author.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NothingToDo` for an empty update, or
    /// `Validation` if the new values are invalid.
    pub fn update_book(&mut self, key: &str, update: &BookUpdate) -> Result<Book> {
        if update.is_empty() {
            return Err(ShelfError::NothingToDo {
                reason: "no fields to update".to_string(),
            });
        }

        let book = self.book_mut(key)?;
        let mut updated = book.clone();
        if let Some(title) = &update.title {
            updated.title = title.trim().to_string();
        }
        if let Some(author) = &update.author {
            updated.author = author.trim().to_string();
        }
        BookValidator::validate(&updated).map_err(ShelfError::from_validation_errors)?;

        *book = updated.clone();
        tracing::info!(key, "Updated book");
        self.dirty_keys.insert(key.to_string());
        Ok(updated)
    }

    /// Remove a book that is not on loan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the key is absent, or `StillBorrowed` if
    /// someone holds the book.
    pub fn remove_book(&mut self, key: &str) -> Result<Book> {
        let book = self.get_book(key)?;
        if let Some(borrower) = &book.borrower {
            return Err(ShelfError::StillBorrowed {
                key: key.to_string(),
                borrower: borrower.clone(),
            });
        }

        let removed = self
            .books
            .remove(key)
            .ok_or_else(|| ShelfError::NotFound { key: key.to_string() })?;
        tracing::info!(key, "Removed book");
        self.dirty_keys.insert(key.to_string());
        Ok(removed)
    }

    // ========================================================================
    // Loans
    // ========================================================================

    /// Borrow a book, or join its waitlist if it is on loan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the key is absent, `Validation` for a blank
    /// requester, `AlreadyBorrowed` if the requester holds the book, or
    /// `AlreadyWaitlisted` if they are already queued.
    pub fn borrow(&mut self, key: &str, requester: &str) -> Result<BorrowOutcome> {
        let requester = requester.trim();
        validate_requester(requester)?;
        let book = self.book_mut(key)?;

        let outcome = match book.status {
            Status::Available => {
                book.status = Status::Borrowed;
                book.borrower = Some(requester.to_string());
                book.borrowed_at = Some(Utc::now());
                tracing::info!(key, borrower = requester, "Book borrowed");
                BorrowOutcome::Borrowed {
                    key: key.to_string(),
                    borrower: requester.to_string(),
                }
            }
            Status::Borrowed => {
                if book.borrower.as_deref() == Some(requester) {
                    return Err(ShelfError::AlreadyBorrowed {
                        key: key.to_string(),
                        requester: requester.to_string(),
                    });
                }
                if let Some(position) = book.waitlist_position(requester) {
                    return Err(ShelfError::AlreadyWaitlisted {
                        key: key.to_string(),
                        requester: requester.to_string(),
                        position,
                    });
                }
                book.waitlist.push_back(requester.to_string());
                let position = book.waitlist.len();
                tracing::info!(key, requester, position, "Requester waitlisted");
                BorrowOutcome::Waitlisted {
                    key: key.to_string(),
                    requester: requester.to_string(),
                    position,
                }
            }
        };

        self.dirty_keys.insert(key.to_string());
        Ok(outcome)
    }

    /// Return a borrowed book, handing it to the next waitlisted requester.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the key is absent, or `NotBorrowed` if the
    /// book is already available.
    pub fn return_book(&mut self, key: &str) -> Result<ReturnOutcome> {
        let book = self.book_mut(key)?;
        let previous = match (book.status, book.borrower.take()) {
            (Status::Borrowed, Some(previous)) => previous,
            (_, borrower) => {
                book.borrower = borrower;
                return Err(ShelfError::NotBorrowed { key: key.to_string() });
            }
        };

        let outcome = if let Some(next) = book.waitlist.pop_front() {
            book.borrower = Some(next.clone());
            book.borrowed_at = Some(Utc::now());
            let remaining = book.waitlist.len();
            tracing::info!(key, %previous, %next, remaining, "Book handed to next in line; notify requester");
            ReturnOutcome::HandedOver {
                key: key.to_string(),
                previous,
                next,
                remaining,
            }
        } else {
            book.status = Status::Available;
            book.borrowed_at = None;
            tracing::info!(key, %previous, "Book returned");
            ReturnOutcome::Returned {
                key: key.to_string(),
                previous,
            }
        };

        self.dirty_keys.insert(key.to_string());
        Ok(outcome)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Lazily iterate over books matching `filter`, in map order.
    #[must_use]
    pub fn list_books(&self, filter: Availability) -> Books<'_> {
        Books {
            inner: self.books.values(),
            filter,
        }
    }

    /// List books with filters, ordering and limit applied.
    #[must_use]
    pub fn query_books(&self, query: &ListQuery) -> Vec<&Book> {
        let author = query.author_contains.as_deref().map(str::to_lowercase);
        let mut results: Vec<&Book> = self
            .list_books(query.availability)
            .filter(|book| {
                author
                    .as_deref()
                    .is_none_or(|needle| book.author.to_lowercase().contains(needle))
            })
            .collect();

        Self::sort_books(&mut results, query.sort, query.reverse);

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }

        results
    }

    /// Search books by key, title or author substring (case-insensitive).
    #[must_use]
    pub fn search_books(&self, term: &str) -> Vec<&Book> {
        let needle = term.trim().to_lowercase();
        let mut results: Vec<&Book> = self
            .books
            .values()
            .filter(|book| {
                book.key.to_lowercase().contains(&needle)
                    || book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
            })
            .collect();
        Self::sort_books(&mut results, SortKey::Key, false);
        results
    }

    /// All books, sorted by key for deterministic output.
    #[must_use]
    pub fn export_books(&self) -> Vec<Book> {
        let mut books: Vec<Book> = self.books.values().cloned().collect();
        books.sort_by(|a, b| a.key.cmp(&b.key));
        books
    }

    // ========================================================================
    // Dirty Tracking
    // ========================================================================

    /// Check if any book has been modified since load or the last clear.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty_keys.is_empty()
    }

    /// Get the number of modified books.
    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.dirty_keys.len()
    }

    /// Clear dirty tracking flags.
    pub fn clear_dirty(&mut self) {
        self.dirty_keys.clear();
    }

    /// Get the total number of books.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn book_mut(&mut self, key: &str) -> Result<&mut Book> {
        self.books
            .get_mut(key)
            .ok_or_else(|| ShelfError::NotFound { key: key.to_string() })
    }

    fn sort_books(books: &mut [&Book], sort: SortKey, reverse: bool) {
        match sort {
            SortKey::Key => books.sort_by(|a, b| a.key.cmp(&b.key)),
            SortKey::Title => books.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.key.cmp(&b.key))
            }),
            SortKey::Author => books.sort_by(|a, b| {
                a.author
                    .to_lowercase()
                    .cmp(&b.author.to_lowercase())
                    .then_with(|| a.key.cmp(&b.key))
            }),
        }
        if reverse {
            books.reverse();
        }
    }
}
