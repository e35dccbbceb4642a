//! `shelf-lib`: in-process library catalog.
//!
//! Tracks books, loans and per-book FIFO waitlists in memory and persists
//! them as a single JSON document.
//!
//! # Quick Start
//!
//! ```no_run
//! use shelf_lib::{Availability, BorrowOutcome, Catalog};
//!
//! // Load existing file (or start empty)
//! let mut catalog = Catalog::open_or_empty(".shelf/catalog.json").unwrap();
//!
//! catalog.add_book("Dune", "Frank Herbert").unwrap();
//! catalog.borrow("Dune", "alice").unwrap();
//!
//! // A second request joins the waitlist
//! let outcome = catalog.borrow("Dune", "bob").unwrap();
//! assert!(matches!(outcome, BorrowOutcome::Waitlisted { position: 1, .. }));
//!
//! // Returning hands the book to bob
//! catalog.return_book("Dune").unwrap();
//!
//! for book in catalog.list_books(Availability::AvailableOnly) {
//!     println!("{}", book.title);
//! }
//!
//! // Save back
//! catalog.save().unwrap();
//! ```

pub mod error;
pub mod model;
pub mod persist;
pub mod query;
pub mod store;
pub mod validation;

pub use error::{Result, ShelfError};
pub use model::{Book, BorrowOutcome, ReturnOutcome, Status};
pub use query::{Availability, BookUpdate, ListQuery, SortKey};
pub use store::{Books, Catalog};
