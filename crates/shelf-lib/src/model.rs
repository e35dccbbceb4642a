//! Core data types for shelf-lib.
//!
//! These types are serialized verbatim into the catalog file, so field
//! names and the `status` spelling are part of the on-disk format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Loan status of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Available,
    Borrowed,
}

impl Status {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Borrowed => "borrowed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Unique catalog key (defaults to the title).
    pub key: String,

    pub title: String,

    pub author: String,

    /// Loan status.
    #[serde(default)]
    pub status: Status,

    /// Current holder; present iff `status` is `Borrowed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrower: Option<String>,

    /// Requesters queued behind the current borrower, head first.
    #[serde(default)]
    pub waitlist: VecDeque<String>,

    /// When the book entered the catalog.
    pub added_at: DateTime<Utc>,

    /// Start of the current loan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrowed_at: Option<DateTime<Utc>>,
}

impl Book {
    /// Create an available book with an empty waitlist.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            author: author.into(),
            status: Status::Available,
            borrower: None,
            waitlist: VecDeque::new(),
            added_at,
            borrowed_at: None,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == Status::Available
    }

    /// 1-based waitlist position of `requester`, if queued.
    #[must_use]
    pub fn waitlist_position(&self, requester: &str) -> Option<usize> {
        self.waitlist
            .iter()
            .position(|r| r == requester)
            .map(|idx| idx + 1)
    }
}

/// Result of a borrow request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BorrowOutcome {
    /// The book was available and is now on loan to the requester.
    Borrowed { key: String, borrower: String },
    /// The book was on loan; the requester joined the waitlist.
    Waitlisted {
        key: String,
        requester: String,
        position: usize,
    },
}

/// Result of returning a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ReturnOutcome {
    /// Nobody was waiting; the book is available again.
    Returned { key: String, previous: String },
    /// The head of the waitlist now holds the book and should be notified.
    HandedOver {
        key: String,
        previous: String,
        next: String,
        remaining: usize,
    },
}
