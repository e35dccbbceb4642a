//! Query, filter and update types for catalog operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ShelfError;
use crate::model::{Book, Status};

/// Availability filter for listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    All,
    AvailableOnly,
    BorrowedOnly,
}

impl Availability {
    #[must_use]
    pub fn matches(self, book: &Book) -> bool {
        match self {
            Self::All => true,
            Self::AvailableOnly => book.status == Status::Available,
            Self::BorrowedOnly => book.status == Status::Borrowed,
        }
    }
}

/// Sort field for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Key,
    Title,
    Author,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Title => "title",
            Self::Author => "author",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "key" | "id" => Ok(Self::Key),
            "title" | "name" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            other => Err(ShelfError::validation(
                "sort",
                format!("unknown sort field '{other}' (expected key, title or author)"),
            )),
        }
    }
}

/// Filter and ordering options for `Catalog::query_books`.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub availability: Availability,
    /// Case-insensitive author substring.
    pub author_contains: Option<String>,
    pub sort: SortKey,
    pub reverse: bool,
    pub limit: Option<usize>,
}

/// Descriptive fields to change on a book. The key never changes.
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_sort_key_aliases() {
        assert_eq!("id".parse::<SortKey>().unwrap(), SortKey::Key);
        assert_eq!("NAME".parse::<SortKey>().unwrap(), SortKey::Title);
        assert_eq!("author".parse::<SortKey>().unwrap(), SortKey::Author);
        assert!("year".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_availability_matches() {
        let mut book = Book::new("k", "t", "a", Utc::now());
        assert!(Availability::AvailableOnly.matches(&book));
        assert!(!Availability::BorrowedOnly.matches(&book));
        book.status = Status::Borrowed;
        assert!(Availability::BorrowedOnly.matches(&book));
        assert!(Availability::All.matches(&book));
    }
}
