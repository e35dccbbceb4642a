use serde::{Deserialize, Serialize};
use shelf_lib::{Book, Status};

/// Book with derived loan fields for the show view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    pub waitlist_length: usize,
    pub next_in_line: Option<String>,
}

impl From<&Book> for BookDetails {
    fn from(book: &Book) -> Self {
        Self {
            book: book.clone(),
            waitlist_length: book.waitlist.len(),
            next_in_line: book.waitlist.front().cloned(),
        }
    }
}

/// Aggregate counts for list footers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub available: usize,
    pub borrowed: usize,
    /// Requesters queued across all books.
    pub waiting: usize,
}

impl CatalogSummary {
    #[must_use]
    pub fn from_books<'a>(books: impl IntoIterator<Item = &'a Book>) -> Self {
        books.into_iter().fold(Self::default(), |mut acc, book| {
            acc.total += 1;
            match book.status {
                Status::Available => acc.available += 1,
                Status::Borrowed => acc.borrowed += 1,
            }
            acc.waiting += book.waitlist.len();
            acc
        })
    }
}
