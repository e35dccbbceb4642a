//! Text formatting functions for `shelf`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ●)
//! - Waitlist summaries
//! - Book lines for list/search
//! - Fixed-width rows for text export

use std::collections::VecDeque;

use shelf_lib::{Book, Status};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Status icon characters.
pub mod icons {
    /// Available - on the shelf (hollow circle).
    pub const AVAILABLE: &str = "○";
    /// Borrowed - on loan (filled circle).
    pub const BORROWED: &str = "●";
}

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: &Status) -> &'static str {
    match status {
        Status::Available => icons::AVAILABLE,
        Status::Borrowed => icons::BORROWED,
    }
}

/// Format a waitlist as `[Bob, Carol]`.
#[must_use]
pub fn format_waitlist(waitlist: &VecDeque<String>) -> String {
    let names: Vec<&str> = waitlist.iter().map(String::as_str).collect();
    format!("[{}]", names.join(", "))
}

/// Format a single-line book summary.
///
/// Format: `{icon} {key}: {title} by {author}` plus loan details when
/// borrowed. The title is omitted when it equals the key.
#[must_use]
pub fn format_book_line(book: &Book) -> String {
    let mut line = format!("{} {}", format_status_icon(&book.status), book.key);
    if book.title != book.key {
        line.push_str(&format!(": {}", book.title));
    }
    line.push_str(&format!(" by {}", book.author));

    if let Some(borrower) = &book.borrower {
        line.push_str(&format!(" (borrowed by {borrower}"));
        if !book.waitlist.is_empty() {
            line.push_str(&format!(", {} waiting", book.waitlist.len()));
        }
        line.push(')');
    }
    line
}

/// Pad or truncate `text` to exactly `width` terminal columns.
#[must_use]
pub fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    if text.width() > width {
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            out.push(ch);
            used += w;
        }
        out.push('…');
        used += 1;
    } else {
        out.push_str(text);
        used = text.width();
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Format a fixed-width row for the text export.
#[must_use]
pub fn format_export_row(book: &Book) -> String {
    let holder = book.borrower.as_deref().unwrap_or("-");
    format!(
        "{} | {} | {} | {} | {} | Added: {}",
        fit_width(&book.key, 16),
        fit_width(&book.title, 30),
        fit_width(&book.author, 20),
        fit_width(book.status.as_str(), 9),
        fit_width(holder, 12),
        book.added_at.format("%Y-%m-%d"),
    )
    .trim_end()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_test_book() -> Book {
        Book::new(
            "B1",
            "The Left Hand of Darkness",
            "Ursula K. Le Guin",
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(format_status_icon(&Status::Available), "○");
        assert_eq!(format_status_icon(&Status::Borrowed), "●");
    }

    #[test]
    fn test_format_waitlist() {
        let mut waitlist = VecDeque::new();
        assert_eq!(format_waitlist(&waitlist), "[]");
        waitlist.push_back("Bob".to_string());
        waitlist.push_back("Carol".to_string());
        assert_eq!(format_waitlist(&waitlist), "[Bob, Carol]");
    }

    #[test]
    fn test_format_book_line_available() {
        let line = format_book_line(&make_test_book());
        assert_eq!(
            line,
            "○ B1: The Left Hand of Darkness by Ursula K. Le Guin"
        );
    }

    #[test]
    fn test_format_book_line_title_is_key() {
        let book = Book::new("Dune", "Dune", "Frank Herbert", Utc::now());
        assert_eq!(format_book_line(&book), "○ Dune by Frank Herbert");
    }

    #[test]
    fn test_format_book_line_borrowed_with_waitlist() {
        let mut book = make_test_book();
        book.status = Status::Borrowed;
        book.borrower = Some("Alice".to_string());
        let line = format_book_line(&book);
        assert!(line.starts_with("●"));
        assert!(line.ends_with("(borrowed by Alice)"));

        book.waitlist.push_back("Bob".to_string());
        assert!(format_book_line(&book).ends_with("(borrowed by Alice, 1 waiting)"));
    }

    #[test]
    fn test_fit_width_pads_and_truncates() {
        assert_eq!(fit_width("abc", 5), "abc  ");
        assert_eq!(fit_width("abcdef", 4), "abc…");
        // Wide characters count as two columns.
        assert_eq!(fit_width("本棚", 6), "本棚  ");
        assert_eq!(fit_width("本棚です", 5).width(), 5);
    }

    #[test]
    fn test_format_export_row() {
        let row = format_export_row(&make_test_book());
        assert!(row.starts_with("B1               | The Left Hand of Darkness      |"));
        assert!(row.contains("| available | -            |"));
        assert!(row.ends_with("Added: 2024-03-01"));
    }
}
