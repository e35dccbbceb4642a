//! Export command implementation.
//!
//! Writes a plain-text report of the whole catalog, one padded row per
//! book, for printing or pasting elsewhere. The catalog file itself is
//! not touched.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use shelf_lib::{Book, ListQuery};

use crate::cli::ExportArgs;
use crate::config::CatalogContext;
use crate::error::Result;
use crate::format::{CatalogSummary, format_export_row, print_json};

/// Execute the export command.
///
/// # Errors
///
/// Returns `Io` if the report cannot be written.
pub fn execute(args: &ExportArgs, ctx: &CatalogContext, json: bool) -> Result<()> {
    let query = ListQuery {
        sort: ctx.config.list_sort,
        ..Default::default()
    };
    let books = ctx.catalog.query_books(&query);

    if books.is_empty() {
        if json {
            print_json(&serde_json::json!({ "path": null, "books": 0 }))?;
        } else {
            println!("No books to export.");
        }
        return Ok(());
    }

    write_report(&args.path, &books, Utc::now())?;
    tracing::info!("Exported {} book(s) to {}", books.len(), args.path.display());

    if json {
        print_json(&serde_json::json!({ "path": args.path, "books": books.len() }))?;
    } else {
        println!("Exported {} book(s) to {}", books.len(), args.path.display());
    }
    Ok(())
}

/// Render the report text.
#[must_use]
pub fn render_report(books: &[&Book], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("Library Catalog Export\n");
    out.push_str(&"=".repeat(60));
    out.push('\n');
    out.push_str(&format!(
        "Generated on: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    for book in books {
        out.push_str(&format_export_row(book));
        out.push('\n');
        if !book.waitlist.is_empty() {
            let names: Vec<&str> = book.waitlist.iter().map(String::as_str).collect();
            out.push_str(&format!("    waiting: {}\n", names.join(", ")));
        }
    }
    let summary = CatalogSummary::from_books(books.iter().copied());
    out.push_str(&format!(
        "\nTotal: {} ({} available, {} borrowed)\n",
        summary.total, summary.available, summary.borrowed
    ));
    out
}

fn write_report(path: &Path, books: &[&Book], generated_at: DateTime<Utc>) -> Result<()> {
    fs::write(path, render_report(books, generated_at))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shelf_lib::Status;

    #[test]
    fn test_render_report() {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let available = Book::new("A1", "Emma", "Jane Austen", at);
        let mut borrowed = Book::new("B1", "Dune", "Frank Herbert", at);
        borrowed.status = Status::Borrowed;
        borrowed.borrower = Some("Alice".into());
        borrowed.waitlist.push_back("Bob".into());

        let report = render_report(&[&available, &borrowed], at);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Library Catalog Export");
        assert_eq!(lines[2], "Generated on: 2024-05-06 07:08:09 UTC");
        assert!(lines[4].starts_with("A1 "));
        assert!(lines[5].contains("| Alice "));
        assert_eq!(lines[6], "    waiting: Bob");
        assert!(report.ends_with("Total: 2 (1 available, 1 borrowed)\n"));
    }
}
