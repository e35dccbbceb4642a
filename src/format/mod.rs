//! Output formatting for `shelf`.
//!
//! Supports both human-readable text output and machine-parseable JSON
//! (`--json`). Diagnostics always go to stderr.
//!
//! # JSON Output Types
//!
//! - [`BookDetails`] - Book with derived waitlist fields (show)
//! - [`CatalogSummary`] - Aggregate counts (list footer)

mod output;
mod text;

pub use output::{BookDetails, CatalogSummary};
pub use text::{
    fit_width, format_book_line, format_export_row, format_status_icon, format_waitlist,
};

/// Print a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> crate::error::Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    println!("{payload}");
    Ok(())
}
