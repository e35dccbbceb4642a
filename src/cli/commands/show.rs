//! Show command implementation.

use crate::cli::ShowArgs;
use crate::config::CatalogContext;
use crate::error::Result;
use crate::format::{BookDetails, format_waitlist, print_json};

/// Execute the show command.
///
/// # Errors
///
/// Returns `NotFound` if the key is absent.
pub fn execute(args: &ShowArgs, ctx: &CatalogContext, json: bool) -> Result<()> {
    let book = ctx.catalog.get_book(&args.key)?;

    if json {
        return print_json(&BookDetails::from(book));
    }

    println!("{}", book.key);
    println!("  Title:    {}", book.title);
    println!("  Author:   {}", book.author);
    match (&book.borrower, book.borrowed_at) {
        (Some(borrower), Some(since)) => println!(
            "  Status:   borrowed by {borrower} since {}",
            since.format("%Y-%m-%d %H:%M")
        ),
        (Some(borrower), None) => println!("  Status:   borrowed by {borrower}"),
        _ => println!("  Status:   {}", book.status),
    }
    println!("  Waitlist: {}", format_waitlist(&book.waitlist));
    println!("  Added:    {}", book.added_at.format("%Y-%m-%d"));
    Ok(())
}
