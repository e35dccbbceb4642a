use crate::cli::SearchArgs;
use crate::config::CatalogContext;
use crate::error::{Result, ShelfError};
use crate::format::{format_book_line, print_json};

/// Execute the search command.
///
/// # Errors
///
/// Returns `Validation` if the search term is blank.
pub fn execute(args: &SearchArgs, ctx: &CatalogContext, json: bool) -> Result<()> {
    if args.term.trim().is_empty() {
        return Err(ShelfError::validation("term", "cannot be empty"));
    }

    let results = ctx.catalog.search_books(&args.term);

    if json {
        print_json(&results)?;
    } else if results.is_empty() {
        println!("No books match '{}'.", args.term.trim());
    } else {
        for book in &results {
            println!("{}", format_book_line(book));
        }
        println!("\n{} match(es)", results.len());
    }
    Ok(())
}
