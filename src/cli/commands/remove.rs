use crate::cli::RemoveArgs;
use crate::config::CatalogContext;
use crate::error::Result;
use crate::format::print_json;

/// Execute the remove command.
///
/// # Errors
///
/// Returns `NotFound`, or `StillBorrowed` if the book is on loan.
pub fn execute(args: &RemoveArgs, ctx: &mut CatalogContext, json: bool) -> Result<()> {
    let book = ctx.catalog.remove_book(&args.key)?;

    if json {
        print_json(&book)?;
    } else {
        println!("Removed '{}' ({} by {})", book.key, book.title, book.author);
    }
    Ok(())
}
