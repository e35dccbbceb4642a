use shelf_lib::BookUpdate;

use crate::cli::EditArgs;
use crate::config::CatalogContext;
use crate::error::Result;
use crate::format::{format_book_line, print_json};

/// Execute the edit command.
///
/// # Errors
///
/// Returns `NotFound`, `NothingToDo` when no field flag is given, or
/// `Validation` for blank values.
pub fn execute(args: &EditArgs, ctx: &mut CatalogContext, json: bool) -> Result<()> {
    let update = BookUpdate {
        title: args.title.clone(),
        author: args.author.clone(),
    };
    let book = ctx.catalog.update_book(&args.key, &update)?;

    if json {
        print_json(&book)?;
    } else {
        println!("Updated {}", format_book_line(&book));
    }
    Ok(())
}
