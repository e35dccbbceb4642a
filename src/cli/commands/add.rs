use crate::cli::AddArgs;
use crate::config::CatalogContext;
use crate::error::Result;
use crate::format::{format_book_line, print_json};

/// Execute the add command.
///
/// # Errors
///
/// Returns `DuplicateKey` if the key is taken, or `Validation` if a field is blank.
pub fn execute(args: &AddArgs, ctx: &mut CatalogContext, json: bool) -> Result<()> {
    let book = match &args.key {
        Some(key) => ctx
            .catalog
            .add_book_with_key(key, &args.title, &args.author)?,
        None => ctx.catalog.add_book(&args.title, &args.author)?,
    };

    if json {
        print_json(&book)?;
    } else {
        println!("Added {}", format_book_line(&book));
    }
    Ok(())
}
