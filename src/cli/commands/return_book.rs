use shelf_lib::ReturnOutcome;

use crate::cli::ReturnArgs;
use crate::config::CatalogContext;
use crate::error::Result;
use crate::format::print_json;

/// Execute the return command.
///
/// When someone is waiting, the book passes straight to them and the
/// output tells the operator whom to notify.
///
/// # Errors
///
/// Returns `NotFound` or `NotBorrowed` from the catalog.
pub fn execute(args: &ReturnArgs, ctx: &mut CatalogContext, json: bool) -> Result<()> {
    let outcome = ctx.catalog.return_book(&args.key)?;

    if json {
        return print_json(&outcome);
    }

    match &outcome {
        ReturnOutcome::Returned { key, previous } => {
            println!("Returned '{key}' from {previous}; it is available again");
        }
        ReturnOutcome::HandedOver {
            key,
            previous,
            next,
            remaining,
        } => {
            println!("Returned '{key}' from {previous}");
            println!("Notify {next}: '{key}' is now checked out to {next}");
            if *remaining > 0 {
                println!("{remaining} still waiting");
            }
        }
    }
    Ok(())
}
