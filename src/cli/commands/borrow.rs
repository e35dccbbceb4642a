use shelf_lib::BorrowOutcome;

use crate::cli::BorrowArgs;
use crate::config::CatalogContext;
use crate::error::Result;
use crate::format::print_json;

/// Execute the borrow command.
///
/// # Errors
///
/// Returns `NotFound`, `AlreadyBorrowed`, `AlreadyWaitlisted` or
/// `Validation` from the catalog.
pub fn execute(args: &BorrowArgs, ctx: &mut CatalogContext, json: bool) -> Result<()> {
    let outcome = ctx.catalog.borrow(&args.key, &args.requester)?;

    if json {
        return print_json(&outcome);
    }

    match &outcome {
        BorrowOutcome::Borrowed { key, borrower } => {
            println!("Borrowed '{key}' to {borrower}");
        }
        BorrowOutcome::Waitlisted {
            key,
            requester,
            position,
        } => {
            let holder = ctx
                .catalog
                .get_book(key)?
                .borrower
                .clone()
                .unwrap_or_default();
            println!(
                "'{key}' is on loan to {holder}; {requester} is #{position} on the waitlist"
            );
        }
    }
    Ok(())
}
