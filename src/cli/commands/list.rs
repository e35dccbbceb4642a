//! List command implementation.
//!
//! Primary inventory view: availability filter, author filter, sorting,
//! and a summary footer in text mode.

use shelf_lib::{Availability, ListQuery, SortKey};

use crate::cli::ListArgs;
use crate::config::CatalogContext;
use crate::error::Result;
use crate::format::{CatalogSummary, format_book_line, print_json};

/// Execute the list command.
///
/// # Errors
///
/// Returns `Validation` if the sort field is unknown.
pub fn execute(args: &ListArgs, ctx: &CatalogContext, json: bool) -> Result<()> {
    let query = build_query(args, ctx.config.list_sort)?;
    let books = ctx.catalog.query_books(&query);

    if json {
        print_json(&books)?;
    } else if books.is_empty() {
        println!("No books found.");
    } else {
        for book in &books {
            println!("{}", format_book_line(book));
        }
        let summary = CatalogSummary::from_books(books.iter().copied());
        println!(
            "\n{} book(s): {} available, {} borrowed, {} waiting",
            summary.total, summary.available, summary.borrowed, summary.waiting
        );
    }

    Ok(())
}

/// Convert CLI args to a catalog query.
fn build_query(args: &ListArgs, default_sort: SortKey) -> Result<ListQuery> {
    let availability = if args.available {
        Availability::AvailableOnly
    } else if args.borrowed {
        Availability::BorrowedOnly
    } else {
        Availability::All
    };

    let sort = match &args.sort {
        Some(field) => field.parse::<SortKey>()?,
        None => default_sort,
    };

    Ok(ListQuery {
        availability,
        author_contains: args.author.clone(),
        sort,
        reverse: args.reverse,
        limit: args.limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_lib::ShelfError;

    #[test]
    fn test_build_query_defaults() {
        let query = build_query(&ListArgs::default(), SortKey::Author).unwrap();
        assert_eq!(query.availability, Availability::All);
        assert_eq!(query.sort, SortKey::Author);
        assert!(!query.reverse);
    }

    #[test]
    fn test_build_query_available_and_sort_alias() {
        let args = ListArgs {
            available: true,
            sort: Some("name".to_string()),
            limit: Some(3),
            ..Default::default()
        };
        let query = build_query(&args, SortKey::Key).unwrap();
        assert_eq!(query.availability, Availability::AvailableOnly);
        assert_eq!(query.sort, SortKey::Title);
        assert_eq!(query.limit, Some(3));
    }

    #[test]
    fn test_build_query_bad_sort() {
        let args = ListArgs {
            sort: Some("pages".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build_query(&args, SortKey::Key),
            Err(ShelfError::Validation { .. })
        ));
    }
}
