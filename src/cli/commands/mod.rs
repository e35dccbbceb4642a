//! Command implementations.
//!
//! Catalog commands take the open [`CatalogContext`](crate::config::CatalogContext)
//! and never save it themselves; `cli::run_command` does that afterwards.

pub mod add;
pub mod borrow;
pub mod completions;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod remove;
pub mod return_book;
pub mod search;
pub mod shell;
pub mod show;
