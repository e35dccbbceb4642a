//! Error types for `shelf`.
//!
//! The catalog library owns the error enum; the binary re-exports it so
//! commands and the library speak the same `Result`.

pub use shelf_lib::error::{Result, ShelfError, ValidationError};
