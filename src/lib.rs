//! `shelf` - Library catalog manager
//!
//! This crate provides the command-line layer for the `shelf` tool; the
//! catalog itself lives in `shelf-lib`.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered configuration and catalog context
//! - [`error`] - Error types (re-exported from `shelf-lib`)
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;

pub use cli::run;
pub use error::{Result, ShelfError};
