//! Shared helpers for the end-to-end tests.
//!
//! Each test file pulls this in with `mod common;`; not every file uses
//! every helper.

#![allow(dead_code)]

pub mod cli;
