//! Command modules for the utf8lex CLI.
//!
//! This module contains implementations for all available subcommands.
//! Each subcommand is implemented in its own file following a standardized pattern.

pub mod common;
pub mod traits;

pub mod check;
pub mod generate;
pub mod init;

// Re-export command types and functions (used by main.rs)
#[allow(unused_imports)]
pub use check::{run_check, CheckArgs, CheckedToken};
#[allow(unused_imports)]
pub use generate::{run_generate, GenerateArgs};
#[allow(unused_imports)]
pub use init::{run_init, InitArgs};
