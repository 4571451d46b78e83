//! Tooling & Integration Layer
//!
//! Command-line entry points over the portal command service.

pub mod cli;

pub use cli::{Cli, CliContext, Commands, PurchaseCommands, SheetCommands};
