//! CLI module
//!
//! Command-line interface over the session client.
//!
//! # Commands
//!
//! - `loans` - List loans on the primary market
//! - `loan` - Show one loan
//! - `investments` - List current or finished investments
//! - `logout` - Forget the stored credential

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
