//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Opening a database with the extension registered
//! - Output formatting (table, CSV, JSON)

mod args;
mod output;
mod session;

pub use args::{Args, SqlSource};
pub use output::{OutputFormat, OutputFormatter, QueryResult};
pub use session::Session;
