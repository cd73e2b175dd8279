//! Command-line argument definitions.

use clap::Parser;
use std::path::{Path, PathBuf};

use super::OutputFormat;

/// Query protobuf-encoded columns in SQLite using path extraction.
#[derive(Parser, Debug)]
#[command(name = "protosql")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// SQLite database to open (in-memory when omitted)
    #[arg(value_name = "DATABASE")]
    pub database: Option<PathBuf>,

    /// Schema bundle (FileDescriptorSet) to load; may be repeated
    #[arg(short = 'l', long = "load", value_name = "BUNDLE")]
    pub bundles: Vec<PathBuf>,

    /// Execute SQL and exit
    #[arg(short = 'e', long = "execute", value_name = "SQL", conflicts_with = "query_file")]
    pub query: Option<String>,

    /// Read SQL from file
    #[arg(short = 'f', long = "file", value_name = "QUERY_FILE")]
    pub query_file: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// List loaded message and enum types, then exit
    #[arg(long = "list-types")]
    pub list_types: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Where the SQL text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlSource<'a> {
    Inline(&'a str),
    File(&'a Path),
    Stdin,
}

impl Args {
    /// `-e` wins, then `-f`, otherwise stdin.
    pub fn sql_source(&self) -> SqlSource<'_> {
        match (&self.query, &self.query_file) {
            (Some(query), _) => SqlSource::Inline(query),
            (None, Some(file)) => SqlSource::File(file),
            (None, None) => SqlSource::Stdin,
        }
    }
}
