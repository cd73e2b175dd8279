//! protosql CLI entry point.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use protosql::cli::{Args, OutputFormatter, Session, SqlSource};
use protosql_core::Config;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let session = Session::open(args.database.as_deref(), Config::from_env())?;
    for bundle in &args.bundles {
        session.load_bundle(bundle)?;
    }

    if args.list_types {
        list_types(&session);
        return Ok(());
    }

    let sql = match args.sql_source() {
        SqlSource::Inline(query) => query.to_string(),
        SqlSource::File(query_file) => std::fs::read_to_string(query_file)
            .with_context(|| format!("Failed to read query file: {}", query_file.display()))?,
        SqlSource::Stdin => {
            let mut sql = String::new();
            io::stdin()
                .read_to_string(&mut sql)
                .context("Failed to read SQL from stdin")?;
            sql
        }
    };

    let formatter = OutputFormatter::new(args.format);
    let mut stdout = io::stdout();
    for result in session.run(&sql)? {
        formatter.write(&result, &mut stdout)?;
    }

    Ok(())
}

fn list_types(session: &Session) {
    let registry = session.registry();

    println!("Message Types:");
    println!("{:-<50}", "");
    for name in registry.message_names() {
        println!("  {name}");
        if let Ok(message) = registry.resolve_message(&name) {
            for field in message.fields() {
                println!("    {field};");
            }
        }
    }

    println!();
    println!("Enum Types:");
    println!("{:-<50}", "");
    for name in registry.enum_names() {
        println!("  {name}");
    }
}
