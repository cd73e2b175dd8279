//! A SQLite connection with the protosql extension registered.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use protosql_core::{Config, DescriptorRegistry};
use rusqlite::types::Value;
use rusqlite::{Batch, Connection};
use tracing::{debug, info};

use super::output::QueryResult;

/// Connection plus the registry its functions resolve types against.
pub struct Session {
    conn: Connection,
    registry: Arc<DescriptorRegistry>,
}

impl Session {
    /// Open `database` (in-memory when `None`) and register the extension.
    ///
    /// Extension loading is switched on for this connection only, so that
    /// `protobuf_load` works from the command line.
    pub fn open(database: Option<&Path>, config: Config) -> Result<Self> {
        let conn = match database {
            Some(path) => Connection::open(path)
                .with_context(|| format!("Failed to open database: {}", path.display()))?,
            None => Connection::open_in_memory().context("Failed to open in-memory database")?,
        };

        let registry = Arc::new(DescriptorRegistry::with_config(config));
        protosql_sqlite::register(&conn, Arc::clone(&registry))
            .context("Failed to register protosql functions")?;
        protosql_sqlite::set_extension_loading(&conn, true)
            .context("Failed to enable schema loading")?;

        info!(
            database = %database.map(|p| p.display().to_string()).unwrap_or_else(|| ":memory:".into()),
            "Opened database"
        );
        Ok(Self { conn, registry })
    }

    /// Load a schema bundle through `protobuf_load`.
    pub fn load_bundle(&self, path: &Path) -> Result<()> {
        let path_text = path.to_string_lossy();
        self.conn
            .query_row("SELECT protobuf_load(?1)", [&*path_text], |row| {
                row.get::<_, Value>(0)
            })
            .with_context(|| format!("Failed to load schema bundle: {}", path.display()))?;
        Ok(())
    }

    /// Run every statement in `sql`, collecting the rows of those that
    /// return any.
    pub fn run(&self, sql: &str) -> Result<Vec<QueryResult>> {
        let mut results = Vec::new();

        for stmt in Batch::new(&self.conn, sql) {
            let mut stmt = stmt.context("Failed to prepare statement")?;

            if stmt.column_count() == 0 {
                let changed = stmt.execute([]).context("Statement failed")?;
                debug!(changed, "Executed statement");
                continue;
            }

            let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
            let width = columns.len();
            let rows = stmt
                .query_map([], |row| {
                    (0..width)
                        .map(|i| row.get::<_, Value>(i))
                        .collect::<rusqlite::Result<Vec<Value>>>()
                })
                .context("Query failed")?
                .collect::<rusqlite::Result<Vec<Vec<Value>>>>()
                .context("Query failed")?;

            results.push(QueryResult { columns, rows });
        }

        Ok(results)
    }

    pub fn registry(&self) -> &DescriptorRegistry {
        &self.registry
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
