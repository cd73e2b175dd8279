//! protosql - Query protobuf-encoded columns in SQLite.
//!
//! The command-line front end over [`protosql_sqlite`]. It opens a database,
//! registers `protobuf_load`, `protobuf_extract` and `protobuf_enum`, loads
//! schema bundles and prints query results.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use protosql::cli::Session;
//! use protosql_core::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     let session = Session::open(None, Config::from_env())?;
//!     session.load_bundle(Path::new("addressbook.pb"))?;
//!     let results = session.run("SELECT number, name FROM protobuf_enum('Person.PhoneType')")?;
//!     // Process results...
//!     Ok(())
//! }
//! ```

pub mod cli;
