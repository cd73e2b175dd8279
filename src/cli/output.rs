//! Output formatting for query results.
//!
//! Renders SQLite result rows as a table, CSV or JSON Lines. BLOB values,
//! which is what `protobuf_extract` returns for messages, are shown as hex.

use std::io::Write;

use clap::ValueEnum;
use rusqlite::types::Value;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table (default)
    Table,
    /// Comma-separated values
    Csv,
    /// JSON Lines (one JSON object per row)
    Json,
}

/// Rows produced by one SQL statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Formats query results for output.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new formatter with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format a result set and write to the given writer.
    pub fn write<W: Write>(&self, result: &QueryResult, writer: &mut W) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Table => self.write_table(result, writer),
            OutputFormat::Csv => self.write_csv(result, writer),
            OutputFormat::Json => self.write_json(result, writer),
        }
    }

    /// Format a single cell value for text output.
    fn format_value(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Integer(i) => i.to_string(),
            Value::Real(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::Blob(b) => hex::encode(b),
        }
    }

    fn write_table<W: Write>(&self, result: &QueryResult, writer: &mut W) -> std::io::Result<()> {
        use comfy_table::{Cell, Table};

        let mut table = Table::new();
        table.set_header(result.columns.iter().map(Cell::new));

        for row in &result.rows {
            table.add_row(row.iter().map(|v| Cell::new(Self::format_value(v))));
        }

        writeln!(writer, "{table}")
    }

    fn write_csv<W: Write>(&self, result: &QueryResult, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", result.columns.join(","))?;

        for row in &result.rows {
            let values: Vec<String> = row
                .iter()
                .map(|v| {
                    let value = Self::format_value(v);
                    // Escape commas and quotes
                    if value.contains(',') || value.contains('"') || value.contains('\n') {
                        format!("\"{}\"", value.replace('"', "\"\""))
                    } else {
                        value
                    }
                })
                .collect();
            writeln!(writer, "{}", values.join(","))?;
        }

        Ok(())
    }

    fn write_json<W: Write>(&self, result: &QueryResult, writer: &mut W) -> std::io::Result<()> {
        for row in &result.rows {
            let mut obj = serde_json::Map::new();
            for (name, value) in result.columns.iter().zip(row) {
                let json_value = match value {
                    Value::Null => serde_json::Value::Null,
                    Value::Integer(i) => serde_json::Value::Number((*i).into()),
                    Value::Real(f) => serde_json::Number::from_f64(*f)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null),
                    Value::Text(s) => serde_json::Value::String(s.clone()),
                    Value::Blob(b) => serde_json::Value::String(hex::encode(b)),
                };
                obj.insert(name.clone(), json_value);
            }

            writeln!(writer, "{}", serde_json::Value::Object(obj))?;
        }

        Ok(())
    }
}
