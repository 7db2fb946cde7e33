//! Map command - turns a JSON array of flat rows into nested records

use std::io::Read;
use std::path::Path;

use unjoin_core::{FlatRow, Mapper};

use crate::config::Config;
use crate::error::CliError;

/// Path that reads rows from stdin
pub const STDIN: &str = "-";

pub fn run(
    config: &Config,
    rows_path: &Path,
    delimiter_override: Option<&str>,
    raw: bool,
    pretty: bool,
    out: Option<&Path>,
) -> Result<(), CliError> {
    let relationships = config.relationships()?;
    let mapper = match delimiter_override {
        Some(delimiter) => Mapper::with_delimiter(delimiter).map_err(unjoin_core::Error::from)?,
        None => config.mapper()?,
    };

    let rows = read_rows(rows_path)?;
    tracing::debug!(rows = rows.len(), delimiter = mapper.delimiter(), "read rows");

    let rendered = if raw {
        let tables = mapper.group_tables(&relationships, &rows);
        tracing::info!(rows = rows.len(), tables = tables.len(), "grouped rows");
        render(&tables, pretty)?
    } else {
        let records = mapper.map(&relationships, &rows)?;
        tracing::info!(rows = rows.len(), records = records.len(), "mapped rows");
        render(&records, pretty)?
    };

    match out {
        Some(path) => std::fs::write(path, format!("{rendered}\n"))
            .map_err(|e| CliError::IoError(format!("{}: {e}", path.display())))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Reads a JSON array of flat row objects from a file, or stdin for `-`.
pub fn read_rows(path: &Path) -> Result<Vec<FlatRow>, CliError> {
    let source_name = path.display().to_string();
    let content = if path == Path::new(STDIN) {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| CliError::IoError(format!("stdin: {e}")))?;
        buffer
    } else {
        std::fs::read_to_string(path).map_err(|e| CliError::IoError(format!("{source_name}: {e}")))?
    };

    let invalid = |message: String| CliError::Rows {
        source_name: source_name.clone(),
        message,
    };

    let json: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
    let serde_json::Value::Array(items) = json else {
        return Err(invalid("expected a JSON array of row objects".into()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| FlatRow::try_from(item).map_err(|e| invalid(format!("row {index}: {e}"))))
        .collect()
}

fn render<S: serde::Serialize + ?Sized>(value: &S, pretty: bool) -> Result<String, CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| CliError::Other(format!("failed to render output: {e}")))
}
