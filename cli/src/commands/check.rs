//! Check command - validates the mapping file

use std::path::Path;

use unjoin_core::TableDescriptor;

use crate::config::Config;
use crate::error::CliError;
use crate::output;

pub fn run(config: &Config, path: &Path) -> Result<(), CliError> {
    let relationships = config.relationships()?;
    let mapper = config.mapper()?;

    println!("{}", output::heading("Checking mapping..."));
    println!();
    println!("  {}: {}", output::label("Config"), path.display());
    println!("  {}: {:?}", output::label("Delimiter"), mapper.delimiter());
    println!("  {}: {}", output::label("Root"), relationships.root().alias());
    println!("  {}: {}", output::label("Tables"), relationships.len());

    println!();
    println!("  {}", output::label("Processing order"));
    for (position, table) in relationships.processing_order().enumerate() {
        println!("    {}. {}", position + 1, describe(table));
    }

    let unattached: Vec<_> = relationships
        .iter()
        .skip(1)
        .filter(|t| t.parent().is_none())
        .map(TableDescriptor::alias)
        .collect();
    if !unattached.is_empty() {
        println!();
        println!(
            "  {} {}",
            output::muted("Not nested (only in --raw output):"),
            unattached.join(", ")
        );
    }

    println!();
    println!("  {} {}", output::status_ok(), output::success("Mapping is valid"));
    tracing::debug!(tables = relationships.len(), "mapping checked");
    Ok(())
}

fn describe<T>(table: &TableDescriptor<T>) -> String {
    let mut line = table.alias().to_string();
    if let (Some(parent), Some(kind)) = (table.parent(), table.kind()) {
        line.push_str(&format!(" -> {parent} ({kind}"));
        if let Some(rename) = table.rename() {
            line.push_str(&format!(", as {rename}"));
        }
        line.push(')');
    }
    let excluded: Vec<_> = table.excluded_fields().collect();
    if !excluded.is_empty() {
        line.push_str(&output::muted(&format!(" without {}", excluded.join(", "))));
    }
    line
}
