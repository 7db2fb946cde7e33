//! Init command - writes a starter mapping file

use std::path::Path;

use crate::config::CONFIG_FILE;
use crate::error::CliError;
use crate::output;

const TEMPLATE: &str = r#"# unjoin mapping
#
# Columns in each row are named <alias><delimiter><attribute>, e.g. user-id.
# The first table is the root: one output record per distinct primary key.

delimiter = "-"
defaultPrimaryKey = "id"
autoRemoveLinkKey = false

[[tables]]
alias = "user"

[[tables]]
alias = "address"
parent = "user"
foreignKey = "user_id"
# one-to-one | one-to-many keep the first match; many-to-one | many-to-many keep a list
kind = "many-to-one"
removeLinkKey = true
"#;

pub fn run(path: Option<&Path>) -> Result<(), CliError> {
    let path = path.unwrap_or(Path::new(CONFIG_FILE));
    if path.exists() {
        return Err(CliError::Other(format!(
            "{} already exists. Delete it first to reinitialize.",
            path.display()
        )));
    }

    std::fs::write(path, TEMPLATE).map_err(|e| CliError::IoError(e.to_string()))?;

    println!("{}", output::success(&format!("Created {}", path.display())));
    println!();
    println!("Next steps:");
    println!("  1. Describe your join's tables in {}", path.display());
    println!("  2. Run {} to validate it", output::heading("unjoin check"));
    println!("  3. Run {} to map a row file", output::heading("unjoin map rows.json"));
    Ok(())
}
