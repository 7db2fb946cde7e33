//! unjoin CLI - nest flat join rows from the command line
//!
//! Reads a JSON array of flat row objects (the output of a multi-table join,
//! columns named `<alias><delimiter><attribute>`) and prints nested JSON
//! records. Table relationships live in an `unjoin.toml` file.
//!
//! # Quick Start
//!
//! 1. Run `unjoin init` to create an `unjoin.toml`
//! 2. Describe the join's tables
//! 3. Run `unjoin map rows.json --pretty`
//!
//! # Configuration
//!
//! ```toml
//! delimiter = "-"
//! defaultPrimaryKey = "id"
//!
//! [[tables]]
//! alias = "user"
//!
//! [[tables]]
//! alias = "role"
//! parent = "user"
//! foreignKey = "user_id"
//! kind = "many-to-many"
//! rename = "roles"
//! removeLinkKey = true
//! ```
//!
//! # Commands
//!
//! - `unjoin init` - Create a new unjoin.toml
//! - `unjoin check` - Validate the mapping and print the processing order
//! - `unjoin map <ROWS>` - Nest a row file (`-` reads stdin)
//! - `unjoin map <ROWS> --raw` - Distinct records per table, without nesting

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use config::{Config, Error as ConfigError};
pub use error::CliError;
