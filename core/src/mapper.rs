//! Entry points: flat rows in, nested records out.

use compact_str::CompactString;

use crate::config::RelationshipConfig;
use crate::error::{ConfigError, Result};
use crate::flatten::flatten_all;
use crate::materialize::Materializer;
use crate::node::Object;
use crate::project::project_all;
use crate::row::FlatRow;

/// Maps rows into generic nested records using the default delimiter.
///
/// ```
/// use unjoin_core::{map, ConfigBuilder, FlatRow};
///
/// let config = ConfigBuilder::new()
///     .table("user")
///     .table("address")
///     .parent("user")
///     .foreign_key("user_id")
///     .many_to_one()
///     .finalize()
///     .unwrap();
///
/// let rows = [
///     FlatRow::new().with("user-id", 1).with("address-id", 1).with("address-user_id", 1),
///     FlatRow::new().with("user-id", 1).with("address-id", 2).with("address-user_id", 1),
/// ];
///
/// let users = map(&config, &rows).unwrap();
/// assert_eq!(users.len(), 1);
/// assert_eq!(users[0].get("address").and_then(|a| a.as_list()).map(<[_]>::len), Some(2));
/// ```
pub fn map<T>(config: &RelationshipConfig<T>, rows: &[FlatRow]) -> Result<Vec<Object>> {
    Mapper::new().map(config, rows)
}

/// [`map`] with an explicit column delimiter.
pub fn map_with<T>(
    config: &RelationshipConfig<T>,
    rows: &[FlatRow],
    delimiter: &str,
) -> Result<Vec<Object>> {
    Mapper::with_delimiter(delimiter)?.map(config, rows)
}

/// Maps rows into root-typed values using the default delimiter.
pub fn map_struct<T>(config: &RelationshipConfig<T>, rows: &[FlatRow]) -> Result<Vec<T>> {
    Mapper::new().map_struct(config, rows)
}

/// [`map_struct`] with an explicit column delimiter.
pub fn map_struct_with<T>(
    config: &RelationshipConfig<T>,
    rows: &[FlatRow],
    delimiter: &str,
) -> Result<Vec<T>> {
    Mapper::with_delimiter(delimiter)?.map_struct(config, rows)
}

/// Reusable mapping options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapper {
    materializer: Materializer,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    pub fn new() -> Self {
        Self {
            materializer: Materializer::new(),
        }
    }

    /// Fails with [`ConfigError::EmptyDelimiter`] for an empty delimiter.
    pub fn with_delimiter(delimiter: impl Into<CompactString>) -> core::result::Result<Self, ConfigError> {
        Ok(Self {
            materializer: Materializer::with_delimiter(delimiter)?,
        })
    }

    #[inline]
    pub fn delimiter(&self) -> &str {
        self.materializer.delimiter()
    }

    /// Generic mode: one [`Object`] per distinct root primary key, in
    /// first-seen order.
    pub fn map<T>(&self, config: &RelationshipConfig<T>, rows: &[FlatRow]) -> Result<Vec<Object>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let roots = self.materializer.materialize(config, rows);
        Ok(flatten_all(roots))
    }

    /// Typed mode: the root projector's output per root record.
    ///
    /// The root table must have a projector; this is checked before any row
    /// is read.
    pub fn map_struct<T>(&self, config: &RelationshipConfig<T>, rows: &[FlatRow]) -> Result<Vec<T>> {
        let root = config.root();
        if !root.has_projector() {
            return Err(ConfigError::MissingRootProjector(root.alias.clone()).into());
        }
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let roots = self.materializer.materialize(config, rows);
        project_all(config, roots)
    }

    /// Non-nested mode: every table's grouped records keyed by output name.
    pub fn group_tables<T>(&self, config: &RelationshipConfig<T>, rows: &[FlatRow]) -> Object {
        self.materializer.group_tables(config, rows)
    }
}

impl From<Materializer> for Mapper {
    fn from(materializer: Materializer) -> Self {
        Self { materializer }
    }
}
