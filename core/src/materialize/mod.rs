//! Grouping and nesting of flat rows.
//!
//! [`Materializer::group`] splits each row into one record per table,
//! dropping join duplicates. [`Materializer::nest`] then attaches every
//! table under its parent's records, deepest tables first, and returns the
//! root records.

mod group;
mod nest;

pub use group::Grouped;

use compact_str::CompactString;

use crate::config::RelationshipConfig;
use crate::entity::EntitySet;
use crate::error::ConfigError;
use crate::flatten::flatten;
use crate::node::{Node, Object};
use crate::row::{DEFAULT_DELIMITER, FlatRow};
use crate::unjoin_trace_pass;

/// Runs the grouping and nesting passes with per-invocation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materializer {
    delimiter: CompactString,
}

impl Default for Materializer {
    fn default() -> Self {
        Self {
            delimiter: CompactString::const_new(DEFAULT_DELIMITER),
        }
    }
}

impl Materializer {
    /// Creates a materializer splitting columns on [`DEFAULT_DELIMITER`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a materializer splitting columns on `delimiter`.
    pub fn with_delimiter(delimiter: impl Into<CompactString>) -> Result<Self, ConfigError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        Ok(Self { delimiter })
    }

    #[inline]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Grouping pass: one deduplicated record set per table.
    pub fn group<T>(&self, config: &RelationshipConfig<T>, rows: &[FlatRow]) -> Grouped {
        group::group(config, rows, &self.delimiter)
    }

    /// Nesting pass: attaches every table under its parent, returning the
    /// root records with root exclusions applied.
    pub fn nest<T>(&self, config: &RelationshipConfig<T>, grouped: Grouped) -> EntitySet {
        nest::nest(config, grouped)
    }

    /// [`group`](Self::group) followed by [`nest`](Self::nest).
    pub fn materialize<T>(&self, config: &RelationshipConfig<T>, rows: &[FlatRow]) -> EntitySet {
        let grouped = self.group(config, rows);
        self.nest(config, grouped)
    }

    /// Non-nested mode: every table's grouped records side by side.
    ///
    /// Keys are output names in registration order. Each value is the list
    /// of that table's records with its excluded fields removed, or null when
    /// the table matched no row.
    pub fn group_tables<T>(&self, config: &RelationshipConfig<T>, rows: &[FlatRow]) -> Object {
        let grouped = self.group(config, rows);
        unjoin_trace_pass!("group_tables", grouped.len());

        let mut tables = Object::new();
        for (table, set) in config.iter().zip(grouped.sets) {
            let node = match set {
                Some(set) => Node::List(
                    set.into_iter()
                        .map(|mut record| {
                            record.retain_fields(|field| !table.is_excluded(field));
                            Node::Object(flatten(record))
                        })
                        .collect(),
                ),
                None => Node::Null,
            };
            tables.insert(table.output_name(), node);
        }
        tables
    }
}
