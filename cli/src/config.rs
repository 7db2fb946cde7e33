//! Configuration for the unjoin CLI
//!
//! Handles loading `unjoin.toml`, the mapping between flat row columns and
//! nested output.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use unjoin_core::{ConfigBuilder, Mapper, RelationKind, RelationshipConfig};

pub const CONFIG_FILE: &str = "unjoin.toml";

// ============================================================================
// Kind
// ============================================================================

/// Relationship kind as written in the mapping file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    #[serde(alias = "one_to_one")]
    OneToOne,
    #[serde(alias = "one_to_many")]
    OneToMany,
    #[serde(alias = "many_to_one")]
    ManyToOne,
    #[serde(alias = "many_to_many")]
    ManyToMany,
}

impl From<Kind> for RelationKind {
    #[inline]
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::OneToOne => RelationKind::OneToOne,
            Kind::OneToMany => RelationKind::OneToMany,
            Kind::ManyToOne => RelationKind::ManyToOne,
            Kind::ManyToMany => RelationKind::ManyToMany,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(RelationKind::from(*self).as_str())
    }
}

// ============================================================================
// Table
// ============================================================================

/// One `[[tables]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Table {
    /// Column prefix in the flat rows
    pub alias: String,
    /// Overrides the file-wide `defaultPrimaryKey`
    pub primary_key: Option<String>,
    #[serde(alias = "moveUnder")]
    pub parent: Option<String>,
    pub foreign_key: Option<String>,
    pub kind: Option<Kind>,
    pub rename: Option<String>,
    #[serde(default)]
    pub remove: Vec<String>,
    /// Drop `foreignKey` from this table's output
    #[serde(default)]
    pub remove_link_key: bool,
}

// ============================================================================
// Config
// ============================================================================

fn default_delimiter() -> String {
    unjoin_core::DEFAULT_DELIMITER.to_string()
}

fn default_primary_key() -> String {
    "id".to_string()
}

/// Parsed `unjoin.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_primary_key")]
    pub default_primary_key: String,
    #[serde(default)]
    pub auto_remove_link_key: bool,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Config {
    /// Load from default location
    pub fn load() -> Result<Self, Error> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load from specific path
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.into())
            } else {
                Error::Io(path.into(), e)
            }
        })?;

        let config: Self =
            toml::from_str(&content).map_err(|e| Error::Parse(path.into(), e))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the delimiter and every table relationship.
    pub fn validate(&self) -> Result<(), Error> {
        self.mapper()?;
        self.relationships()?;
        Ok(())
    }

    /// Builds the relationship config described by `[[tables]]`.
    pub fn relationships(&self) -> Result<RelationshipConfig, Error> {
        let mut builder = ConfigBuilder::new()
            .default_primary_key(self.default_primary_key.as_str())
            .auto_remove_link_key(self.auto_remove_link_key);

        for table in &self.tables {
            builder = match &table.primary_key {
                Some(key) => builder.table_with_key(table.alias.as_str(), key.as_str()),
                None => builder.table(table.alias.as_str()),
            };
            if let Some(parent) = &table.parent {
                builder = builder.parent(parent.as_str());
            }
            if let Some(foreign_key) = &table.foreign_key {
                builder = builder.foreign_key(foreign_key.as_str());
            }
            if let Some(kind) = table.kind {
                builder = builder.kind(kind.into());
            }
            if let Some(rename) = &table.rename {
                builder = builder.rename(rename.as_str());
            }
            builder = builder.remove_all(table.remove.iter().map(String::as_str));
            if table.remove_link_key {
                builder = builder.remove_link_key();
            }
        }

        builder.finalize().map_err(Error::Invalid)
    }

    /// Mapping options with this file's delimiter.
    pub fn mapper(&self) -> Result<Mapper, Error> {
        Mapper::with_delimiter(self.delimiter.as_str()).map_err(Error::Invalid)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid mapping: {0}")]
    Invalid(#[source] unjoin_core::ConfigError),
}

pub type ConfigError = Error;

// ============================================================================
// Tests
// ============================================================================
