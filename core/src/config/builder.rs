//! Incremental construction of a [`RelationshipConfig`].

use std::sync::Arc;

use compact_str::CompactString;

use super::order::processing_order;
use super::table::{RelationKind, TableDescriptor};
use super::RelationshipConfig;
use crate::error::{ConfigError, Result};
use crate::node::Node;
use crate::project::Attributes;

/// Builder for a [`RelationshipConfig`].
///
/// `table(..)` registers a table and makes it current; every other
/// table-scoped call applies to the current table. The first registered table
/// is the root. Mistakes are recorded and reported by [`finalize`](Self::finalize),
/// so calls can be chained freely.
///
/// ```
/// use unjoin_core::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .table("user")
///     .table("address")
///     .parent("user")
///     .foreign_key("user_id")
///     .many_to_one()
///     .remove_link_key()
///     .finalize()
///     .unwrap();
///
/// assert_eq!(config.root().alias(), "user");
/// ```
pub struct ConfigBuilder<T = Node> {
    tables: Vec<TableDescriptor<T>>,
    current: Option<usize>,
    default_primary_key: CompactString,
    auto_remove_link_key: bool,
    error: Option<ConfigError>,
}

impl ConfigBuilder<Node> {
    /// Creates a builder for generic (untyped) mapping.
    pub fn new() -> Self {
        Self::typed()
    }
}

impl<T> Default for ConfigBuilder<T> {
    fn default() -> Self {
        Self::typed()
    }
}

impl<T> ConfigBuilder<T> {
    /// Creates a builder whose projectors produce `T`.
    pub fn typed() -> Self {
        Self {
            tables: Vec::new(),
            current: None,
            default_primary_key: CompactString::const_new("id"),
            auto_remove_link_key: false,
            error: None,
        }
    }

    /// Primary key given to tables registered after this call (default `id`).
    pub fn default_primary_key(mut self, field: impl Into<CompactString>) -> Self {
        self.default_primary_key = field.into();
        self
    }

    /// When enabled, `foreign_key(..)` also excludes that field from output.
    pub fn auto_remove_link_key(mut self, enabled: bool) -> Self {
        self.auto_remove_link_key = enabled;
        self
    }

    /// Registers a table under `alias` and makes it current.
    pub fn table(self, alias: impl Into<CompactString>) -> Self {
        let primary_key = self.default_primary_key.clone();
        self.register(alias.into(), primary_key)
    }

    /// Registers a table with an explicit primary key and makes it current.
    pub fn table_with_key(
        self,
        alias: impl Into<CompactString>,
        primary_key: impl Into<CompactString>,
    ) -> Self {
        self.register(alias.into(), primary_key.into())
    }

    fn register(mut self, alias: CompactString, primary_key: CompactString) -> Self {
        if self.tables.iter().any(|t| t.alias == alias) {
            self.fail(ConfigError::DuplicateTable(alias));
            return self;
        }
        self.tables.push(TableDescriptor::new(alias, primary_key));
        self.current = Some(self.tables.len() - 1);
        self
    }

    pub fn primary_key(self, field: impl Into<CompactString>) -> Self {
        let field = field.into();
        self.update("primary_key", |t| t.primary_key = field)
    }

    /// Nests the current table under `parent` (an alias, or a parent's rename).
    pub fn parent(self, parent: impl Into<CompactString>) -> Self {
        let parent = parent.into();
        self.update("parent", |t| t.parent = Some(parent))
    }

    /// Alias of [`parent`](Self::parent).
    pub fn move_under(self, parent: impl Into<CompactString>) -> Self {
        self.parent(parent)
    }

    /// Field of the current table holding the parent's primary key.
    pub fn foreign_key(self, field: impl Into<CompactString>) -> Self {
        let field = field.into();
        let auto_remove = self.auto_remove_link_key;
        self.update("foreign_key", |t| {
            if auto_remove {
                t.exclude(field.clone());
            }
            t.foreign_key = Some(field);
        })
    }

    pub fn kind(self, kind: RelationKind) -> Self {
        self.update("kind", |t| t.kind = Some(kind))
    }

    pub fn one_to_one(self) -> Self {
        self.kind(RelationKind::OneToOne)
    }

    pub fn one_to_many(self) -> Self {
        self.kind(RelationKind::OneToMany)
    }

    pub fn many_to_one(self) -> Self {
        self.kind(RelationKind::ManyToOne)
    }

    pub fn many_to_many(self) -> Self {
        self.kind(RelationKind::ManyToMany)
    }

    /// Key to use for the current table in output instead of its alias.
    pub fn rename(self, name: impl Into<CompactString>) -> Self {
        let name = name.into();
        self.update("rename", |t| t.rename = Some(name))
    }

    /// Drops `field` from the current table's output records.
    pub fn remove(self, field: impl Into<CompactString>) -> Self {
        let field = field.into();
        self.update("remove", |t| t.exclude(field))
    }

    pub fn remove_all<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.update("remove_all", |t| {
            for field in fields {
                t.exclude(field.into());
            }
        })
    }

    /// Drops the current table's foreign key from its output records.
    pub fn remove_link_key(mut self) -> Self {
        let Some(index) = self.current_index("remove_link_key") else {
            return self;
        };
        let table = &mut self.tables[index];
        if let Some(fk) = table.foreign_key.clone() {
            table.exclude(fk);
        }
        self
    }

    /// Converts the current table's records into `T` during typed mapping.
    pub fn project<F>(self, projector: F) -> Self
    where
        F: Fn(Attributes<T>) -> Result<T> + Send + Sync + 'static,
    {
        self.update("project", |t| t.projector = Some(Arc::new(projector)))
    }

    /// Validates the tables and computes the processing order.
    pub fn finalize(self) -> core::result::Result<RelationshipConfig<T>, ConfigError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let tables = self.tables;
        let root = tables.first().ok_or(ConfigError::Empty)?;
        if root.parent.is_some() {
            return Err(ConfigError::RootHasParent(root.alias.clone()));
        }

        let mut parents = Vec::with_capacity(tables.len());
        parents.push(None);
        for table in &tables[1..] {
            let Some(parent) = table.parent.as_deref() else {
                parents.push(None);
                continue;
            };
            let index = resolve_parent(&tables, parent).ok_or_else(|| {
                ConfigError::UnknownParent {
                    table: table.alias.clone(),
                    parent: parent.into(),
                }
            })?;
            if table.foreign_key.is_none() {
                return Err(ConfigError::MissingForeignKey(table.alias.clone()));
            }
            if table.kind.is_none() {
                return Err(ConfigError::MissingRelationKind(table.alias.clone()));
            }
            if let Some(sibling) = (1..parents.len()).find(|&i| {
                parents[i] == Some(index) && tables[i].output_name() == table.output_name()
            }) {
                return Err(ConfigError::DuplicateOutputName {
                    parent: tables[index].alias.clone(),
                    name: table.output_name().into(),
                    first: tables[sibling].alias.clone(),
                    second: table.alias.clone(),
                });
            }
            parents.push(Some(index));
        }

        let order = processing_order(&parents).map_err(|stuck| {
            ConfigError::Cycle(stuck.into_iter().map(|i| tables[i].alias.clone()).collect())
        })?;

        Ok(RelationshipConfig {
            tables,
            parents,
            order,
        })
    }

    fn fail(&mut self, error: ConfigError) {
        self.error.get_or_insert(error);
    }

    fn current_index(&mut self, operation: &'static str) -> Option<usize> {
        if self.current.is_none() {
            self.fail(ConfigError::NoCurrentTable { operation });
        }
        self.current
    }

    fn update(
        mut self,
        operation: &'static str,
        apply: impl FnOnce(&mut TableDescriptor<T>),
    ) -> Self {
        if let Some(index) = self.current_index(operation) {
            apply(&mut self.tables[index]);
        }
        self
    }
}

fn resolve_parent<T>(tables: &[TableDescriptor<T>], parent: &str) -> Option<usize> {
    tables
        .iter()
        .position(|t| t.alias == parent)
        .or_else(|| tables.iter().position(|t| t.rename.as_deref() == Some(parent)))
}
