//! Relationship metadata.
//!
//! A [`RelationshipConfig`] is an ordered set of [`TableDescriptor`]s built
//! with a [`ConfigBuilder`]. The first registered table is the root; every
//! output record is one instance of it. Once finalized the config is
//! read-only and can be shared across threads and reused for any number of
//! mapping calls.

mod builder;
mod order;
mod table;

pub use builder::ConfigBuilder;
pub use table::{Projector, RelationKind, TableDescriptor};

use crate::node::Node;

/// Finalized, validated relationship metadata.
pub struct RelationshipConfig<T = Node> {
    pub(crate) tables: Vec<TableDescriptor<T>>,
    /// Resolved parent index per table; `None` for the root and unattached tables
    pub(crate) parents: Vec<Option<usize>>,
    /// Root first, then every table before its parent
    pub(crate) order: Vec<usize>,
}

impl<T> RelationshipConfig<T> {
    /// The first registered table.
    #[inline]
    pub fn root(&self) -> &TableDescriptor<T> {
        &self.tables[0]
    }

    pub fn get(&self, alias: &str) -> Option<&TableDescriptor<T>> {
        self.tables.iter().find(|t| t.alias() == alias)
    }

    /// Tables in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TableDescriptor<T>> {
        self.tables.iter()
    }

    /// Tables in the order the nesting pass handles them.
    pub fn processing_order(&self) -> impl Iterator<Item = &TableDescriptor<T>> {
        self.order.iter().map(|&i| &self.tables[i])
    }

    /// The table `alias` is attached under, after resolving renames.
    pub fn parent_of(&self, alias: &str) -> Option<&TableDescriptor<T>> {
        let index = self.tables.iter().position(|t| t.alias() == alias)?;
        self.parents[index].map(|p| &self.tables[p])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Always false for a finalized config; the root is mandatory.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<T> Clone for RelationshipConfig<T> {
    fn clone(&self) -> Self {
        Self {
            tables: self.tables.clone(),
            parents: self.parents.clone(),
            order: self.order.clone(),
        }
    }
}

impl<T> core::fmt::Debug for RelationshipConfig<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RelationshipConfig")
            .field("tables", &self.tables)
            .field("order", &self.order)
            .finish()
    }
}
