//! Grouping pass: split every flat row into per-table records.

use compact_str::CompactString;

use crate::config::{RelationshipConfig, TableDescriptor};
use crate::entity::{Entity, EntitySet, Slot};
use crate::row::FlatRow;
use crate::{unjoin_profile_function, unjoin_trace_pass};

/// Per-table record sets produced by the grouping pass.
///
/// Indexed by registration position in the config the rows were grouped
/// against. A table that produced no record from any row holds `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouped {
    pub(crate) sets: Vec<Option<EntitySet>>,
}

impl Grouped {
    /// Record set of the table registered at `index`.
    pub fn table(&self, index: usize) -> Option<&EntitySet> {
        self.sets.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Record sets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&EntitySet>> {
        self.sets.iter().map(Option::as_ref)
    }
}

pub(crate) fn group<T>(
    config: &RelationshipConfig<T>,
    rows: &[FlatRow],
    delimiter: &str,
) -> Grouped {
    unjoin_profile_function!();
    unjoin_trace_pass!("group", rows.len());

    let mut sets: Vec<Option<EntitySet>> = vec![None; config.len()];
    for row in rows {
        for (index, table) in config.tables.iter().enumerate() {
            let Some((key, entity)) = extract(row, index, table, delimiter) else {
                continue;
            };
            let set = sets[index].get_or_insert_with(EntitySet::new);
            if table.is_multi_link() {
                set.push(entity);
            } else {
                set.insert_keyed(key, entity);
            }
        }
    }

    #[cfg(feature = "tracing")]
    for (table, set) in config.tables.iter().zip(&sets) {
        crate::unjoin_trace_table!("group", table.alias(), set.as_ref().map_or(0, EntitySet::len));
    }
    Grouped { sets }
}

/// One table's record from one row, with its primary-key form.
///
/// `None` when the row has no cell for the table, every cell is NULL, or the
/// primary key is NULL or absent.
fn extract<T>(
    row: &FlatRow,
    index: usize,
    table: &TableDescriptor<T>,
    delimiter: &str,
) -> Option<(CompactString, Entity)> {
    let mut fields = Vec::new();
    let mut matched = false;
    for (attribute, value) in row.attributes(table.alias(), delimiter) {
        matched |= !value.is_null();
        fields.push((CompactString::from(attribute), Slot::Value(value.clone())));
    }
    if !matched {
        return None;
    }

    let key = fields
        .iter()
        .find(|(name, _)| name == table.primary_key())
        .and_then(|(_, slot)| match slot {
            Slot::Value(value) => value.key(),
            _ => None,
        })?;
    Some((key, Entity::new(index, fields)))
}
