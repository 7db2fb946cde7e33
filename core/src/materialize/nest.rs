//! Nesting pass: attach every grouped table under its parent's records.

use compact_str::CompactString;
use hashbrown::HashMap;

use super::group::Grouped;
use crate::config::{RelationshipConfig, TableDescriptor};
use crate::entity::{Entity, EntitySet, Slot};
use crate::{unjoin_profile_function, unjoin_profile_scope, unjoin_trace_pass, unjoin_trace_table};

pub(crate) fn nest<T>(config: &RelationshipConfig<T>, grouped: Grouped) -> EntitySet {
    unjoin_profile_function!();
    unjoin_trace_pass!("nest", config.len());

    let mut arena = grouped.sets;
    arena.resize_with(config.len(), || None);
    for &index in config.order.iter().skip(1) {
        let Some(parent) = config.parents[index] else {
            continue;
        };
        if arena[parent].is_none() {
            continue;
        }
        let table = &config.tables[index];
        let Some(children) = arena[index].take() else {
            // No row produced a record for this table at all
            unjoin_trace_table!("nest", table.alias(), 0usize);
            if let Some(parents) = arena[parent].as_mut() {
                for record in parents.iter_mut() {
                    record.set(table.output_name(), Slot::Missing);
                }
            }
            continue;
        };
        unjoin_trace_table!("nest", table.alias(), children.len());

        let by_link = link_index(table, &children);
        let parent_key = config.tables[parent].primary_key();
        if let Some(parents) = arena[parent].as_mut() {
            for record in parents.iter_mut() {
                let matches = record
                    .value(parent_key)
                    .and_then(|value| value.key())
                    .and_then(|key| by_link.get(&key))
                    .map_or(&[][..], Vec::as_slice);
                let slot = attach(table, matches);
                record.set(table.output_name(), slot);
            }
        }
    }

    let mut root = arena.into_iter().next().flatten().unwrap_or_default();
    {
        unjoin_profile_scope!("nest", "root_exclusions");
        let table = config.root();
        for record in root.iter_mut() {
            strip(table, record);
        }
    }
    root
}

/// Children grouped by the key form of their foreign key, in set order.
fn link_index<'c, T>(
    table: &TableDescriptor<T>,
    children: &'c EntitySet,
) -> HashMap<CompactString, Vec<&'c Entity>> {
    let mut index: HashMap<CompactString, Vec<&Entity>> = HashMap::new();
    let Some(foreign_key) = table.foreign_key() else {
        return index;
    };
    for child in children {
        if let Some(key) = child.value(foreign_key).and_then(|value| value.key()) {
            index.entry(key).or_default().push(child);
        }
    }
    index
}

fn attach<T>(table: &TableDescriptor<T>, matches: &[&Entity]) -> Slot {
    let mut selected = matches.iter().copied();
    if table.kind().is_some_and(|kind| kind.keeps_many()) {
        let mut set = EntitySet::new();
        for child in selected {
            let Some(key) = child.value(table.primary_key()).and_then(|value| value.key()) else {
                continue;
            };
            if set.contains_key(&key) {
                continue;
            }
            let mut child = child.clone();
            strip(table, &mut child);
            set.insert_keyed(key, child);
        }
        Slot::Many(set)
    } else {
        match selected.next() {
            Some(child) => {
                let mut child = child.clone();
                strip(table, &mut child);
                Slot::One(child)
            }
            None => Slot::Missing,
        }
    }
}

fn strip<T>(table: &TableDescriptor<T>, record: &mut Entity) {
    record.retain_fields(|field| !table.is_excluded(field));
}
