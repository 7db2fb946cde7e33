//! Conversion of nested entities into generic [`Object`] records.

use crate::entity::{Entity, EntitySet, Slot};
use crate::node::{Node, Object};
use crate::unjoin_profile_function;

/// Converts one entity; attached sets become lists, missing single
/// relations become [`Node::Null`].
pub fn flatten(entity: Entity) -> Object {
    entity
        .into_fields()
        .into_iter()
        .map(|(key, slot)| (key, flatten_slot(slot)))
        .collect()
}

/// Converts a record set in order.
pub fn flatten_all(set: EntitySet) -> Vec<Object> {
    unjoin_profile_function!();
    set.into_iter().map(flatten).collect()
}

fn flatten_slot(slot: Slot) -> Node {
    match slot {
        Slot::Value(value) => Node::Value(value),
        Slot::One(entity) => Node::Object(flatten(entity)),
        Slot::Many(set) => Node::List(set.into_iter().map(|e| Node::Object(flatten(e))).collect()),
        Slot::Missing => Node::Null,
    }
}
