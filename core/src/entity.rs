//! Intermediate records produced by the materializer.
//!
//! An [`Entity`] is one grouped record of one table, tagged with the index of
//! the descriptor that produced it. Nested tables are attached as [`Slot`]s.

use compact_str::CompactString;
use hashbrown::HashMap;

use crate::value::Value;

/// One attribute position of an [`Entity`].
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Scalar column value
    Value(Value),
    /// Single attached record (`OneToOne`, `OneToMany`)
    One(Entity),
    /// Attached collection (`ManyToOne`, `ManyToMany`), possibly empty
    Many(EntitySet),
    /// Single-shaped relation with no matching record
    Missing,
}

/// One grouped record of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    table: usize,
    fields: Vec<(CompactString, Slot)>,
}

impl Entity {
    pub(crate) fn new(table: usize, fields: Vec<(CompactString, Slot)>) -> Self {
        Self { table, fields }
    }

    /// Index of the producing table in its config's registration order.
    #[inline]
    pub fn table(&self) -> usize {
        self.table
    }

    pub fn get(&self, key: &str) -> Option<&Slot> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, slot)| slot)
    }

    /// Scalar attribute lookup; `None` for attached tables or missing keys.
    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.get(key)? {
            Slot::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Sets `key`, replacing an existing attribute in place.
    pub fn set(&mut self, key: &str, slot: Slot) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = slot,
            None => self.fields.push((key.into(), slot)),
        }
    }

    pub(crate) fn retain_fields(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.fields.retain(|(k, _)| keep(k));
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.fields.iter().map(|(k, slot)| (k.as_str(), slot))
    }

    pub(crate) fn into_fields(self) -> Vec<(CompactString, Slot)> {
        self.fields
    }
}

/// Grouped records of one table, in first-seen order.
///
/// Primary-key keyed sets hold at most one record per key; multi-link sets
/// are keyed by sequence number and may repeat a primary key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitySet {
    entities: Vec<Entity>,
    keys: HashMap<CompactString, usize>,
}

impl EntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `entity` under `key` unless that key is already present.
    ///
    /// Returns whether the entity was stored.
    pub fn insert_keyed(&mut self, key: CompactString, entity: Entity) -> bool {
        if self.keys.contains_key(&key) {
            return false;
        }
        self.keys.insert(key, self.entities.len());
        self.entities.push(entity);
        true
    }

    /// Appends `entity` under the next sequence number.
    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> core::slice::IterMut<'_, Entity> {
        self.entities.iter_mut()
    }
}

impl IntoIterator for EntitySet {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntitySet {
    type Item = &'a Entity;
    type IntoIter = core::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: i64) -> Entity {
        Entity::new(0, vec![("id".into(), Slot::Value(Value::Integer(id)))])
    }

    #[test]
    fn keyed_insert_keeps_first() {
        let mut set = EntitySet::new();
        assert!(set.insert_keyed("1".into(), entity(1)));
        assert!(!set.insert_keyed("1".into(), entity(99)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().and_then(|e| e.value("id")), Some(&Value::Integer(1)));
    }

    #[test]
    fn pushed_entities_may_repeat() {
        let mut set = EntitySet::new();
        set.push(entity(1));
        set.push(entity(1));
        assert_eq!(set.len(), 2);
        assert!(!set.contains_key("1"));
    }

    #[test]
    fn set_replaces_in_place() {
        let mut e = entity(1);
        e.set("role", Slot::Missing);
        e.set("id", Slot::Value(Value::Integer(2)));
        let keys: Vec<_> = e.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["id", "role"]);
        assert_eq!(e.value("id"), Some(&Value::Integer(2)));
        assert_eq!(e.value("role"), None);
    }
}
