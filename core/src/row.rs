//! Flat rows as produced by a joined query.
//!
//! Column names are qualified as `<alias><delimiter><attribute>`, e.g.
//! `user-id` or `address-street1` with the default `-` delimiter.

use compact_str::CompactString;

use crate::value::Value;

/// Delimiter between table alias and attribute name when none is configured.
pub const DEFAULT_DELIMITER: &str = "-";

/// One tuple of a join result: qualified column name to scalar, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRow {
    cells: Vec<(CompactString, Value)>,
}

impl FlatRow {
    /// Creates an empty row.
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Creates an empty row with room for `capacity` cells.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, column: impl Into<CompactString>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Sets a cell, replacing any earlier value for the same column in place.
    pub fn insert(&mut self, column: impl Into<CompactString>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Looks up a cell by its qualified name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Cells belonging to `alias`, as `(attribute, value)` pairs.
    ///
    /// A column belongs to the alias when its name starts with
    /// `alias + delimiter`; the attribute is the whole remainder, so
    /// `user-first-name` yields `first-name` for alias `user`.
    pub fn attributes<'r>(
        &'r self,
        alias: &'r str,
        delimiter: &'r str,
    ) -> impl Iterator<Item = (&'r str, &'r Value)> + 'r {
        self.cells.iter().filter_map(move |(name, value)| {
            let attribute = name.strip_prefix(alias)?.strip_prefix(delimiter)?;
            (!attribute.is_empty()).then_some((attribute, value))
        })
    }
}

impl<K, V> FromIterator<(K, V)> for FlatRow
where
    K: Into<CompactString>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = FlatRow::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl<'a> IntoIterator for &'a FlatRow {
    type Item = &'a (CompactString, Value);
    type IntoIter = core::slice::Iter<'a, (CompactString, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> FlatRow {
        FlatRow::new()
            .with("user-id", 1)
            .with("user-first-name", "Leng")
            .with("user_role-id", 5)
            .with("address-id", Value::Null)
    }

    #[test]
    fn attributes_match_alias_and_delimiter() {
        let row = row();
        let attrs: Vec<_> = row.attributes("user", "-").collect();
        assert_eq!(
            attrs,
            vec![("id", &Value::Integer(1)), ("first-name", &Value::from("Leng"))]
        );
    }

    #[test]
    fn attributes_do_not_leak_across_prefixed_aliases() {
        let row = row();
        let attrs: Vec<_> = row.attributes("user_role", "-").map(|(a, _)| a).collect();
        assert_eq!(attrs, vec!["id"]);
    }

    #[test]
    fn multi_char_delimiter() {
        let row = FlatRow::new().with("user__id", 3).with("user-id", 4);
        let attrs: Vec<_> = row.attributes("user", "__").collect();
        assert_eq!(attrs, vec![("id", &Value::Integer(3))]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut row = row();
        row.insert("user-id", 9);
        assert_eq!(row.get("user-id"), Some(&Value::Integer(9)));
        assert_eq!(row.iter().next().map(|(c, _)| c), Some("user-id"));
        assert_eq!(row.len(), 4);
    }
}
