//! Bottom-up conversion of nested entities into caller types.
//!
//! Every table with a projector has its records replaced by the projector's
//! output. Children are converted before their parent, so a parent's
//! projector already sees typed children in its [`Attributes`].

use compact_str::CompactString;

use crate::config::RelationshipConfig;
use crate::conversions::FromValue;
use crate::entity::{Entity, EntitySet, Slot};
use crate::error::{ConfigError, Error, Result};
use crate::value::Value;
use crate::{unjoin_profile_function, unjoin_trace_pass};

static NULL: Value = Value::Null;

/// One position of a record handed to a projector.
#[derive(Debug, Clone, PartialEq)]
pub enum Projected<T> {
    /// Missing single relation
    Null,
    /// Scalar attribute
    Value(Value),
    /// Nested record of a table without a projector
    Object(Attributes<T>),
    /// Attached collection
    List(Vec<Projected<T>>),
    /// Nested record already converted by its table's projector
    Typed(T),
}

impl<T> Projected<T> {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Projected::Null)
    }

    pub fn into_typed(self) -> Option<T> {
        match self {
            Projected::Typed(value) => Some(value),
            _ => None,
        }
    }

    const fn describe(&self) -> &'static str {
        match self {
            Projected::Null => "null",
            Projected::Value(_) => "scalar",
            Projected::Object(_) => "untyped record",
            Projected::List(_) => "list",
            Projected::Typed(_) => "typed record",
        }
    }
}

/// Attribute map of one record, given by value to its table's projector.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes<T> {
    table: CompactString,
    fields: Vec<(CompactString, Projected<T>)>,
}

impl<T> Attributes<T> {
    /// Alias of the table the record belongs to.
    #[inline]
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn get(&self, key: &str) -> Option<&Projected<T>> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Scalar attribute lookup; `None` for nested or missing keys.
    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.get(key)? {
            Projected::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Reads a scalar attribute as `V`.
    ///
    /// A missing key reads as NULL, so `Option<V>` accepts it; every other
    /// type reports it as a projection error.
    pub fn get_as<V: FromValue>(&self, key: &str) -> Result<V> {
        let value = match self.get(key) {
            None | Some(Projected::Null) => &NULL,
            Some(Projected::Value(value)) => value,
            Some(other) => {
                return Err(self.error(key, format_args!("expected scalar, found {}", other.describe())));
            }
        };
        V::from_value(value).map_err(|err| match err {
            Error::Projection(message) => self.error(key, format_args!("{message}")),
            other => other,
        })
    }

    /// Removes an attribute, returning it.
    pub fn take(&mut self, key: &str) -> Option<Projected<T>> {
        let index = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(index).1)
    }

    /// Removes a nested record that its projector already converted.
    pub fn take_typed(&mut self, key: &str) -> Result<T> {
        match self.take(key) {
            Some(Projected::Typed(value)) => Ok(value),
            Some(other) => Err(self.error(key, format_args!("expected typed record, found {}", other.describe()))),
            None => Err(self.error(key, format_args!("missing"))),
        }
    }

    /// Removes a single-shaped relation; a missing match reads as `None`.
    pub fn take_one(&mut self, key: &str) -> Result<Option<T>> {
        match self.take(key) {
            Some(Projected::Typed(value)) => Ok(Some(value)),
            Some(Projected::Null) | None => Ok(None),
            Some(other) => Err(self.error(key, format_args!("expected typed record, found {}", other.describe()))),
        }
    }

    /// Removes a list-shaped relation whose records were all converted.
    ///
    /// A table that produced no records from any row attaches null, which
    /// reads as an empty list here. Use [`take`](Self::take) to tell the two apart.
    pub fn take_many(&mut self, key: &str) -> Result<Vec<T>> {
        match self.take(key) {
            Some(Projected::List(items)) => {
                let mut typed = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Projected::Typed(value) => typed.push(value),
                        other => {
                            return Err(self.error(
                                key,
                                format_args!("expected typed records, found {}", other.describe()),
                            ));
                        }
                    }
                }
                Ok(typed)
            }
            Some(Projected::Null) => Ok(Vec::new()),
            Some(other) => Err(self.error(key, format_args!("expected list, found {}", other.describe()))),
            None => Err(self.error(key, format_args!("missing"))),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Projected<T>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn error(&self, key: &str, detail: core::fmt::Arguments<'_>) -> Error {
        Error::Projection(format!("{}.{key}: {detail}", self.table))
    }
}

/// Projects every root record, requiring a root projector.
pub(crate) fn project_all<T>(config: &RelationshipConfig<T>, roots: EntitySet) -> Result<Vec<T>> {
    unjoin_profile_function!();
    unjoin_trace_pass!("project", roots.len());

    let root = config.root();
    if !root.has_projector() {
        return Err(ConfigError::MissingRootProjector(root.alias.clone()).into());
    }
    roots
        .into_iter()
        .map(|entity| match project(config, entity)? {
            Projected::Typed(value) => Ok(value),
            other => Err(Error::Projection(format!(
                "root table `{}` produced {}",
                root.alias(),
                other.describe()
            ))),
        })
        .collect()
}

/// Projects one entity and everything attached under it.
pub fn project<T>(config: &RelationshipConfig<T>, entity: Entity) -> Result<Projected<T>> {
    let table = config.tables.get(entity.table()).ok_or_else(|| {
        Error::Projection(format!("record tagged with unknown table #{}", entity.table()))
    })?;

    let entries = entity.into_fields();
    let mut fields = Vec::with_capacity(entries.len());
    for (key, slot) in entries {
        fields.push((key, project_slot(config, slot)?));
    }
    let attributes = Attributes {
        table: table.alias.clone(),
        fields,
    };

    match table.projector() {
        Some(projector) => projector(attributes).map(Projected::Typed),
        None => Ok(Projected::Object(attributes)),
    }
}

fn project_slot<T>(config: &RelationshipConfig<T>, slot: Slot) -> Result<Projected<T>> {
    Ok(match slot {
        Slot::Value(value) => Projected::Value(value),
        Slot::One(entity) => project(config, entity)?,
        Slot::Many(set) => Projected::List(
            set.into_iter()
                .map(|entity| project(config, entity))
                .collect::<Result<_>>()?,
        ),
        Slot::Missing => Projected::Null,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> Attributes<String> {
        Attributes {
            table: "user".into(),
            fields: vec![
                ("id".into(), Projected::Value(Value::Integer(1))),
                ("nickname".into(), Projected::Value(Value::Null)),
                ("address".into(), Projected::Null),
                ("roles".into(), Projected::List(vec![Projected::Typed("admin".into())])),
                ("profile".into(), Projected::Typed("p".into())),
            ],
        }
    }

    #[test]
    fn scalar_reads() {
        let attrs = attributes();
        assert_eq!(attrs.get_as::<i64>("id").unwrap(), 1);
        assert_eq!(attrs.get_as::<Option<String>>("nickname").unwrap(), None);
        assert_eq!(attrs.get_as::<Option<i64>>("absent").unwrap(), None);
        assert_eq!(attrs.table(), "user");
    }

    #[test]
    fn scalar_errors_name_the_field() {
        let attrs = attributes();
        let err = attrs.get_as::<String>("id").unwrap_err();
        assert!(err.to_string().contains("user.id"), "{err}");
        assert!(attrs.get_as::<i64>("roles").is_err());
        assert!(attrs.get_as::<i64>("absent").is_err());
    }

    #[test]
    fn taking_nested_values() {
        let mut attrs = attributes();
        assert_eq!(attrs.take_one("address").unwrap(), None);
        assert_eq!(attrs.take_many("roles").unwrap(), vec!["admin".to_string()]);
        assert_eq!(attrs.take_typed("profile").unwrap(), "p");
        assert!(attrs.take_typed("profile").is_err());
        assert_eq!(attrs.keys().collect::<Vec<_>>(), vec!["id", "nickname"]);
        assert!(attrs.take_many("id").is_err());
    }

    #[test]
    fn null_list_reads_as_empty() {
        let mut attrs = attributes();
        assert!(attrs.get("address").is_some_and(Projected::is_null));
        assert_eq!(attrs.take_many("address").unwrap(), Vec::<String>::new());
        assert!(attrs.take_many("address").is_err());
    }

    #[test]
    fn typed_positions_unwrap() {
        let mut attrs = attributes();
        assert_eq!(attrs.take("profile").and_then(Projected::into_typed), Some("p".to_string()));
        assert_eq!(attrs.take("id").and_then(Projected::into_typed), None);
        assert!(!attrs.get("roles").is_some_and(Projected::is_null));
    }
}
