//! Generic nested output.

use compact_str::CompactString;

use crate::value::Value;

/// One position in a generic output record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    /// No related record, or a NULL cell
    #[default]
    Null,
    /// Scalar attribute
    Value(Value),
    /// Single nested record
    Object(Object),
    /// Ordered collection of nested records
    List(Vec<Node>),
}

impl Node {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    #[inline]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Node::Value(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(o) => Some(o),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Value(value)
    }
}

impl From<Object> for Node {
    fn from(object: Object) -> Self {
        Node::Object(object)
    }
}

/// Ordered attribute map of a generic output record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    fields: Vec<(CompactString, Node)>,
}

impl Object {
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Scalar attribute lookup; `None` for nested or missing keys.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(Node::as_value)
    }

    /// Sets `key`, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<CompactString>, node: impl Into<Node>) {
        let key = key.into();
        let node = node.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = node,
            None => self.fields.push((key, node)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let index = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<CompactString>> FromIterator<(K, Node)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, node) in iter {
            object.insert(key, node);
        }
        object
    }
}

impl IntoIterator for Object {
    type Item = (CompactString, Node);
    type IntoIter = std::vec::IntoIter<(CompactString, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
