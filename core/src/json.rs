//! serde support: serializing output records and reading rows from JSON.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number, Value as Json};

use crate::error::Error;
use crate::node::{Node, Object};
use crate::row::FlatRow;
use crate::value::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Real(value) => serializer.serialize_f64(*value),
            Value::Text(value) => serializer.serialize_str(value),
            Value::Blob(value) => serializer.serialize_bytes(value),
            #[cfg(feature = "chrono")]
            Value::Date(_) | Value::Time(_) | Value::DateTime(_) => serializer.collect_str(self),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Value(value) => value.serialize(serializer),
            Node::Object(object) => object.serialize(serializer),
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, node) in self.iter() {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

/// Converts a scalar to JSON; non-finite reals become `null`.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(value) => Json::Bool(*value),
        Value::Integer(value) => Json::Number((*value).into()),
        Value::Real(value) => Number::from_f64(*value).map_or(Json::Null, Json::Number),
        Value::Text(value) => Json::String(value.to_string()),
        Value::Blob(bytes) => Json::Array(bytes.iter().map(|b| Json::Number((*b).into())).collect()),
        #[cfg(feature = "chrono")]
        Value::Date(_) | Value::Time(_) | Value::DateTime(_) => Json::String(value.to_string()),
    }
}

pub fn node_to_json(node: &Node) -> Json {
    match node {
        Node::Null => Json::Null,
        Node::Value(value) => value_to_json(value),
        Node::Object(object) => object_to_json(object),
        Node::List(items) => Json::Array(items.iter().map(node_to_json).collect()),
    }
}

pub fn object_to_json(object: &Object) -> Json {
    Json::Object(
        object
            .iter()
            .map(|(key, node)| (key.to_string(), node_to_json(node)))
            .collect(),
    )
}

/// Converts mapped records into one JSON array.
pub fn to_json_array(records: &[Object]) -> Json {
    Json::Array(records.iter().map(object_to_json).collect())
}

impl TryFrom<Map<String, Json>> for FlatRow {
    type Error = Error;

    /// Reads every member as a scalar cell; nested arrays and objects are rejected.
    fn try_from(map: Map<String, Json>) -> Result<Self, Self::Error> {
        let mut row = FlatRow::with_capacity(map.len());
        for (column, json) in map {
            let value = json_to_value(&column, json)?;
            row.insert(column, value);
        }
        Ok(row)
    }
}

impl TryFrom<Json> for FlatRow {
    type Error = Error;

    fn try_from(json: Json) -> Result<Self, Self::Error> {
        match json {
            Json::Object(map) => map.try_into(),
            other => Err(Error::Input(format!("expected a row object, found {}", kind(&other)))),
        }
    }
}

fn json_to_value(column: &str, json: Json) -> Result<Value, Error> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(value) => Value::Bool(value),
        Json::Number(number) => match number.as_i64() {
            Some(value) => Value::Integer(value),
            None => number
                .as_f64()
                .map(Value::Real)
                .ok_or_else(|| Error::Input(format!("column `{column}`: unsupported number {number}")))?,
        },
        Json::String(value) => Value::Text(value.into()),
        other => {
            return Err(Error::Input(format!(
                "column `{column}` holds {}, expected a scalar",
                kind(&other)
            )));
        }
    })
}

const fn kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
