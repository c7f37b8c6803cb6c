//! Generic structured values exchanged between the HTTP layer and the
//! GraphQL engine.
//!
//! [`Map`] is the value decoded request bodies are expressed in and the
//! value responses are encoded from. It converts into the engine's
//! [`async_graphql::Value`] and back. The two directions are not
//! symmetric: [`Map::Buffer`] has no engine counterpart and becomes
//! `null`, while every engine value has a `Map` representation.

use async_graphql::{Name, Number, Value as GraphQLValue};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// A JSON-like tagged value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Map {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    /// Opaque bytes from a body that was neither JSON nor form encoded
    Buffer(Vec<u8>),
    Array(Vec<Map>),
    Dictionary(BTreeMap<String, Map>),
}

impl Map {
    /// Look up `key` when this value is a dictionary
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Map> {
        self.as_dictionary().and_then(|dict| dict.get(key))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Map::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Map::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dictionary(&self) -> Option<&BTreeMap<String, Map>> {
        match self {
            Map::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }
}

fn number_to_map(number: &Number) -> Map {
    if let Some(int) = number.as_i64() {
        Map::Int(int)
    } else if let Some(double) = number.as_f64() {
        Map::Double(double)
    } else {
        Map::Null
    }
}

impl From<JsonValue> for Map {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Map::Null,
            JsonValue::Bool(b) => Map::Bool(b),
            JsonValue::Number(n) => number_to_map(&n),
            JsonValue::String(s) => Map::String(s),
            JsonValue::Array(items) => Map::Array(items.into_iter().map(Map::from).collect()),
            JsonValue::Object(fields) => Map::Dictionary(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Map::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Map> for JsonValue {
    fn from(map: Map) -> Self {
        match map {
            Map::Null => JsonValue::Null,
            Map::Bool(b) => JsonValue::Bool(b),
            Map::Int(i) => JsonValue::Number(i.into()),
            Map::Double(d) => Number::from_f64(d).map_or(JsonValue::Null, JsonValue::Number),
            Map::String(s) => JsonValue::String(s),
            Map::Buffer(bytes) => JsonValue::String(BASE64.encode(bytes)),
            Map::Array(items) => JsonValue::Array(items.into_iter().map(JsonValue::from).collect()),
            Map::Dictionary(dict) => JsonValue::Object(
                dict.into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Map> for GraphQLValue {
    fn from(map: Map) -> Self {
        match map {
            Map::Null | Map::Buffer(_) => GraphQLValue::Null,
            Map::Bool(b) => GraphQLValue::Boolean(b),
            Map::Int(i) => GraphQLValue::Number(i.into()),
            Map::Double(d) => Number::from_f64(d).map_or(GraphQLValue::Null, GraphQLValue::Number),
            Map::String(s) => GraphQLValue::String(s),
            Map::Array(items) => {
                GraphQLValue::List(items.into_iter().map(GraphQLValue::from).collect())
            }
            Map::Dictionary(dict) => GraphQLValue::Object(
                dict.into_iter()
                    .map(|(key, value)| (Name::new(key), GraphQLValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<GraphQLValue> for Map {
    fn from(value: GraphQLValue) -> Self {
        match value {
            GraphQLValue::Null => Map::Null,
            GraphQLValue::Boolean(b) => Map::Bool(b),
            GraphQLValue::Number(n) => number_to_map(&n),
            GraphQLValue::String(s) => Map::String(s),
            GraphQLValue::Enum(name) => Map::String(name.to_string()),
            // Engine bytes surface as text so they survive a trip back into the engine.
            GraphQLValue::Binary(bytes) => Map::String(BASE64.encode(bytes)),
            GraphQLValue::List(items) => Map::Array(items.into_iter().map(Map::from).collect()),
            GraphQLValue::Object(fields) => Map::Dictionary(
                fields
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), Map::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Map {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Map::Null => serializer.serialize_unit(),
            Map::Bool(b) => serializer.serialize_bool(*b),
            Map::Int(i) => serializer.serialize_i64(*i),
            Map::Double(d) if d.is_finite() => serializer.serialize_f64(*d),
            Map::Double(_) => serializer.serialize_unit(),
            Map::String(s) => serializer.serialize_str(s),
            Map::Buffer(bytes) => serializer.serialize_str(&BASE64.encode(bytes)),
            Map::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Map::Dictionary(dict) => {
                let mut map = serializer.serialize_map(Some(dict.len()))?;
                for (key, value) in dict {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
