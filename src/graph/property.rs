//! Attribute values carried by the graph, its nodes and its edges
//!
//! The store never inspects these records; they travel with the entity they
//! belong to and are handed back verbatim.

use super::error::{GraphError, GraphResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A single attribute value: any JSON value, with integers kept apart from
/// floats. Serializes to the plain JSON value it wraps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<PropertyValue>),
    Map(Attributes),
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        if let PropertyValue::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let PropertyValue::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    /// Floats, with integers widened
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            PropertyValue::Float(f) => Some(f),
            PropertyValue::Integer(i) => Some(i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let PropertyValue::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        if let PropertyValue::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&Attributes> {
        if let PropertyValue::Map(map) = self {
            Some(map)
        } else {
            None
        }
    }

    /// JSON type of the value, as used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Boolean(_) => "boolean",
            PropertyValue::Integer(_) | PropertyValue::Float(_) => "number",
            PropertyValue::String(_) => "string",
            PropertyValue::Array(_) => "array",
            PropertyValue::Map(_) => "object",
        }
    }

    /// Non-finite floats have no JSON form and become `null`
    pub fn to_json(&self) -> Value {
        match self {
            PropertyValue::Null => Value::Null,
            PropertyValue::Boolean(b) => Value::Bool(*b),
            PropertyValue::Integer(i) => Value::from(*i),
            PropertyValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            PropertyValue::String(s) => Value::String(s.clone()),
            PropertyValue::Array(items) => items.iter().map(PropertyValue::to_json).collect(),
            PropertyValue::Map(map) => attributes_to_json(map),
        }
    }
}

impl From<&Value> for PropertyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => PropertyValue::Null,
            Value::Bool(b) => PropertyValue::Boolean(*b),
            Value::Number(n) => n
                .as_i64()
                .map(PropertyValue::Integer)
                .unwrap_or_else(|| PropertyValue::Float(n.as_f64().unwrap_or(f64::NAN))),
            Value::String(s) => PropertyValue::String(s.clone()),
            Value::Array(items) => PropertyValue::Array(items.iter().map(PropertyValue::from).collect()),
            Value::Object(map) => PropertyValue::Map(
                map.iter().map(|(k, v)| (k.clone(), PropertyValue::from(v))).collect(),
            ),
        }
    }
}

macro_rules! property_from {
    ($($source:ty => |$v:ident| $body:expr),+ $(,)?) => {
        $(
            impl From<$source> for PropertyValue {
                fn from($v: $source) -> Self {
                    $body
                }
            }
        )+
    };
}

property_from! {
    bool => |v| PropertyValue::Boolean(v),
    i32 => |v| PropertyValue::Integer(i64::from(v)),
    i64 => |v| PropertyValue::Integer(v),
    u32 => |v| PropertyValue::Integer(i64::from(v)),
    f64 => |v| PropertyValue::Float(v),
    &str => |v| PropertyValue::String(v.to_owned()),
    String => |v| PropertyValue::String(v),
    Vec<PropertyValue> => |v| PropertyValue::Array(v),
    Attributes => |v| PropertyValue::Map(v),
}

/// Plain key/value record attached to the graph, a node or an edge
pub type Attributes = IndexMap<String, PropertyValue>;

/// Convert an untyped JSON payload into an attribute record.
///
/// Anything but a JSON object is rejected: attribute records are always
/// plain key/value records.
pub fn attributes_from_json(value: &Value) -> GraphResult<Attributes> {
    match value {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(k, v)| (k.clone(), PropertyValue::from(v)))
            .collect()),
        other => Err(GraphError::InvalidArguments(format!(
            "attributes must be a plain object, got {}",
            json_type_name(other)
        ))),
    }
}

pub fn attributes_to_json(attributes: &Attributes) -> Value {
    Value::Object(attributes.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Build an [`Attributes`] record from `key => value` pairs.
///
/// ```
/// use mixgraph::attrs;
/// let a = attrs! { "name" => "Alice", "age" => 30 };
/// assert_eq!(a.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attributes::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Attributes::new();
        $(map.insert(::std::string::String::from($key), $crate::PropertyValue::from($value));)+
        map
    }};
}
