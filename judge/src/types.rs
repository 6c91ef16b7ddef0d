//! # Types Module
//!
//! Host-neutral representation of whatever a user function hands back. Execution backends
//! translate their native values into [`RawValue`]; nothing downstream of the backend
//! knows which interpreter (or process) produced it.

use serde_json::Value;
use std::collections::BTreeMap;

/// An unconstrained-shape value returned by user code, validated later.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<RawValue>),
    Mapping(BTreeMap<String, RawValue>),
    /// A host value with no neutral counterpart, kept only by its type name.
    Opaque(String),
}

impl RawValue {
    /// Short description of the value's shape, used in diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            RawValue::Unit => "unit",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "int",
            RawValue::Float(_) => "float",
            RawValue::Text(_) => "string",
            RawValue::List(_) => "list",
            RawValue::Mapping(_) => "mapping",
            RawValue::Opaque(name) => name,
        }
    }

    /// The value as `f64` if it is numeric. Booleans are not numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Int(i) => Some(*i as f64),
            RawValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// JSON is the wire format of out-of-process backends; integers stay integers.
impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Unit,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Int(i),
                None => RawValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => RawValue::Text(s),
            Value::Array(items) => RawValue::List(items.into_iter().map(RawValue::from).collect()),
            Value::Object(map) => {
                RawValue::Mapping(map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect())
            }
        }
    }
}
