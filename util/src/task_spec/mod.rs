//! Task schema types.
//!
//! A [`TaskSpec`] is pure metadata: what a task is about, which inputs a test case carries
//! and which numeric outputs a solution must produce. It carries no business logic; the
//! oracle bound to a task lives with the catalog that owns it.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// One test case: field name to JSON value, shared read-only by the oracle and user code.
pub type Params = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskTopic {
    Equilibrium,
    TaxesSubsidies,
    Welfare,
    Aggregation,
    Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Int,
    Float,
    Str,
}

impl ValueType {
    /// Whether a JSON value is acceptable for a field declared with this type.
    ///
    /// `int` accepts integral numbers only, `float` accepts any number, `str` accepts strings.
    /// Booleans never count as numbers.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueType::Int => value.is_i64() || value.is_u64(),
            ValueType::Float => value.is_number(),
            ValueType::Str => value.is_string(),
        }
    }
}

/// Describes a single input or output field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub description: String,
}

impl FieldSpec {
    pub fn new(name: &str, value_type: ValueType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            description: description.to_string(),
        }
    }
}

/// Immutable description of a task family.
///
/// Output field names are unique; they drive both output validation and comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub id: String,
    pub title: String,
    pub topic: TaskTopic,
    pub input_fields: Vec<FieldSpec>,
    pub output_fields: Vec<FieldSpec>,
}

impl TaskSpec {
    pub fn input_field(&self, name: &str) -> Option<&FieldSpec> {
        self.input_fields.iter().find(|f| f.name == name)
    }

    /// Declared output names, in declaration order.
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.output_fields.iter().map(|f| f.name.as_str())
    }
}

/// Field name to `f64`, iterated in insertion order.
///
/// Oracles build one in their natural order and the validator builds one in declared
/// output order; the two are only ever compared, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericResult {
    entries: Vec<(String, f64)>,
}

impl NumericResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a field. Overwriting keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

}

impl<K: Into<String>> FromIterator<(K, f64)> for NumericResult {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut result = NumericResult::new();
        for (k, v) in iter {
            result.insert(k, v);
        }
        result
    }
}

impl Serialize for NumericResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Reads a numeric parameter as `f64`.
pub fn param_f64(params: &Params, name: &str) -> Option<f64> {
    params.get(name).and_then(Value::as_f64)
}

/// Reads a string parameter.
pub fn param_str<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params.get(name).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_type_acceptance() {
        assert!(ValueType::Int.accepts(&json!(3)));
        assert!(!ValueType::Int.accepts(&json!(3.5)));
        assert!(ValueType::Float.accepts(&json!(3)));
        assert!(ValueType::Float.accepts(&json!(3.5)));
        assert!(!ValueType::Float.accepts(&json!(true)));
        assert!(!ValueType::Float.accepts(&json!("3")));
        assert!(ValueType::Str.accepts(&json!("tax")));
        assert!(!ValueType::Str.accepts(&json!(1)));
    }

    #[test]
    fn numeric_result_keeps_insertion_order() {
        let mut r = NumericResult::new();
        r.insert("q_eq", 2.0);
        r.insert("p_eq", 1.0);
        r.insert("q_eq", 3.0);
        let keys: Vec<&str> = r.keys().collect();
        assert_eq!(keys, vec!["q_eq", "p_eq"]);
        assert_eq!(r.get("q_eq"), Some(3.0));
        assert_eq!(r.get("missing"), None);
    }

    #[test]
    fn numeric_result_serialises_as_object() {
        let r: NumericResult = [("p_eq", 30.0), ("q_eq", 30.0)].into_iter().collect();
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value, json!({"p_eq": 30.0, "q_eq": 30.0}));
    }

    #[test]
    fn field_spec_serialises_type_keyword() {
        let field = FieldSpec::new("mode", ValueType::Str, "Policy mode");
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "str");
        let back: FieldSpec = serde_json::from_value(value).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn param_accessors() {
        let params = json!({"a": 120, "mode": "tax"});
        let params = params.as_object().unwrap();
        assert_eq!(param_f64(params, "a"), Some(120.0));
        assert_eq!(param_f64(params, "mode"), None);
        assert_eq!(param_str(params, "mode"), Some("tax"));
        assert_eq!(param_str(params, "t"), None);
    }
}
