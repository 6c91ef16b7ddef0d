//! Conversions between script values and the judge's host-neutral types.

use crate::types::RawValue;
use rhai::{Array, Dynamic, Map};
use serde_json::Value;
use util::task_spec::Params;

/// Builds the script-side view of one test case. Keys keep their JSON names.
pub fn params_to_dynamic(params: &Params) -> Dynamic {
    let map: Map = params
        .iter()
        .map(|(k, v)| (k.as_str().into(), json_to_dynamic(v)))
        .collect();
    Dynamic::from_map(map)
}

/// `null` maps to unit; integers that do not fit an `i64` fall back to floats.
pub fn json_to_dynamic(value: &Value) -> Dynamic {
    match value {
        Value::Null => Dynamic::UNIT,
        Value::Bool(b) => Dynamic::from_bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Dynamic::from_int(i),
            None => Dynamic::from_float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Dynamic::from(s.clone()),
        Value::Array(items) => {
            Dynamic::from_array(items.iter().map(json_to_dynamic).collect::<Array>())
        }
        Value::Object(map) => Dynamic::from_map(
            map.iter()
                .map(|(k, v)| (k.as_str().into(), json_to_dynamic(v)))
                .collect::<Map>(),
        ),
    }
}

/// Translates whatever the entry point returned. Shared values are flattened first;
/// anything without a neutral counterpart survives only as its type name.
pub fn dynamic_to_raw(value: Dynamic) -> RawValue {
    let value = value.flatten();

    if value.is_unit() {
        return RawValue::Unit;
    }
    if let Ok(b) = value.as_bool() {
        return RawValue::Bool(b);
    }
    if let Ok(i) = value.as_int() {
        return RawValue::Int(i);
    }
    if let Ok(f) = value.as_float() {
        return RawValue::Float(f);
    }
    if value.is_string() {
        return match value.into_string() {
            Ok(s) => RawValue::Text(s),
            Err(type_name) => RawValue::Opaque(type_name.to_string()),
        };
    }
    if value.is_array() {
        return match value.into_array() {
            Ok(items) => RawValue::List(items.into_iter().map(dynamic_to_raw).collect()),
            Err(type_name) => RawValue::Opaque(type_name.to_string()),
        };
    }
    if value.is_map() {
        let type_name = value.type_name();
        return match value.try_cast::<Map>() {
            Some(map) => RawValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k.to_string(), dynamic_to_raw(v)))
                    .collect(),
            ),
            None => RawValue::Opaque(type_name.to_string()),
        };
    }

    RawValue::Opaque(value.type_name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn params_become_a_script_map() {
        let params = json!({"a": 120, "mode": "tax", "t": 2.5, "skip": null})
            .as_object()
            .cloned()
            .unwrap();
        let dynamic = params_to_dynamic(&params);
        let map = dynamic.try_cast::<Map>().unwrap();
        assert_eq!(map["a"].as_int(), Ok(120));
        assert_eq!(map["t"].as_float(), Ok(2.5));
        assert_eq!(map["mode"].clone().into_string().unwrap(), "tax");
        assert!(map["skip"].is_unit());
    }

    #[test]
    fn oversized_integers_fall_back_to_float() {
        let dynamic = json_to_dynamic(&json!(u64::MAX));
        assert_eq!(dynamic.as_float(), Ok(u64::MAX as f64));
    }

    #[test]
    fn scalars_map_to_raw_values() {
        assert_eq!(dynamic_to_raw(Dynamic::UNIT), RawValue::Unit);
        assert_eq!(dynamic_to_raw(Dynamic::from_bool(true)), RawValue::Bool(true));
        assert_eq!(dynamic_to_raw(Dynamic::from_int(-4)), RawValue::Int(-4));
        assert_eq!(dynamic_to_raw(Dynamic::from_float(0.5)), RawValue::Float(0.5));
        assert_eq!(
            dynamic_to_raw(Dynamic::from("hi".to_string())),
            RawValue::Text("hi".to_string())
        );
    }

    #[test]
    fn nested_containers_are_converted() {
        let mut inner = Map::new();
        inner.insert("q".into(), Dynamic::from_int(2));
        let mut outer = Map::new();
        outer.insert("p".into(), Dynamic::from_float(1.5));
        outer.insert("nested".into(), Dynamic::from_map(inner));
        outer.insert(
            "list".into(),
            Dynamic::from_array(vec![Dynamic::from_int(1), Dynamic::UNIT]),
        );

        let mut expected_inner = BTreeMap::new();
        expected_inner.insert("q".to_string(), RawValue::Int(2));
        let mut expected = BTreeMap::new();
        expected.insert("p".to_string(), RawValue::Float(1.5));
        expected.insert("nested".to_string(), RawValue::Mapping(expected_inner));
        expected.insert(
            "list".to_string(),
            RawValue::List(vec![RawValue::Int(1), RawValue::Unit]),
        );

        assert_eq!(
            dynamic_to_raw(Dynamic::from_map(outer)),
            RawValue::Mapping(expected)
        );
    }

    #[test]
    fn unknown_values_are_opaque() {
        let raw = dynamic_to_raw(Dynamic::from_char('x'));
        assert_eq!(raw, RawValue::Opaque("char".to_string()));
    }
}
