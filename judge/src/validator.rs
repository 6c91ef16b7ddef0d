//! Output Validator
//!
//! Checks a raw user value against a task's declared output shape before anything tries to
//! interpret it as numbers. Rejection is a value, not an error: the orchestrator turns it
//! into a wrong-answer verdict.

use crate::types::RawValue;
use std::collections::BTreeSet;
use util::task_spec::{NumericResult, TaskSpec};

/// Why a raw value was not accepted as a result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("expected a mapping of output fields, got {found}")]
    NotAMapping { found: String },
    #[error("output keys do not match: missing {missing:?}, unexpected {unexpected:?}")]
    KeyMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
    #[error("output field `{field}` is not numeric (got {found})")]
    NonNumeric { field: String, found: String },
}

/// Accepts `raw` iff it is a mapping whose key set equals the declared output field names
/// exactly and every value is an integer or a float.
///
/// On success the values are coerced to `f64` and returned in declared output order.
pub fn validate(spec: &TaskSpec, raw: &RawValue) -> Result<NumericResult, Rejection> {
    let RawValue::Mapping(map) = raw else {
        return Err(Rejection::NotAMapping {
            found: raw.type_name().to_string(),
        });
    };

    let expected: BTreeSet<&str> = spec.output_names().collect();
    let got: BTreeSet<&str> = map.keys().map(String::as_str).collect();
    if expected != got {
        return Err(Rejection::KeyMismatch {
            missing: expected.difference(&got).map(|k| k.to_string()).collect(),
            unexpected: got.difference(&expected).map(|k| k.to_string()).collect(),
        });
    }

    let mut result = NumericResult::new();
    for name in spec.output_names() {
        let value = &map[name];
        let number = value.as_number().ok_or_else(|| Rejection::NonNumeric {
            field: name.to_string(),
            found: value.type_name().to_string(),
        })?;
        result.insert(name, number);
    }
    Ok(result)
}
