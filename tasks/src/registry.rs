//! # Task Registry
//!
//! Global read-only catalog of task specs and the oracle bound to each. Built once on first
//! access and shared by every judgement afterwards.

use crate::error::TaskError;
use crate::solvers::solve_equilibrium_linear;
use judge::traits::oracle::Oracle;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use util::task_spec::{FieldSpec, NumericResult, Params, TaskSpec, TaskTopic, ValueType};

pub const EQUILIBRIUM_LINEAR_V1: &str = "equilibrium_linear_v1";

/// A task spec paired with its oracle.
pub struct TaskEntry {
    pub spec: TaskSpec,
    pub oracle: Box<dyn Oracle>,
}

static REGISTRY: OnceLock<BTreeMap<String, TaskEntry>> = OnceLock::new();

fn equilibrium_linear() -> TaskEntry {
    let spec = TaskSpec {
        id: EQUILIBRIUM_LINEAR_V1.to_string(),
        title: "Competitive market equilibrium (linear demand/supply) with policy modes".into(),
        topic: TaskTopic::Equilibrium,
        input_fields: vec![
            FieldSpec::new("a", ValueType::Float, "Demand parameter: Qd = a - bP"),
            FieldSpec::new("b", ValueType::Float, "Demand slope (b>0): Qd = a - bP"),
            FieldSpec::new("c", ValueType::Float, "Supply parameter: Qs = c + dP"),
            FieldSpec::new("d", ValueType::Float, "Supply slope (d>0): Qs = c + dP"),
            FieldSpec::new("mode", ValueType::Str, "Policy mode: none | tax | subsidy"),
            FieldSpec::new(
                "t",
                ValueType::Float,
                "Per-unit tax/subsidy (t>=0), used when mode != none",
            ),
        ],
        output_fields: vec![
            FieldSpec::new("p_eq", ValueType::Float, "Equilibrium (consumer) price"),
            FieldSpec::new("q_eq", ValueType::Float, "Equilibrium quantity"),
        ],
    };
    TaskEntry {
        spec,
        oracle: Box::new(solve_equilibrium_linear),
    }
}

fn registry() -> &'static BTreeMap<String, TaskEntry> {
    REGISTRY.get_or_init(|| {
        [equilibrium_linear()]
            .into_iter()
            .map(|entry| (entry.spec.id.clone(), entry))
            .collect()
    })
}

pub fn get_task(task_id: &str) -> Result<&'static TaskEntry, TaskError> {
    registry()
        .get(task_id)
        .ok_or_else(|| TaskError::UnknownTask(task_id.to_string()))
}

pub fn get_task_spec(task_id: &str) -> Result<&'static TaskSpec, TaskError> {
    get_task(task_id).map(|entry| &entry.spec)
}

/// Every registered spec, ordered by id.
pub fn list_tasks() -> Vec<&'static TaskSpec> {
    registry().values().map(|entry| &entry.spec).collect()
}

/// Checks a test case against the declared input schema.
///
/// Every key must be a declared input and every value must match its declared type. Inputs
/// may be omitted; the oracle decides which ones are required.
pub fn validate_params(spec: &TaskSpec, params: &Params) -> Result<(), TaskError> {
    for (key, value) in params {
        let field = spec.input_field(key).ok_or_else(|| {
            TaskError::InvalidParams(format!("unexpected input '{key}' for task {}", spec.id))
        })?;
        if !field.value_type.accepts(value) {
            return Err(TaskError::InvalidParams(format!(
                "input '{key}' must be of type {:?}, got {value}",
                field.value_type
            )));
        }
    }
    Ok(())
}

/// Runs the task's oracle on one test case and checks it produced exactly the declared
/// outputs.
pub fn solve_task(task_id: &str, params: &Params) -> Result<NumericResult, TaskError> {
    let entry = get_task(task_id)?;
    validate_params(&entry.spec, params)?;
    let result = entry.oracle.solve(params)?;

    let mut expected: Vec<String> = entry.spec.output_names().map(str::to_string).collect();
    let mut got: Vec<String> = result.keys().map(str::to_string).collect();
    expected.sort();
    got.sort();
    if expected != got {
        return Err(TaskError::OracleOutputMismatch { expected, got });
    }

    Ok(result)
}
