//! Submission use case: resolve the task, check the fixtures, judge the code.

use crate::error::TaskError;
use crate::registry::{get_task, validate_params};
use judge::JudgeJob;
use judge::report::JudgeReport;
use serde::Deserialize;
use tracing::info;
use util::judge_settings::JudgeSettings;
use util::task_spec::Params;

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitSolutionInput {
    pub task_id: String,
    pub user_code: String,
    pub tests: Vec<Params>,
}

/// Judges `input.user_code` against the task's oracle.
///
/// Fails only before judging starts: for an unknown task or a fixture that does not match
/// the task's input schema. Once judging starts the outcome is always a report.
pub fn submit_solution(
    input: &SubmitSolutionInput,
    settings: JudgeSettings,
) -> Result<JudgeReport, TaskError> {
    let entry = get_task(&input.task_id)?;

    for (index, params) in input.tests.iter().enumerate() {
        validate_params(&entry.spec, params).map_err(|err| match err {
            TaskError::InvalidParams(reason) => {
                TaskError::InvalidParams(format!("test {index}: {reason}"))
            }
            other => other,
        })?;
    }

    info!(
        task_id = %input.task_id,
        tests = input.tests.len(),
        code_len = input.user_code.len(),
        "judging submission"
    );

    let report = JudgeJob::new(
        &entry.spec,
        entry.oracle.as_ref(),
        &input.user_code,
        &input.tests,
    )
    .with_settings(settings)
    .run();

    Ok(report)
}
