use std::time::Duration;

use serde::Deserialize;

use crate::constants::{GRADING_TIMEOUT, SIMULATED_SUITE_SIZE};
use crate::domain::{ExecutionResult, Status};
use crate::engine::traits::TextEngine;
use crate::prompt::GradingRequest;

/// Engine verdict before normalization. Only `status` and `output` are hard
/// requirements; missing metrics degrade to `None` instead of failing the
/// whole parse.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVerdict {
    status: Status,
    output: String,
    execution_time: Option<String>,
    memory: Option<String>,
    test_cases_passed: Option<u32>,
}

/// Judge one submission. Always resolves to a well-formed result: engine
/// faults, malformed payloads and timeouts all settle as a synthetic
/// `Runtime Error` verdict with an empty test suite.
pub async fn grade(engine: &dyn TextEngine, request: &GradingRequest) -> ExecutionResult {
    grade_within(engine, request, GRADING_TIMEOUT).await
}

async fn grade_within(
    engine: &dyn TextEngine,
    request: &GradingRequest,
    ceiling: Duration,
) -> ExecutionResult {
    let call = engine.generate_structured(&request.prompt, &request.schema);
    let payload = match tokio::time::timeout(ceiling, call).await {
        Ok(Ok(payload)) => payload,
        Ok(Err(e)) => {
            tracing::warn!("Grading engine call failed: {}", e);
            return system_error(&e.to_string());
        }
        Err(_) => {
            tracing::warn!("Grading engine call timed out after {:?}", ceiling);
            return system_error("grading engine call timed out");
        }
    };
    tracing::debug!("Engine verdict payload: {:?}", payload);

    match serde_json::from_value::<RawVerdict>(payload) {
        Ok(raw) => normalize(raw),
        Err(e) => {
            tracing::warn!("Engine verdict payload did not match schema: {}", e);
            system_error(&format!("invalid verdict payload: {e}"))
        }
    }
}

fn normalize(raw: RawVerdict) -> ExecutionResult {
    let error = (raw.status != Status::Accepted).then(|| raw.output.clone());

    ExecutionResult {
        status: raw.status,
        output: raw.output,
        execution_time: raw.execution_time,
        memory: raw.memory,
        // The suite size is fixed by the workflow, whatever the engine claims.
        test_cases_passed: raw.test_cases_passed.map(|n| n.min(SIMULATED_SUITE_SIZE)),
        total_test_cases: Some(SIMULATED_SUITE_SIZE),
        error,
    }
}

fn system_error(msg: &str) -> ExecutionResult {
    let output = format!("System Error: {msg}");

    ExecutionResult {
        status: Status::RuntimeError,
        error: Some(output.clone()),
        output,
        execution_time: None,
        memory: None,
        test_cases_passed: None,
        total_test_cases: Some(0),
    }
}
