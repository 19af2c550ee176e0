use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc::channel;

use crate::catalog::Catalog;
use crate::domain::{Language, Status};
use crate::engine::traits::EngineError;
use crate::pipeline::grading::{GradingJob, GradingOutcome, handle_grading};
use crate::pipeline::hinting::{HintJob, HintOutcome, handle_hinting};
use crate::stubs::engine::EngineStub;
use crate::workspace::{RunState, Workspace};

fn wrong_answer_stub(delay: Duration) -> EngineStub {
    EngineStub::new(
        Ok(json!({
            "status": "Wrong Answer",
            "output": "Expected [0,1] but got []",
            "executionTime": "61ms",
            "memory": "14.8MB",
            "testCasesPassed": 1,
            "totalTestCases": 3
        })),
        Ok("Look closely at what your function returns.".to_string()),
        delay,
    )
}

#[tokio::test]
async fn full_workflow_settles_verdict_and_hint() {
    let engine = Arc::new(wrong_answer_stub(Duration::from_millis(10)));

    let (grade_res_tx, mut grade_res_rx) = channel::<GradingOutcome>(16);
    let (grade_tx, grade_rx) = channel::<GradingJob>(16);
    let (hint_res_tx, mut hint_res_rx) = channel::<HintOutcome>(16);
    let (hint_tx, hint_rx) = channel::<HintJob>(16);

    handle_grading(grade_res_tx, grade_rx, engine.clone());
    handle_hinting(hint_res_tx, hint_rx, engine);

    let catalog = Catalog::builtin();
    let mut workspace = Workspace::new(catalog.by_id("1").unwrap(), Language::Java);
    workspace.edit_code("class Solution { public int[] twoSum(int[] nums, int target) { return new int[0]; } }");

    let (run_token, request) = workspace.begin_run();
    grade_tx
        .send(GradingJob {
            token: run_token,
            request,
        })
        .await
        .unwrap();

    let (hint_token, problem, code) = workspace.begin_hint();
    hint_tx
        .send(HintJob {
            token: hint_token,
            problem,
            code,
        })
        .await
        .unwrap();

    let grade_outcome = grade_res_rx.recv().await.unwrap();
    assert!(workspace.settle(grade_outcome.token, grade_outcome.result));

    let hint_outcome = hint_res_rx.recv().await.unwrap();
    assert!(workspace.apply_hint(hint_outcome.token, hint_outcome.text));

    let result = workspace.result().unwrap();
    assert_eq!(result.status, Status::WrongAnswer);
    assert_eq!(result.output, "Expected [0,1] but got []");
    assert_eq!(result.error.as_deref(), Some("Expected [0,1] but got []"));
    assert_eq!(result.test_cases_passed, Some(1));
    assert_eq!(result.total_test_cases, Some(3));
    assert_eq!(
        workspace.hint(),
        Some("Look closely at what your function returns.")
    );
}

#[tokio::test]
async fn resubmission_supersedes_the_first_run() {
    let engine = Arc::new(wrong_answer_stub(Duration::from_millis(20)));

    let (grade_res_tx, mut grade_res_rx) = channel::<GradingOutcome>(16);
    let (grade_tx, grade_rx) = channel::<GradingJob>(16);
    handle_grading(grade_res_tx, grade_rx, engine);

    let mut workspace = Workspace::new(Catalog::builtin().by_id("1").unwrap(), Language::Python);

    let (first_token, first_request) = workspace.begin_run();
    grade_tx
        .send(GradingJob {
            token: first_token,
            request: first_request,
        })
        .await
        .unwrap();

    // User re-submits before the first run resolves.
    workspace.edit_code("class Solution:\n    def twoSum(self, nums, target):\n        return []");
    let (second_token, second_request) = workspace.begin_run();
    grade_tx
        .send(GradingJob {
            token: second_token,
            request: second_request,
        })
        .await
        .unwrap();

    let mut settled = 0;
    for _ in 0..2 {
        let outcome = grade_res_rx.recv().await.unwrap();
        if workspace.settle(outcome.token, outcome.result) {
            settled += 1;
        }
    }

    // Only the latest run is allowed to settle, whichever outcome lands first.
    assert_eq!(settled, 1);
    assert!(workspace.result().is_some());
}

#[tokio::test]
async fn switching_language_mid_flight_discards_the_outcome() {
    let engine = Arc::new(wrong_answer_stub(Duration::from_millis(10)));

    let (grade_res_tx, mut grade_res_rx) = channel::<GradingOutcome>(16);
    let (grade_tx, grade_rx) = channel::<GradingJob>(16);
    handle_grading(grade_res_tx, grade_rx, engine);

    let catalog = Catalog::builtin();
    let mut workspace = Workspace::new(catalog.by_id("1").unwrap(), Language::Java);

    let (token, request) = workspace.begin_run();
    grade_tx.send(GradingJob { token, request }).await.unwrap();

    workspace.switch_language(Language::JavaScript);

    let outcome = grade_res_rx.recv().await.unwrap();
    assert!(!workspace.settle(outcome.token, outcome.result));

    assert_eq!(*workspace.run_state(), RunState::Idle);
    assert_eq!(
        workspace.code(),
        workspace
            .problem()
            .starter_code_for(Language::JavaScript)
    );
    assert!(workspace.hint().is_none());
}

#[tokio::test]
async fn engine_fault_converts_to_runtime_error_verdict() {
    let engine = Arc::new(EngineStub::new(
        Err(EngineError::Transport {
            msg: "connection refused".to_string(),
        }),
        Err(EngineError::Transport {
            msg: "connection refused".to_string(),
        }),
        Duration::from_millis(5),
    ));

    let (grade_res_tx, mut grade_res_rx) = channel::<GradingOutcome>(16);
    let (grade_tx, grade_rx) = channel::<GradingJob>(16);
    let (hint_res_tx, mut hint_res_rx) = channel::<HintOutcome>(16);
    let (hint_tx, hint_rx) = channel::<HintJob>(16);

    handle_grading(grade_res_tx, grade_rx, engine.clone());
    handle_hinting(hint_res_tx, hint_rx, engine);

    let mut workspace = Workspace::new(Catalog::builtin().by_id("2").unwrap(), Language::Java);

    let (run_token, request) = workspace.begin_run();
    grade_tx
        .send(GradingJob {
            token: run_token,
            request,
        })
        .await
        .unwrap();

    let (hint_token, problem, code) = workspace.begin_hint();
    hint_tx
        .send(HintJob {
            token: hint_token,
            problem,
            code,
        })
        .await
        .unwrap();

    let grade_outcome = grade_res_rx.recv().await.unwrap();
    assert!(workspace.settle(grade_outcome.token, grade_outcome.result));

    let result = workspace.result().unwrap();
    assert_eq!(result.status, Status::RuntimeError);
    assert!(result.output.starts_with("System Error: "));
    assert_eq!(result.total_test_cases, Some(0));
    assert_eq!(result.test_cases_passed, None);

    let hint_outcome = hint_res_rx.recv().await.unwrap();
    assert!(workspace.apply_hint(hint_outcome.token, hint_outcome.text));
    assert_eq!(
        workspace.hint(),
        Some("Could not generate hint at this time.")
    );
}
