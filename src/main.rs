use std::panic;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::channel;
use tracing_subscriber::EnvFilter;

use crate::catalog::Catalog;
use crate::domain::Language;
use crate::engine::gemini::GeminiEngine;
use crate::engine::traits::TextEngine;
use crate::pipeline::grading::{GradingJob, GradingOutcome, handle_grading};
use crate::pipeline::hinting::{HintJob, HintOutcome, handle_hinting};
use crate::stubs::engine::EngineStub;
use crate::workspace::Workspace;

mod catalog;
mod constants;
mod domain;
mod engine;
mod grading;
mod hint;
mod pipeline;
mod prompt;
mod stubs;
mod workspace;

#[cfg(test)]
mod integration_test;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    set_panic_hook();

    let engine: Arc<dyn TextEngine> = match GeminiEngine::from_env() {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            tracing::warn!("Gemini backend unavailable ({}), using canned engine stub", e);
            Arc::new(EngineStub::accepting(Duration::from_millis(300)))
        }
    };

    let catalog = Catalog::builtin();
    let problem = catalog.by_id("1").ok_or("catalog is missing problem 1")?;
    let mut workspace = Workspace::new(problem, Language::Java);

    let (grade_res_tx, mut grade_res_rx) = channel::<GradingOutcome>(16);
    let (grade_tx, grade_rx) = channel::<GradingJob>(16);
    let (hint_res_tx, mut hint_res_rx) = channel::<HintOutcome>(16);
    let (hint_tx, hint_rx) = channel::<HintJob>(16);

    handle_grading(grade_res_tx, grade_rx, engine.clone());
    handle_hinting(hint_res_tx, hint_rx, engine);

    tracing::info!(
        "Submitting {} starter code for problem \"{}\"",
        workspace.language(),
        workspace.problem().title
    );

    let (run_token, request) = workspace.begin_run();
    grade_tx
        .send(GradingJob {
            token: run_token,
            request,
        })
        .await?;

    let (hint_token, problem, code) = workspace.begin_hint();
    hint_tx
        .send(HintJob {
            token: hint_token,
            problem,
            code,
        })
        .await?;

    let mut verdict_settled = false;
    let mut hint_settled = false;
    while !(verdict_settled && hint_settled) {
        tokio::select! {
            Some(outcome) = grade_res_rx.recv() => {
                verdict_settled = workspace.settle(outcome.token, outcome.result);
            }
            Some(outcome) = hint_res_rx.recv() => {
                hint_settled = workspace.apply_hint(outcome.token, outcome.text);
            }
        }
    }

    if let Some(result) = workspace.result() {
        println!("{}", result.status);
        println!("{}", result.output);
        if let (Some(passed), Some(total)) = (result.test_cases_passed, result.total_test_cases) {
            println!("Test cases: {passed}/{total}");
        }
        if let (Some(time), Some(memory)) = (&result.execution_time, &result.memory) {
            println!("Runtime: {time}  Memory: {memory}");
        }
    }
    if let Some(hint) = workspace.hint() {
        println!("Hint: {hint}");
    }

    Ok(())
}

fn set_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        tracing::error!(
            message = "panic occurred",
            panic = %panic_info
        );
    }));
}
