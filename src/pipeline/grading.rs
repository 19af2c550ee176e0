use std::sync::Arc;

use tokio::sync::mpsc::{Receiver, Sender};

use crate::constants::OUTCOME_TX_ERR;
use crate::domain::ExecutionResult;
use crate::engine::traits::TextEngine;
use crate::grading;
use crate::prompt::GradingRequest;
use crate::workspace::RunToken;

#[derive(Clone, Debug)]
pub struct GradingJob {
    pub token: RunToken,
    pub request: GradingRequest,
}

#[derive(Clone, Debug)]
pub struct GradingOutcome {
    pub token: RunToken,
    pub result: ExecutionResult,
}

/// Consumes grading jobs and resolves each into an outcome on `res_tx`.
/// Every job is judged in its own task, so a slow engine call never delays
/// a superseding submission.
#[tracing::instrument]
pub fn handle_grading(
    res_tx: Sender<GradingOutcome>,
    mut grade_rx: Receiver<GradingJob>,
    engine: Arc<dyn TextEngine>,
) {
    tokio::spawn(async move {
        while let Some(job) = grade_rx.recv().await {
            let engine = engine.clone();
            let res_tx = res_tx.clone();

            tokio::spawn(async move {
                tracing::debug!("Start grading run {:?}", job.token);
                let result = grading::grade(engine.as_ref(), &job.request).await;
                tracing::debug!("Grading result for {:?}: {:?}", job.token, result);

                res_tx
                    .send(GradingOutcome {
                        token: job.token,
                        result,
                    })
                    .await
                    .expect(OUTCOME_TX_ERR);
            });
        }
    });
}
