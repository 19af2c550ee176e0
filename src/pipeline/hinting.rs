use std::sync::Arc;

use tokio::sync::mpsc::{Receiver, Sender};

use crate::constants::HINT_TX_ERR;
use crate::domain::Problem;
use crate::engine::traits::TextEngine;
use crate::hint;
use crate::workspace::HintToken;

#[derive(Clone, Debug)]
pub struct HintJob {
    pub token: HintToken,
    pub problem: Arc<Problem>,
    pub code: String,
}

#[derive(Clone, Debug)]
pub struct HintOutcome {
    pub token: HintToken,
    pub text: String,
}

/// Consumes hint jobs independently of the grading stage; the two never
/// share a task or a channel, so neither can delay the other.
#[tracing::instrument]
pub fn handle_hinting(
    res_tx: Sender<HintOutcome>,
    mut hint_rx: Receiver<HintJob>,
    engine: Arc<dyn TextEngine>,
) {
    tokio::spawn(async move {
        while let Some(job) = hint_rx.recv().await {
            let engine = engine.clone();
            let res_tx = res_tx.clone();

            tokio::spawn(async move {
                tracing::debug!("Start hint request {:?}", job.token);
                let text = hint::request_hint(engine.as_ref(), &job.problem, &job.code).await;

                res_tx
                    .send(HintOutcome {
                        token: job.token,
                        text,
                    })
                    .await
                    .expect(HINT_TX_ERR);
            });
        }
    });
}
