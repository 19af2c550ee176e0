use std::sync::Arc;

use crate::domain::{ExecutionResult, Language, Problem, Submission};
use crate::prompt::{self, GradingRequest};

/// Identifies one grading run. Tokens are issued in strictly increasing
/// order per workspace; only the most recently issued token may settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunToken(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HintToken(u64);

#[derive(Clone, Debug, PartialEq)]
pub enum RunState {
    Idle,
    Running { token: RunToken },
    Settled { result: ExecutionResult },
}

/// Session-scoped editor state plus the verdict state machine. All engine
/// traffic happens elsewhere; the workspace only issues requests and
/// applies (or discards) their outcomes.
#[derive(Debug)]
pub struct Workspace {
    problem: Arc<Problem>,
    language: Language,
    code: String,
    run_state: RunState,
    hint: Option<String>,
    runs_issued: u64,
    hints_issued: u64,
    hint_pending: Option<HintToken>,
}

impl Workspace {
    pub fn new(problem: Arc<Problem>, language: Language) -> Self {
        let code = problem.starter_code_for(language).to_string();

        Self {
            problem,
            language,
            code,
            run_state: RunState::Idle,
            hint: None,
            runs_issued: 0,
            hints_issued: 0,
            hint_pending: None,
        }
    }

    pub fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    pub fn result(&self) -> Option<&ExecutionResult> {
        match &self.run_state {
            RunState::Settled { result } => Some(result),
            _ => None,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn edit_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    /// Switching problems resets the editor to the new problem's starter
    /// code for the current language and drops any verdict, hint, or
    /// in-flight request.
    pub fn switch_problem(&mut self, problem: Arc<Problem>) {
        self.problem = problem;
        self.reset_session();
    }

    pub fn switch_language(&mut self, language: Language) {
        self.language = language;
        self.reset_session();
    }

    fn reset_session(&mut self) {
        self.code = self.problem.starter_code_for(self.language).to_string();
        self.run_state = RunState::Idle;
        self.hint = None;
        self.hint_pending = None;
    }

    /// Start a grading run over the current code. A run started while an
    /// earlier one is still in flight supersedes it: the stale outcome is
    /// rejected by `settle` when it eventually arrives.
    // TODO: Add cancelling a run that is still in flight
    pub fn begin_run(&mut self) -> (RunToken, GradingRequest) {
        self.runs_issued += 1;
        let token = RunToken(self.runs_issued);
        self.run_state = RunState::Running { token };

        let submission = Submission::new(self.code.clone(), self.language, self.problem.clone());
        tracing::debug!(
            "Issued run #{} for submission {} at {}",
            token.0,
            submission.id,
            submission.created_at
        );

        (token, prompt::build_grading_request(&submission))
    }

    /// Apply a grading outcome. Returns `false` without touching the state
    /// when the token no longer names the latest in-flight run.
    pub fn settle(&mut self, token: RunToken, result: ExecutionResult) -> bool {
        match self.run_state {
            RunState::Running { token: current } if current == token => {
                self.run_state = RunState::Settled { result };
                true
            }
            _ => {
                tracing::debug!("Discarding stale grading outcome for {:?}", token);
                false
            }
        }
    }

    /// Start a hint request over the current code. Independent of the
    /// grading run; the latest request wins.
    pub fn begin_hint(&mut self) -> (HintToken, Arc<Problem>, String) {
        self.hints_issued += 1;
        let token = HintToken(self.hints_issued);
        self.hint_pending = Some(token);
        tracing::debug!("Issued hint request #{}", token.0);

        (token, self.problem.clone(), self.code.clone())
    }

    pub fn apply_hint(&mut self, token: HintToken, text: String) -> bool {
        if self.hint_pending == Some(token) {
            self.hint = Some(text);
            self.hint_pending = None;
            true
        } else {
            tracing::debug!("Discarding stale hint for {:?}", token);
            false
        }
    }
}
