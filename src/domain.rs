use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    JavaScript,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Python, Language::Java, Language::JavaScript];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::JavaScript => "javascript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub difficulty: Difficulty,
    pub acceptance: String,
    pub description: String,
    pub examples: Vec<Example>,
    pub starter_code: HashMap<Language, String>,
}

impl Problem {
    pub fn starter_code_for(&self, language: Language) -> &str {
        self.starter_code
            .get(&language)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Ephemeral snapshot of the editor state sent off for judging. A new one is
/// created for every grading or hint request and discarded afterwards.
#[derive(Clone, Debug)]
pub struct Submission {
    pub id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub code: String,
    pub language: Language,
    pub problem: Arc<Problem>,
}

impl Submission {
    pub fn new(code: impl Into<String>, language: Language, problem: Arc<Problem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            code: code.into(),
            language,
            problem,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Accepted,
    #[serde(rename = "Wrong Answer")]
    WrongAnswer,
    #[serde(rename = "Runtime Error")]
    RuntimeError,
    #[serde(rename = "Compilation Error")]
    CompilationError,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Accepted => "Accepted",
            Status::WrongAnswer => "Wrong Answer",
            Status::RuntimeError => "Runtime Error",
            Status::CompilationError => "Compilation Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verdict for a single submission as shown to the user. `error` mirrors
/// `output` whenever the status is anything but `Accepted`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub status: Status,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_cases_passed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_test_cases: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn is_accepted(&self) -> bool {
        self.status == Status::Accepted
    }
}
