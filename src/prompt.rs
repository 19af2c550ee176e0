use serde_json::{Value, json};

use crate::domain::{Problem, Submission};

/// Fully assembled grading request: the instruction prompt plus the schema
/// the engine response has to conform to. Pure function of the submission,
/// so identical submissions always produce identical requests.
#[derive(Clone, Debug, PartialEq)]
pub struct GradingRequest {
    pub prompt: String,
    pub schema: Value,
}

pub fn build_grading_request(submission: &Submission) -> GradingRequest {
    GradingRequest {
        prompt: grading_prompt(submission),
        schema: grading_schema(),
    }
}

fn grading_prompt(submission: &Submission) -> String {
    format!(
        "You are a strict code execution engine for a competitive programming platform (like LeetCode).

Problem Title: {title}
Problem Description: {description}
Language: {language}

User Code:
{code}

Your Task:
1. Analyze the code for syntax errors.
2. If valid, mentally execute the code against 3 representative test cases (including edge cases).
3. Determine if the solution is correct (\"Accepted\") or fails (\"Wrong Answer\", \"Runtime Error\", \"Compilation Error\").
4. Return the result in the specified JSON format.

Restrictions:
- Be strict. O(n^2) solutions for O(n) problems should technically pass unless they time out, but for this simulation, focus on correctness.
- If compilation fails, return \"Compilation Error\" and the error message.",
        title = submission.problem.title,
        description = submission.problem.description,
        language = submission.language,
        code = submission.code,
    )
}

pub fn grading_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "status": {
                "type": "string",
                "enum": ["Accepted", "Wrong Answer", "Runtime Error", "Compilation Error"]
            },
            "output": {
                "type": "string",
                "description": "Console output or error message"
            },
            "executionTime": {
                "type": "string",
                "description": "Simulated execution time, e.g., '52ms'"
            },
            "memory": {
                "type": "string",
                "description": "Simulated memory usage, e.g., '14.2MB'"
            },
            "testCasesPassed": {
                "type": "integer",
                "description": "Number of test cases passed out of 3"
            },
            "totalTestCases": {
                "type": "integer",
                "description": "Total test cases (3)"
            }
        },
        "required": ["status", "output", "executionTime", "testCasesPassed"]
    })
}

pub fn build_hint_prompt(problem: &Problem, code: &str) -> String {
    format!(
        "The user is stuck on the following problem: \"{title}\".
Current code snippet:
{code}

Provide a helpful, subtle hint that points them in the right direction without giving away the full solution code. Keep it under 2 sentences.",
        title = problem.title,
    )
}
