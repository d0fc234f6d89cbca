use serde_json::Value;

/// A validated user-story request, immutable once handed to the prompt
/// builder.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCaseRequest {
    pub title: String,
    pub description: String,
    pub acceptance_criteria: Vec<String>,
    pub api_schema: Option<Value>,
}

impl TestCaseRequest {
    pub fn new(
        title: String,
        description: String,
        acceptance_criteria: Vec<String>,
        api_schema: Option<Value>,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            acceptance_criteria: normalize_criteria(acceptance_criteria),
            api_schema,
        }
    }
}

/// Splits a newline-delimited textarea value into criterion lines.
/// Blank lines are dropped.
pub fn criteria_from_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

fn normalize_criteria(criteria: Vec<String>) -> Vec<String> {
    criteria
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}
