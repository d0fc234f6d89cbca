use crate::domain::api_test::{ApiTestRequest, HttpMethod};
use crate::domain::error::{AppError, Result};
use crate::domain::test_case::{criteria_from_lines, TestCaseRequest};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-field validation messages keyed by the offending field. An empty
/// mapping is the sole "proceed" signal.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(|msg| msg.as_str())
    }

    fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.insert(field, message);
        }
    }

    fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }
}

/// Raw user-story form state, exactly as a form would hold it.
#[derive(Debug, Default, Clone)]
pub struct TestCaseDraft {
    pub title: String,
    pub description: String,
    pub acceptance_criteria: String,
    pub api_schema: String,
}

impl TestCaseDraft {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require("title", &self.title, "Title is required.");
        errors.require("description", &self.description, "Description is required.");
        if criteria_from_lines(&self.acceptance_criteria).is_empty() {
            errors.insert(
                "acceptance_criteria",
                "At least one acceptance criterion is required.",
            );
        }
        if parse_optional_json(&self.api_schema).is_err() {
            errors.insert("api_schema", "API Schema must be valid JSON.");
        }
        errors
    }

    /// Builds the immutable request, failing when validation does not pass.
    pub fn to_request(&self) -> Result<TestCaseRequest> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(AppError::ValidationError(
                "Test case form has invalid fields.".to_string(),
            ));
        }
        let api_schema = parse_optional_json(&self.api_schema)
            .map_err(AppError::ParseError)?;
        Ok(TestCaseRequest::new(
            self.title.clone(),
            self.description.clone(),
            criteria_from_lines(&self.acceptance_criteria),
            api_schema,
        ))
    }
}

/// Raw Postman-script form state.
#[derive(Debug, Clone)]
pub struct ApiTestDraft {
    pub service_name: String,
    pub endpoint_name: String,
    pub method: String,
    pub expected_response_code: String,
    pub expected_response_status: String,
    pub expected_response_body: String,
}

impl Default for ApiTestDraft {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            endpoint_name: String::new(),
            method: "GET".to_string(),
            expected_response_code: "200".to_string(),
            expected_response_status: "OK".to_string(),
            expected_response_body: String::new(),
        }
    }
}

impl ApiTestDraft {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require(
            "service_name",
            &self.service_name,
            "Service name is required.",
        );
        errors.require(
            "endpoint_name",
            &self.endpoint_name,
            "Endpoint name is required.",
        );
        if self.method.trim().is_empty() {
            errors.insert("method", "HTTP method is required.");
        } else if HttpMethod::parse(&self.method).is_none() {
            errors.insert(
                "method",
                "HTTP method must be one of GET, POST, PUT, PATCH, DELETE.",
            );
        }
        let code = self.expected_response_code.trim();
        if code.is_empty() {
            errors.insert(
                "expected_response_code",
                "Expected response code is required.",
            );
        } else if code.parse::<i64>().is_err() {
            errors.insert("expected_response_code", "Response code must be a number.");
        }
        errors.require(
            "expected_response_status",
            &self.expected_response_status,
            "Expected response status is required.",
        );
        if parse_optional_json(&self.expected_response_body).is_err() {
            errors.insert(
                "expected_response_body",
                "Expected response body must be valid JSON.",
            );
        }
        errors
    }

    /// Builds the immutable request. Unlike the form it replaces, the
    /// Postman flow requires a passing validation before submission.
    pub fn to_request(&self) -> Result<ApiTestRequest> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(AppError::ValidationError(
                "Postman form has invalid fields.".to_string(),
            ));
        }
        let method = HttpMethod::parse(&self.method).ok_or_else(|| {
            AppError::ValidationError("Unsupported HTTP method.".to_string())
        })?;
        let expected_response_body = parse_optional_json(&self.expected_response_body)
            .map_err(AppError::ParseError)?;
        Ok(ApiTestRequest {
            service_name: self.service_name.trim().to_string(),
            endpoint_name: self.endpoint_name.trim().to_string(),
            method,
            expected_response_code: self.expected_response_code.trim().to_string(),
            expected_response_status: self.expected_response_status.trim().to_string(),
            expected_response_body,
        })
    }
}

/// Parses an optional JSON field: blank input is `None`, malformed input is
/// an error carrying the parser's message.
fn parse_optional_json(input: &str) -> std::result::Result<Option<Value>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| e.to_string())
}
