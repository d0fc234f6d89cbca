use crate::domain::api_test::ApiTestRequest;
use crate::domain::test_case::TestCaseRequest;

pub const TEST_CASE_SYSTEM_PROMPT: &str = "You are an expert QA test engineer. Your goal is to help functional testers and QA engineers by summarizing user stories and generating detailed test cases in clean, readable Markdown. Follow the instructions below exactly.";

pub const POSTMAN_SYSTEM_PROMPT: &str = "You generate Postman test scripts.";

const NO_SCHEMA_SENTINEL: &str = "None";
const NO_BODY_SENTINEL: &str = "No JSON body provided";

/// The skeleton the model fills in for the Postman flow. Square-bracket
/// tokens are replaced per the numbered instructions appended below it.
const POSTMAN_TEMPLATE: &str = r#"// ===========================================
// Request: [METHOD] [URL]
// Purpose: [Description]
// Expected status: [RESPONSE_CODE] [RESPONSE_STATUS]
// ===========================================

// ~~ Test Configuration ~~
var runBaselineTests = pm.collectionVariables.get("runBaselineTests");
var runFieldDefinitionTests = pm.collectionVariables.get("runFieldDefinitionTests");
var runDatatypeTests = pm.collectionVariables.get("runDatatypeTests");
var runFunctionalTests = pm.collectionVariables.get("runFunctionalTests");

// ~~ Generic Uptime Tests ~~
pm.test("[SERVICE] [ENDPOINT] - Status code is [CODE]", function () {
    pm.response.to.have.status([CODE]);
});

pm.test("[SERVICE] [ENDPOINT] - Response status is [RESPONSE_STATUS]", function () {
    pm.expect(pm.response.status).to.eql("[RESPONSE_STATUS]");
});

// Conditional check for further testing
if (pm.response.code === [CODE])
{
    // ~~ Variable Declarations ~~
    var jsonData = pm.response.json();

    if (runBaselineTests)
    {
        // ~~ Field Definition Tests ~~
        if (runFieldDefinitionTests)
        {
            // field presence tests go here
        }

        // ~~ Datatype Tests ~~
        if (runDatatypeTests)
        {
            // datatype tests go here
        }

        // ~~ Functional Tests ~~
        if (runFunctionalTests)
        {
            // functional tests go here
        }
    }

    console.log(pm.info.requestName + " : PASS");
}
else
{
    console.log(pm.info.requestName + " : FAIL");
    console.log(pm.response.text());
}"#;

/// Builds the user-story prompt. Pure and deterministic: identical requests
/// produce byte-identical prompts.
pub fn build_test_case_prompt(request: &TestCaseRequest) -> String {
    let criteria = if request.acceptance_criteria.is_empty() {
        NO_SCHEMA_SENTINEL.to_string()
    } else {
        request
            .acceptance_criteria
            .iter()
            .map(|c| sanitize_value(c))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let schema = match &request.api_schema {
        Some(value) => pretty_json(value),
        None => NO_SCHEMA_SENTINEL.to_string(),
    };

    format!(
        r#"USER STORY TITLE:
{title}

DESCRIPTION:
{description}

ACCEPTANCE CRITERIA:
{criteria}

API SCHEMA:
{schema}

Please produce the output in **Markdown format** exactly as follows:

---

# 1. User Story Summary
- Core Functionality: Describe what the system should do.
- Purpose: Why is this user story needed?
- Actors: Who is involved (user, system, external systems)?
- Success Outcome: What does successful completion look like?

# 2. High-Level Test Scenarios (Titles Only)
- Provide a numbered list of concise test scenario titles (do not include steps yet).
- Include happy path, negative, edge cases, and validation scenarios.

# 3. Detailed Test Cases
For each test scenario listed above, provide in the following format:

### Test Scenario {{number}}: {{title}}
**Preconditions:** Describe the initial state or setup required.
**Test Steps:** Step-by-step instructions to execute the test.
**Expected Result:** What should happen when the steps are executed.

# 4. Postman Tests (Only if API schema provided)
- Provide code snippets in Postman.
- Validate field presence, types, and negative scenarios.

**Additional Instructions:**
- Do not use tables.
- Format using Markdown headings, lists, and code blocks.
- Be concise but complete, especially for summary: always include core functionality, purpose, actors, and success outcome.
- Use bullet points and sub-headings for readability.
"#,
        title = sanitize_value(&request.title),
        description = sanitize_value(&request.description),
        criteria = criteria,
        schema = schema,
    )
}

/// Builds the Postman-script prompt around the fixed template.
pub fn build_postman_prompt(request: &ApiTestRequest) -> String {
    let body = match &request.expected_response_body {
        Some(value) => pretty_json(value),
        None => NO_BODY_SENTINEL.to_string(),
    };

    let mut prompt = String::new();
    prompt.push_str(
        "You are an expert QA engineer who writes Postman test scripts. Use the Postman test template below and replace placeholders with the provided inputs.\n\
Return ONLY the final JavaScript test script (do NOT add extra explanation).\n\n\
Template (replace tokens in square brackets):\n\n",
    );
    prompt.push_str(POSTMAN_TEMPLATE);
    prompt.push_str(&format!(
        r#"

Now generate a full Postman test script by:
1) Replacing [SERVICE] with "{service}"
2) Replacing [ENDPOINT] with "{endpoint}"
3) Replacing [METHOD] with "{method}"
4) Replacing [CODE] with {code}
5) Replacing [RESPONSE_STATUS] with "{status}"
6) Where appropriate, add field-presence tests and datatype tests using the provided response body schema.
7) Functional tests:
    - If the body contains fields like "message", "status", "success", "code", "errors", "items", "id", generate meaningful functional tests.
    - Check expected values when possible (e.g. success === true, message === "Created successfully").
    - Check arrays contain at least one item if reasonable.
    - Check enums (e.g. status: "ACTIVE" or "DISABLED").
    - Check numeric ranges when obvious (e.g. amount > 0).
    - If no functional tests can be inferred, return an empty functional block (but keep the placeholder comment).

Expected Response Body:
{body}

Rules:
- Provide field presence tests when the schema has fields.
- For each field in the schema, generate:
  - a presence test: pm.expect(jsonData).to.have.property("field")
  - a datatype test that checks typeof / Array.isArray where appropriate
  - for arrays, add a test that array.length >= 0 (or > 0 if reasonable)
- For boolean fields, check true/false expectations only if the field name suggests it (e.g. 'success' -> expect true).
- If the schema is null or empty, produce placeholder field tests (commented) so the user knows where to add them.
- Output must be a single JavaScript code block (no surrounding triple backticks) ready to paste into Postman's Tests tab.
"#,
        service = sanitize_value(&request.service_name),
        endpoint = sanitize_value(&request.endpoint_name),
        method = request.method.as_str(),
        code = sanitize_value(&request.expected_response_code),
        status = sanitize_value(&request.expected_response_status),
        body = body,
    ));

    prompt
}

/// Interpolated user values must not be able to break the template's own
/// delimiters: control characters are dropped and backtick fences defused.
fn sanitize_value(input: &str) -> String {
    let stripped: String = input
        .chars()
        .filter(|ch| (*ch as u32) >= 0x20 || *ch == '\n' || *ch == '\t')
        .collect();
    stripped.replace("```", "'''")
}

fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
