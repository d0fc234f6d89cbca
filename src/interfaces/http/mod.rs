use crate::application::{GenerateApiTestsUseCase, GenerateTestsUseCase};
use crate::domain::api_test::{ApiTestRequest, HttpMethod};
use crate::domain::llm_config::LLMConfig;
use crate::domain::test_case::TestCaseRequest;
use crate::infrastructure::config::ServerConfig;
use actix_cors::Cors;
use actix_web::{dev::Server, post, web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};
use validator::Validate;

pub struct HttpState {
    pub llm_config: LLMConfig,
    pub generate_tests: GenerateTestsUseCase,
    pub generate_api_tests: GenerateApiTestsUseCase,
}

#[derive(Serialize)]
struct ResultResponse {
    result: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestsBody {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub api_schema: Option<Value>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateApiTestsBody {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub service_name: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub endpoint_name: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_response_code")]
    pub expected_response_code: String,
    #[serde(default = "default_response_status")]
    pub expected_response_status: String,
    #[serde(default)]
    pub expected_response_body: Option<Value>,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_response_code() -> String {
    "200".to_string()
}

fn default_response_status() -> String {
    "OK".to_string()
}

#[post("/generate/tests")]
async fn generate_tests(
    data: web::Data<HttpState>,
    body: web::Json<GenerateTestsBody>,
) -> impl Responder {
    if body.validate().is_err() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("Missing title or description"));
    }

    let request = TestCaseRequest::new(
        body.title.clone(),
        body.description.clone(),
        body.acceptance_criteria.clone(),
        body.api_schema.clone(),
    );

    info!(title = %request.title, "Generating test cases");

    match data
        .generate_tests
        .execute(&data.llm_config, &request)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(ResultResponse { result }),
        Err(e) => {
            error!("AI generation failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("AI generation failed."))
        }
    }
}

#[post("/generate/api-tests")]
async fn generate_api_tests(
    data: web::Data<HttpState>,
    body: web::Json<GenerateApiTestsBody>,
) -> impl Responder {
    if body.validate().is_err() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "serviceName and endpointName are required",
        ));
    }
    let Some(method) = HttpMethod::parse(&body.method) else {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "method must be one of GET, POST, PUT, PATCH, DELETE",
        ));
    };

    let request = ApiTestRequest {
        service_name: body.service_name.trim().to_string(),
        endpoint_name: body.endpoint_name.trim().to_string(),
        method,
        expected_response_code: body.expected_response_code.trim().to_string(),
        expected_response_status: body.expected_response_status.trim().to_string(),
        expected_response_body: body.expected_response_body.clone(),
    };

    info!(
        service = %request.service_name,
        endpoint = %request.endpoint_name,
        method = %request.method,
        "Generating Postman test script"
    );

    match data
        .generate_api_tests
        .execute(&data.llm_config, &request)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(ResultResponse { result }),
        Err(e) => {
            error!("Postman test generation failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Postman test generation failed."))
        }
    }
}

pub fn start_server(state: web::Data<HttpState>, config: &ServerConfig) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(generate_tests)
            .service(generate_api_tests)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{AppError, Result as AppResult};
    use crate::infrastructure::llm_clients::LLMClient;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    struct StubClient {
        reply: std::result::Result<String, String>,
    }

    #[async_trait]
    impl LLMClient for StubClient {
        async fn generate(&self, _: &LLMConfig, _: &str, _: &str) -> AppResult<String> {
            self.reply.clone().map_err(AppError::LLMError)
        }
    }

    fn state_with(reply: std::result::Result<String, String>) -> web::Data<HttpState> {
        let client: Arc<dyn LLMClient + Send + Sync> = Arc::new(StubClient { reply });
        web::Data::new(HttpState {
            llm_config: LLMConfig::default(),
            generate_tests: GenerateTestsUseCase::new(client.clone()),
            generate_api_tests: GenerateApiTestsUseCase::new(client),
        })
    }

    async fn call(
        state: web::Data<HttpState>,
        path: &str,
        body: serde_json::Value,
    ) -> (u16, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(generate_tests)
                .service(generate_api_tests),
        )
        .await;
        let request = test::TestRequest::post()
            .uri(path)
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;
        let status = response.status().as_u16();
        let payload: serde_json::Value = test::read_body_json(response).await;
        (status, payload)
    }

    #[actix_web::test]
    async fn test_generate_tests_happy_path() {
        let state = state_with(Ok("# 1. User Story Summary".to_string()));
        let (status, payload) = call(
            state,
            "/generate/tests",
            json!({
                "title": "Login",
                "description": "User logs in",
                "acceptanceCriteria": ["Valid credentials succeed"],
                "apiSchema": null
            }),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(payload["result"], "# 1. User Story Summary");
    }

    #[actix_web::test]
    async fn test_generate_tests_missing_title_is_400() {
        let state = state_with(Ok("unused".to_string()));
        let (status, payload) = call(
            state,
            "/generate/tests",
            json!({"title": "", "description": "User logs in"}),
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(payload["error"], "Missing title or description");
    }

    #[actix_web::test]
    async fn test_generate_tests_absent_title_field_is_400() {
        let state = state_with(Ok("unused".to_string()));
        let (status, payload) =
            call(state, "/generate/tests", json!({"description": "User logs in"})).await;
        assert_eq!(status, 400);
        assert_eq!(payload["error"], "Missing title or description");
    }

    #[actix_web::test]
    async fn test_generate_tests_upstream_failure_is_500_with_generic_error() {
        let state = state_with(Err("API error (429): too many requests".to_string()));
        let (status, payload) = call(
            state,
            "/generate/tests",
            json!({"title": "Login", "description": "User logs in"}),
        )
        .await;
        assert_eq!(status, 500);
        assert_eq!(payload["error"], "AI generation failed.");
        assert!(!payload["error"].as_str().unwrap().contains("429"));
    }

    #[actix_web::test]
    async fn test_generate_api_tests_happy_path_with_defaults() {
        let state = state_with(Ok("pm.test();".to_string()));
        let (status, payload) = call(
            state,
            "/generate/api-tests",
            json!({"serviceName": "OrderService", "endpointName": "GetOrder"}),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(payload["result"], "pm.test();");
    }

    #[actix_web::test]
    async fn test_generate_api_tests_missing_service_is_400() {
        let state = state_with(Ok("unused".to_string()));
        let (status, payload) = call(
            state,
            "/generate/api-tests",
            json!({"serviceName": "", "endpointName": "GetOrder"}),
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(payload["error"], "serviceName and endpointName are required");
    }

    #[actix_web::test]
    async fn test_generate_api_tests_rejects_unknown_method() {
        let state = state_with(Ok("unused".to_string()));
        let (status, payload) = call(
            state,
            "/generate/api-tests",
            json!({
                "serviceName": "OrderService",
                "endpointName": "GetOrder",
                "method": "TRACE"
            }),
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(
            payload["error"],
            "method must be one of GET, POST, PUT, PATCH, DELETE"
        );
    }

    #[actix_web::test]
    async fn test_generate_api_tests_upstream_failure_is_500() {
        let state = state_with(Err("Request failed: timeout".to_string()));
        let (status, payload) = call(
            state,
            "/generate/api-tests",
            json!({
                "serviceName": "OrderService",
                "endpointName": "GetOrder",
                "expectedResponseBody": {"success": true}
            }),
        )
        .await;
        assert_eq!(status, 500);
        assert_eq!(payload["error"], "Postman test generation failed.");
    }
}
