use crate::application::{GenerateApiTestsUseCase, GenerateTestsUseCase};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::{LLMClient, OpenAIClient};
use crate::interfaces::http::{start_server, HttpState};
use actix_web::web;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    if config.llm.api_key.is_none() {
        warn!("No OpenAI API key configured; generation requests will fail");
    }

    let llm_client: Arc<dyn LLMClient + Send + Sync> = Arc::new(OpenAIClient::new());
    let state = web::Data::new(HttpState {
        llm_config: config.llm.clone(),
        generate_tests: GenerateTestsUseCase::new(llm_client.clone()),
        generate_api_tests: GenerateApiTestsUseCase::new(llm_client),
    });

    info!(
        "QA test generator backend running at http://{}:{}",
        config.server.host, config.server.port
    );
    start_server(state, &config.server)?.await
}
