use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LLMConfig,
}

impl AppConfig {
    /// Defaults overridden by `QA_TESTGEN_*` environment variables
    /// (e.g. `QA_TESTGEN_SERVER__PORT`, `QA_TESTGEN_LLM__MODEL`). The API
    /// credential also falls back to the plain `OPENAI_API_KEY` variable.
    pub fn load() -> Result<Self> {
        let mut config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Env::prefixed("QA_TESTGEN_").split("__"))
            .extract()
            .map_err(|e| AppError::Internal(format!("Invalid configuration: {}", e)))?;

        if config.llm.api_key.is_none() {
            config.llm.api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        Ok(config)
    }
}
