use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LLMConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4.1".to_string(),
            api_key: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

impl LLMConfig {
    /// The Postman flow pins deterministic generation parameters.
    pub fn for_postman_scripts(&self) -> Self {
        Self {
            temperature: Some(0.2),
            max_tokens: Some(1200),
            ..self.clone()
        }
    }
}
