//! OpenRouter chat-completions provider for machine translation
//!
//! Every translation is one chat-completions request: a system instruction
//! naming the source and target languages, the text as the user message, and
//! a low-temperature, bounded-length sampling configuration.
//!
//! # Authentication
//!
//! The provider sends the API key as a bearer token. [`OpenRouterProvider::from_env`]
//! reads it from the `OPENROUTER_API_KEY` environment variable. Obtain a key from:
//! https://openrouter.ai/
//!
//! # Example
//!
//! ```ignore
//! use leveler::mt::{MachineTranslator, OpenRouterProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenRouterProvider::from_env()?;
//!     let result = provider.translate("Where is the library?", "en", "fr").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use crate::config::Settings;
use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, SamplingConfig, translation_instruction};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash-lite";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// OpenRouter chat-completions provider
#[derive(Clone)]
pub struct OpenRouterProvider {
    /// API key for authentication
    api_key: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Full chat-completions endpoint
    api_url: String,
    /// Model identifier sent with every request
    model: String,
    sampling: SamplingConfig,
}

impl OpenRouterProvider {
    /// Create a provider with an explicit API key and default endpoint, model and timeout
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If the API key is empty or HTTP client creation fails
    pub fn new(api_key: String) -> MtResult<Self> {
        Self::with_options(
            api_key,
            DEFAULT_API_URL.to_string(),
            DEFAULT_MODEL.to_string(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a provider with every connection option spelled out
    pub fn with_options(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            api_url,
            model,
            sampling: SamplingConfig::default(),
        })
    }

    /// Create a provider from loaded [`Settings`]
    ///
    /// Fails with `ConfigError` when no API key was configured.
    pub fn from_settings(settings: &Settings) -> MtResult<Self> {
        let api_key = settings.api_key.clone().ok_or_else(|| {
            MtError::ConfigError("OPENROUTER_API_KEY environment variable not set".to_string())
        })?;

        Self::with_options(
            api_key,
            settings.api_url.clone(),
            settings.model.clone(),
            settings.timeout,
        )
    }

    /// Create a provider from the `OPENROUTER_*` environment variables
    pub fn from_env() -> MtResult<Self> {
        Self::from_settings(&Settings::from_env()?)
    }

    /// Issue one completion request and return the trimmed first choice
    async fn complete_translation(
        &self,
        system_instruction: &str,
        user_text: &str,
        sampling: SamplingConfig,
    ) -> MtResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: user_text,
                },
            ],
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", "http://localhost:8000")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MtError::NetworkError(format!(
                "{} from {}: {}",
                status, self.api_url, error_text
            )));
        }

        let raw = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| MtError::InvalidResponse(format!("Failed to parse API response: {}", e)))?;

        let choice = parsed.choices.into_iter().next().ok_or(MtError::NoCompletion)?;
        let content = choice.message.content.ok_or_else(|| {
            MtError::InvalidResponse("missing 'message.content' in first choice".to_string())
        })?;

        Ok(content.trim().to_string())
    }
}

impl std::fmt::Debug for OpenRouterProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterProvider")
            .field("api_key", &"***")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("sampling", &self.sampling)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for OpenRouterProvider {
    async fn translate(
        &self,
        text: &str,
        source_code: &str,
        target_code: &str,
    ) -> MtResult<String> {
        debug!(
            model = %self.model,
            source = source_code,
            target = target_code,
            chars = text.len(),
            "requesting completion"
        );
        let instruction = translation_instruction(source_code, target_code);
        self.complete_translation(&instruction, text, self.sampling)
            .await
    }

    fn provider_name(&self) -> &str {
        "OpenRouter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";

    fn provider_for(server: &MockServer) -> OpenRouterProvider {
        OpenRouterProvider::with_options(
            "test-key".to_string(),
            format!("{}{}", server.uri(), COMPLETIONS_PATH),
            "test/model".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "gen-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": content } }
            ]
        })
    }

    // ========== Initialization Tests ==========

    #[test]
    fn test_new_with_valid_key() {
        let provider = OpenRouterProvider::new("test-api-key".to_string());
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().provider_name(), "OpenRouter");
    }

    #[test]
    fn test_new_with_empty_key() {
        match OpenRouterProvider::new("".to_string()) {
            Err(MtError::ConfigError(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_new_with_whitespace_key() {
        assert!(OpenRouterProvider::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_from_settings_without_key() {
        let settings = Settings {
            api_key: None,
            ..Settings::default()
        };
        match OpenRouterProvider::from_settings(&settings) {
            Err(MtError::ConfigError(msg)) => assert!(msg.contains("not set")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_debug_output_masks_key() {
        let provider = OpenRouterProvider::new("secret-key".to_string()).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("secret-key"));
    }

    // ========== Request/Response Tests ==========

    #[tokio::test]
    async fn test_translate_sends_prompt_and_trims() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "test/model",
                "temperature": 0.3,
                "max_tokens": 500,
                "messages": [
                    {
                        "role": "system",
                        "content": "You are a STRICT translator. Translate the following text from English to French LITERALLY and STRICTLY as it. Only output the translation, nothing else."
                    },
                    { "role": "user", "content": "Where is the library?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                "  Où est la bibliothèque ?\n",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let result = provider
            .translate("Where is the library?", "en", "fr")
            .await
            .unwrap();
        assert_eq!(result, "Où est la bibliothèque ?");
    }

    #[tokio::test]
    async fn test_empty_choices_is_no_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let result = provider_for(&server).translate("hello", "en", "de").await;
        assert_eq!(result, Err(MtError::NoCompletion));
    }

    #[tokio::test]
    async fn test_missing_choices_is_no_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "x" })))
            .mount(&server)
            .await;

        let result = provider_for(&server).translate("hello", "en", "de").await;
        assert_eq!(result, Err(MtError::NoCompletion));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        match provider_for(&server).translate("hello", "en", "de").await {
            Err(MtError::InvalidResponse(msg)) => assert!(msg.contains("parse")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_null_content_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [ { "message": { "role": "assistant", "content": null } } ]
            })))
            .mount(&server)
            .await;

        let result = provider_for(&server).translate("hello", "en", "de").await;
        assert!(matches!(result, Err(MtError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_http_error_status_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        match provider_for(&server).translate("hello", "en", "de").await {
            Err(MtError::NetworkError(msg)) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("invalid key"));
            }
            other => panic!("Expected NetworkError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("late"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let provider = OpenRouterProvider::with_options(
            "test-key".to_string(),
            format!("{}{}", server.uri(), COMPLETIONS_PATH),
            "test/model".to_string(),
            Duration::from_millis(200),
        )
        .unwrap();

        let result = provider.translate("hello", "en", "de").await;
        assert!(matches!(result, Err(MtError::NetworkError(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let provider = OpenRouterProvider::with_options(
            "test-key".to_string(),
            "http://127.0.0.1:9/api/v1/chat/completions".to_string(),
            "test/model".to_string(),
            Duration::from_secs(2),
        )
        .unwrap();

        let result = provider.translate("hello", "en", "de").await;
        assert!(matches!(result, Err(MtError::NetworkError(_))));
    }

    // ========== Integration Tests (require real API key) ==========

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_real_api_single_translation() {
        if std::env::var("OPENROUTER_API_KEY").is_err() {
            eprintln!("Skipping: OPENROUTER_API_KEY not set");
            return;
        }

        let provider = OpenRouterProvider::from_env().unwrap();
        let result = provider.translate("Hello", "en", "fr").await.unwrap();
        println!("Translation: {} → {}", "Hello", result);
        assert!(!result.is_empty());
    }
}
