//! Machine Translation trait and prompt helpers
//!
//! This module defines the `MachineTranslator` trait for provider abstraction,
//! enabling support for different MT backends (OpenRouter, mock, etc.)
//! without coupling the degradation pipeline to any specific implementation.
//!
//! # Example
//!
//! ```ignore
//! use leveler::mt::{MachineTranslator, OpenRouterProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenRouterProvider::from_env()?;
//!     let result = provider.translate("Where is the library?", "en", "sw").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::mt::error::MtResult;
use crate::mt::languages::language_name;
use async_trait::async_trait;

/// Generic trait for machine translation providers
///
/// Implementations perform exactly one provider call per `translate`
/// invocation and never retry. Caching is layered on top by
/// [`TranslationClient`](crate::mt::client::TranslationClient).
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target language
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_code` - Source language code ("en" or a pool code)
    /// * `target_code` - Target language code ("en" or a pool code)
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(MtError)` - If the provider call fails
    async fn translate(&self, text: &str, source_code: &str, target_code: &str)
    -> MtResult<String>;

    /// Get the name of this translation provider
    ///
    /// Used for logging to identify which provider handled a translation.
    fn provider_name(&self) -> &str;
}

/// Sampling parameters sent with every completion request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 500,
        }
    }
}

/// Build the system instruction asking for a literal translation
pub fn translation_instruction(source_code: &str, target_code: &str) -> String {
    format!(
        "You are a STRICT translator. Translate the following text from {} to {} LITERALLY and STRICTLY as it. Only output the translation, nothing else.",
        language_name(source_code),
        language_name(target_code)
    )
}
