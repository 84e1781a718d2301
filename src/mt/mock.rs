//! Mock Machine Translator for testing
//!
//! This module provides a deterministic, API-free translator for testing
//! the degradation pipeline without requiring API keys or network access.
//! It counts every call it receives, so tests can assert that cached paths
//! never reach the provider.
//!
//! # Example
//!
//! ```ignore
//! use leveler::mt::{MachineTranslator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Tag);
//!     let result = mock.translate("hello", "en", "fr").await.unwrap();
//!     assert_eq!(result, "[fr]hello");
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Prefix the target code in brackets: "hello" → "[fr]hello"
    /// Each leg leaves a visible trace, so chains can be read back from the text
    Tag,

    /// Append target suffix: "hello" → "hello_fr"
    Suffix,

    /// Use predefined mappings for realistic translations
    /// (text, target_code) → translation, falling back to `Tag`
    Mappings(HashMap<(String, String), String>),

    /// Behave like `Tag` until the given 1-based call, which fails with the message
    /// Later calls succeed again
    FailOnCall { call: usize, message: String },

    /// Simulate API errors on every call
    Error(String),

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug)]
pub struct MockTranslator {
    mode: Mutex<MockMode>,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: AtomicUsize,
}

impl MockTranslator {
    /// Create a new MockTranslator with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self::with_delay(mode, 0)
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// ```ignore
    /// let mock = MockTranslator::with_delay(MockMode::Tag, 50);
    /// // Each translation will have ~50ms delay
    /// ```
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode: Mutex::new(mode),
            delay_ms,
            calls: AtomicUsize::new(0),
        }
    }

    /// Replace the mode, keeping the call count
    ///
    /// Stands in for swapping the provider behind a running pipeline.
    pub fn set_mode(&self, mode: MockMode) {
        *self
            .mode
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = mode;
    }

    /// Number of `translate` calls received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn tag(text: &str, target: &str) -> String {
        format!("[{}]{}", target, text)
    }

    /// Apply translation logic based on the mode
    fn apply_translation(&self, call: usize, text: &str, target: &str) -> MtResult<String> {
        let mode = self
            .mode
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match &*mode {
            MockMode::Tag => Ok(Self::tag(text, target)),
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| Self::tag(text, target)))
            }
            MockMode::FailOnCall {
                call: failing,
                message,
            } => {
                if call == *failing {
                    Err(MtError::TranslationError(message.clone()))
                } else {
                    Ok(Self::tag(text, target))
                }
            }
            MockMode::Error(msg) => Err(MtError::TranslationError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_code: &str,
        target_code: &str,
    ) -> MtResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply_delay().await;
        self.apply_translation(call, text, target_code)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
