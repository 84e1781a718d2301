//! Built-in and custom example sentences.

use std::sync::{Mutex, MutexGuard};

use crate::mt::error::{MtError, MtResult};
use serde::Serialize;

/// First id handed out to a custom example
pub const FIRST_CUSTOM_ID: i64 = 1000;

/// Language label shown for custom examples
pub const CUSTOM_LABEL: &str = "Custom";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub id: i64,
    pub language: String,
    /// Original-language text; empty when there is none
    pub source: String,
    /// High-quality English reference that gets degraded
    pub reference: String,
    pub is_custom: bool,
}

struct BuiltinExample {
    id: i64,
    language: &'static str,
    source: &'static str,
    reference: &'static str,
}

const BUILTIN_EXAMPLES: [BuiltinExample; 4] = [
    BuiltinExample {
        id: 1,
        language: "Spanish",
        source: "¿Dónde está la biblioteca?",
        reference: "Where is the library?",
    },
    BuiltinExample {
        id: 2,
        language: "French",
        source: "Je vous remercie pour votre aide précieuse.",
        reference: "I thank you for your valuable help.",
    },
    BuiltinExample {
        id: 3,
        language: "German",
        source: "Können Sie mir bitte den Weg zum Bahnhof zeigen?",
        reference: "Could you please show me the way to the train station?",
    },
    BuiltinExample {
        id: 4,
        language: "Technical",
        source: "",
        reference: "The temporal sequence of reasoning in Large Language Models is the defining variable of their cognitive architecture. The evidence conclusively demonstrates that Reasoning-Before-Answer is the only reliable mechanism for generating accurate solutions to complex problems, as it respects the causal, autoregressive nature of the Transformer. It allows the model to \"think\" by using token generation as a form of working memory.",
    },
];

/// The fixed built-in examples, ids 1 to 4
pub fn builtin_examples() -> Vec<Example> {
    BUILTIN_EXAMPLES
        .iter()
        .map(|ex| Example {
            id: ex.id,
            language: ex.language.to_string(),
            source: ex.source.to_string(),
            reference: ex.reference.to_string(),
            is_custom: false,
        })
        .collect()
}

struct CustomExamples {
    next_id: i64,
    entries: Vec<Example>,
}

/// Built-in examples plus user-added ones
///
/// Custom examples can only be added. They live as long as the store.
pub struct ExampleStore {
    builtin: Vec<Example>,
    custom: Mutex<CustomExamples>,
}

impl Default for ExampleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExampleStore {
    pub fn new() -> Self {
        Self {
            builtin: builtin_examples(),
            custom: Mutex::new(CustomExamples {
                next_id: FIRST_CUSTOM_ID,
                entries: Vec::new(),
            }),
        }
    }

    fn custom(&self) -> MutexGuard<'_, CustomExamples> {
        self.custom
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a custom example with `text` as its reference
    ///
    /// The text is trimmed first; blank text is rejected and consumes no id.
    pub fn add(&self, text: &str) -> MtResult<Example> {
        let reference = text.trim();
        if reference.is_empty() {
            return Err(MtError::InvalidInput("Text is required".to_string()));
        }

        let mut custom = self.custom();
        let example = Example {
            id: custom.next_id,
            language: CUSTOM_LABEL.to_string(),
            source: String::new(),
            reference: reference.to_string(),
            is_custom: true,
        };
        custom.next_id += 1;
        custom.entries.push(example.clone());
        Ok(example)
    }

    /// Look up any example by id
    pub fn get(&self, id: i64) -> Option<Example> {
        self.builtin
            .iter()
            .find(|ex| ex.id == id)
            .cloned()
            .or_else(|| self.custom().entries.iter().find(|ex| ex.id == id).cloned())
    }

    /// Built-in examples first, then custom examples in creation order
    pub fn all(&self) -> Vec<Example> {
        let mut all = self.builtin.clone();
        all.extend(self.custom().entries.iter().cloned());
        all
    }

    pub fn custom_count(&self) -> usize {
        self.custom().entries.len()
    }
}
