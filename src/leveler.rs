//! Leveler service: degrade every example for one `(hops, seed)` pair
//!
//! This is the surface a front end talks to. It owns the degradation engine
//! and the example store, normalizes user-supplied hop counts and produces
//! serializable reports.

use std::sync::Arc;

use crate::examples::{Example, ExampleStore};
use crate::mt::degrade::{DegradationEngine, PipelineStats};
use crate::mt::translator::MachineTranslator;
use serde::Serialize;
use tracing::info;

pub const DEFAULT_HOPS: i64 = 2;
/// Upper bound for requested hops, matching the language pool size
pub const MAX_HOPS: i64 = 25;
pub const DEFAULT_SEED: &str = "poc-seed";

/// Turn a raw hop count from a query string or CLI into a usable value
///
/// Missing or unparseable input gives [`DEFAULT_HOPS`]; anything else is
/// clamped to `0..=MAX_HOPS`.
pub fn normalize_hops(raw: Option<&str>) -> i64 {
    match raw {
        Some(value) => value
            .trim()
            .parse::<i64>()
            .map(|hops| hops.clamp(0, MAX_HOPS))
            .unwrap_or(DEFAULT_HOPS),
        None => DEFAULT_HOPS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradedExample {
    pub id: i64,
    pub language: String,
    pub source: String,
    pub reference: String,
    pub degraded: String,
    pub chain: Vec<String>,
    pub is_custom: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradeReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub examples: Vec<DegradedExample>,
    pub hops: i64,
    pub seed: String,
}

impl DegradeReport {
    /// Report returned when no provider credentials are configured
    ///
    /// Carries an explanatory message instead of examples, so nothing is
    /// attempted against the provider.
    pub fn missing_credentials(hops: i64, seed: &str) -> Self {
        Self {
            error: Some(format!(
                "{} environment variable not set. Please set it before running the app.",
                crate::config::API_KEY_VAR
            )),
            examples: Vec::new(),
            hops,
            seed: seed.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddExampleResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct Leveler {
    engine: DegradationEngine,
    examples: ExampleStore,
}

impl Leveler {
    pub fn new(translator: Arc<dyn MachineTranslator>) -> Self {
        Self::with_parts(DegradationEngine::new(translator), ExampleStore::new())
    }

    pub fn with_parts(engine: DegradationEngine, examples: ExampleStore) -> Self {
        Self { engine, examples }
    }

    pub fn engine(&self) -> &DegradationEngine {
        &self.engine
    }

    pub fn examples(&self) -> &ExampleStore {
        &self.examples
    }

    pub fn stats(&self) -> PipelineStats {
        self.engine.stats()
    }

    /// Degrade a single example
    pub async fn degrade_example(
        &self,
        example: &Example,
        hops: i64,
        seed: &str,
    ) -> DegradedExample {
        let result = self
            .engine
            .degrade(&example.reference, hops, seed, example.id)
            .await;

        DegradedExample {
            id: example.id,
            language: example.language.clone(),
            source: example.source.clone(),
            reference: example.reference.clone(),
            degraded: result.text,
            chain: result.chain,
            is_custom: example.is_custom,
        }
    }

    /// Degrade every built-in and custom example, one after another
    pub async fn degrade_all(&self, hops: i64, seed: &str) -> DegradeReport {
        let examples = self.examples.all();
        info!(
            hops,
            seed,
            examples = examples.len(),
            provider = self.engine.provider_name(),
            "degrading all examples"
        );

        let mut degraded = Vec::with_capacity(examples.len());
        for example in &examples {
            degraded.push(self.degrade_example(example, hops, seed).await);
        }

        DegradeReport {
            error: None,
            examples: degraded,
            hops: hops.max(0),
            seed: seed.to_string(),
        }
    }

    /// Add a custom example and describe the outcome
    pub fn add_example(&self, text: &str) -> AddExampleResponse {
        match self.examples.add(text) {
            Ok(example) => {
                info!(id = example.id, "custom example added");
                AddExampleResponse {
                    success: true,
                    id: Some(example.id),
                    message: Some(format!("Custom example added with ID {}", example.id)),
                    error: None,
                }
            }
            Err(err) => AddExampleResponse {
                success: false,
                id: None,
                message: None,
                error: Some(err.to_string()),
            },
        }
    }
}
