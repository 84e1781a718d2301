//! Machine Translation Module
//!
//! This module implements the round-trip degradation pipeline: a reference
//! English text is translated into a language and back, repeatedly, following
//! a deterministic chain of languages picked from a fixed pool.
//!
//! # Overview
//!
//! The MT module consists of several components working together:
//!
//! 1. **Hashing & Chain Selection** - Maps `(seed, example id, position)` onto the language pool
//! 2. **MT Trait & Providers** - Generic trait for MT systems with an OpenRouter implementation
//! 3. **Translation Client** - Cache-first single translations
//! 4. **Round-Trip Translator** - English → language → English, cached as a unit
//! 5. **Degradation Engine** - Orchestrates the hops and turns provider failures into annotated results
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use leveler::mt::{DegradationEngine, OpenRouterProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenRouterProvider::from_env()?;
//!     let engine = DegradationEngine::new(Arc::new(provider));
//!
//!     let result = engine.degrade("Where is the library?", 3, "poc-seed", 1).await;
//!     println!("{} via {:?}", result.text, result.chain);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod chain;
pub mod client;
pub mod degrade;
pub mod error;
pub mod hashing;
pub mod languages;
pub mod mock;
pub mod openrouter;
pub mod roundtrip;
pub mod translator;

// Integration tests (only available during testing)
#[cfg(test)]
mod integration_tests;

pub use cache::{CacheStats, DegradationKey, MemoCache, RoundTripKey, TranslationKey};
pub use chain::select_chain;
pub use client::TranslationClient;
pub use degrade::{Degradation, DegradationEngine, PipelineStats, failure_marker};
pub use error::{MtError, MtResult};
pub use hashing::hash_to_unit;
pub use languages::{ENGLISH, LANGUAGE_POOL, Language, find_language, language_name};
pub use mock::{MockMode, MockTranslator};
pub use openrouter::OpenRouterProvider;
pub use roundtrip::RoundTripTranslator;
pub use translator::{MachineTranslator, SamplingConfig, translation_instruction};
