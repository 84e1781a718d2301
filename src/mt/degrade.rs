//! Degradation engine
//!
//! Runs a reference text through `hops` sequential round trips following the
//! deterministic language chain for `(seed, example_id)`. A provider failure
//! ends the run early: the text reached so far is returned with an inline
//! marker naming the failed hop, paired with the full intended chain. That
//! annotated result is cached exactly like a successful one.

use std::sync::Arc;

use crate::mt::cache::{CacheStats, DegradationKey, MemoCache};
use crate::mt::chain::select_chain;
use crate::mt::client::TranslationClient;
use crate::mt::roundtrip::RoundTripTranslator;
use crate::mt::translator::MachineTranslator;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of one degradation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degradation {
    /// Final English text, possibly ending in a failure marker
    pub text: String,
    /// Language codes of the intended chain, in hop order
    pub chain: Vec<String>,
}

/// Cache counters for every layer of the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub translations: CacheStats,
    pub round_trips: CacheStats,
    pub degradations: CacheStats,
}

pub struct DegradationEngine {
    round_trips: RoundTripTranslator,
    cache: MemoCache<DegradationKey, Degradation>,
}

impl DegradationEngine {
    /// Build the full cached pipeline on top of a provider
    pub fn new(translator: Arc<dyn MachineTranslator>) -> Self {
        Self::with_round_trips(RoundTripTranslator::new(TranslationClient::new(translator)))
    }

    pub fn with_round_trips(round_trips: RoundTripTranslator) -> Self {
        Self {
            round_trips,
            cache: MemoCache::new(),
        }
    }

    /// Degrade `reference` through `hops` round trips
    ///
    /// Negative hop counts are treated as zero. Zero hops returns the
    /// reference unchanged with an empty chain and never selects a chain or
    /// calls the provider.
    pub async fn degrade(
        &self,
        reference: &str,
        hops: i64,
        seed: &str,
        example_id: i64,
    ) -> Degradation {
        let hops = hops.max(0);
        let key = DegradationKey::new(reference, hops, seed, example_id);
        if let Some(cached) = self.cache.get(&key) {
            debug!(hops, seed, example_id, "degradation cache hit");
            return cached;
        }

        if hops == 0 {
            let unchanged = Degradation {
                text: reference.to_string(),
                chain: Vec::new(),
            };
            return self.cache.insert_once(key, unchanged);
        }

        let chain: Vec<String> = select_chain(seed, example_id, hops)
            .into_iter()
            .map(str::to_string)
            .collect();
        info!(example_id, seed, chain = ?chain, "degrading");

        let mut text = reference.to_string();
        for (position, code) in chain.iter().enumerate() {
            match self.round_trips.round_trip(&text, code).await {
                Ok(next) => text = next,
                Err(err) => {
                    warn!(
                        example_id,
                        hop = position + 1,
                        language = %code,
                        error = %err,
                        "round trip failed, keeping partial result"
                    );
                    text = failure_marker(&text, position + 1, &err);
                    break;
                }
            }
        }

        self.cache.insert_once(key, Degradation { text, chain })
    }

    pub fn provider_name(&self) -> &str {
        self.round_trips.client().provider_name()
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            translations: self.round_trips.client().cache_stats(),
            round_trips: self.round_trips.cache_stats(),
            degradations: self.cache.stats(),
        }
    }
}

/// Append the inline failure annotation for a 1-based hop number
pub fn failure_marker(partial: &str, hop: usize, error: &dyn std::fmt::Display) -> String {
    format!("{} [Translation error at hop {}: {}]", partial, hop, error)
}
