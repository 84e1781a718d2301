//! Cache-first translation client
//!
//! Wraps any [`MachineTranslator`] with the translation cache. A cached
//! `(text, source, target)` never reaches the provider again.

use std::sync::Arc;

use crate::mt::cache::{CacheStats, MemoCache, TranslationKey};
use crate::mt::error::MtResult;
use crate::mt::translator::MachineTranslator;
use tracing::{debug, trace};

pub struct TranslationClient {
    translator: Arc<dyn MachineTranslator>,
    cache: MemoCache<TranslationKey, String>,
}

impl TranslationClient {
    pub fn new(translator: Arc<dyn MachineTranslator>) -> Self {
        Self {
            translator,
            cache: MemoCache::new(),
        }
    }

    /// Translate one leg, consulting the cache before the provider
    ///
    /// Only successful translations are cached; provider errors propagate
    /// untouched and the next call for the same key tries again.
    pub async fn translate(&self, text: &str, source: &str, target: &str) -> MtResult<String> {
        let key = TranslationKey::new(text, source, target);
        if let Some(cached) = self.cache.get(&key) {
            trace!(source, target, "translation cache hit");
            return Ok(cached);
        }

        debug!(
            provider = self.translator.provider_name(),
            source, target, "translating"
        );
        let translated = self.translator.translate(text, source, target).await?;
        Ok(self.cache.insert_once(key, translated))
    }

    pub fn provider_name(&self) -> &str {
        self.translator.provider_name()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
