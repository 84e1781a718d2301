//! English → language → English round trips

use crate::mt::cache::{CacheStats, MemoCache, RoundTripKey};
use crate::mt::client::TranslationClient;
use crate::mt::error::MtResult;
use crate::mt::languages::ENGLISH;
use tracing::debug;

pub struct RoundTripTranslator {
    client: TranslationClient,
    cache: MemoCache<RoundTripKey, String>,
}

impl RoundTripTranslator {
    pub fn new(client: TranslationClient) -> Self {
        Self {
            client,
            cache: MemoCache::new(),
        }
    }

    /// Translate `text` into `language` and back into English
    ///
    /// The pair of legs is cached as one unit under `(text, language)`. If
    /// either leg fails the error propagates and nothing is stored under the
    /// round-trip key.
    pub async fn round_trip(&self, text: &str, language: &str) -> MtResult<String> {
        let key = RoundTripKey::new(text, language);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let outbound = self.client.translate(text, ENGLISH, language).await?;
        let back = self.client.translate(&outbound, language, ENGLISH).await?;
        debug!(language, "round trip complete");

        Ok(self.cache.insert_once(key, back))
    }

    pub fn client(&self) -> &TranslationClient {
        &self.client
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
