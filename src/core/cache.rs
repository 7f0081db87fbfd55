//! Translation cache keyed by language pair and text

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::core::models::CacheKey;

/// Keyed store of previous translations, shared across concurrent requests
#[async_trait]
pub trait TranslationCache: Send + Sync {
    /// Cached translation for `key`
    async fn get(&self, key: &CacheKey) -> Option<String>;

    /// Store a translation, replacing any previous value
    async fn put(&self, key: CacheKey, translation: String);
}

/// Cached translation with its creation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub translation: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Cache usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// In-memory cache; entries live until [`MemoryCache::clear`]
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<CacheKey, CacheEntry>>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl MemoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `key`, including its timestamp
    pub async fn entry(&self, key: &CacheKey) -> Option<CacheEntry> {
        let entries = self.entries.read().await;
        entries.get(key).cloned()
    }

    /// Number of cached translations
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Get current usage statistics
    pub async fn get_stats(&self) -> CacheStats {
        let entries = self.entries.read().await.len();
        CacheStats {
            entries,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drop every entry and reset counters
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        info!("Translation cache cleared ({} entries)", dropped);
    }
}

#[async_trait]
impl TranslationCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Option<String> {
        let found = {
            let entries = self.entries.read().await;
            entries.get(key).map(|e| e.translation.clone())
        };

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit for {}-{}", key.source_lang, key.target_lang);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("Cache miss for {}-{}", key.source_lang, key.target_lang);
        }

        found
    }

    async fn put(&self, key: CacheKey, translation: String) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                translation,
                created_at: chrono::Utc::now(),
            },
        );
        debug!("Cached translation, {} entries", entries.len());
    }
}
