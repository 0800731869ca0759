//! In-memory cache for wish listings.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use wishboard_common::config::CacheConfig;
use wishboard_db::repositories::WishFilter;

use crate::policy::PageRequest;
use crate::services::wish::WishPage;

/// Cache key: the store filter (status already narrowed by visibility) plus
/// the page.
pub type ListKey = (WishFilter, PageRequest);

#[derive(Debug, Clone)]
struct CacheEntry {
    page: WishPage,
    expires_at: Instant,
    last_used: Instant,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<ListKey, CacheEntry>,
    /// Bumped by every invalidation so a fill that raced one is dropped.
    generation: u64,
}

/// LRU + TTL cache of wish list pages.
///
/// Any wish mutation clears it wholesale; listings are cheap to rebuild and
/// a single mutation can move a wish across many cached pages.
#[derive(Clone)]
pub struct WishListCache {
    inner: Arc<RwLock<Inner>>,
    enabled: bool,
    capacity: usize,
    ttl: Duration,
}

impl WishListCache {
    /// Create a cache from configuration.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            enabled: config.enabled && config.capacity > 0,
            capacity: config.capacity,
            ttl: Duration::from_secs(config.ttl_secs),
        }
    }

    /// A cache that never stores anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            enabled: false,
            capacity: 0,
            ttl: Duration::ZERO,
        }
    }

    /// Current generation. Pass it back to [`Self::insert`].
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Look up a page, refreshing its recency.
    pub async fn get(&self, key: &ListKey) -> Option<WishPage> {
        if !self.enabled {
            return None;
        }

        let mut inner = self.inner.write().await;
        let now = Instant::now();

        match inner.entries.get_mut(key) {
            Some(entry) if entry.expires_at > now => {
                entry.last_used = now;
                Some(entry.page.clone())
            }
            Some(_) => {
                inner.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a page computed while the cache was at `generation`.
    pub async fn insert(&self, key: ListKey, page: WishPage, generation: u64) {
        if !self.enabled {
            return;
        }

        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            return;
        }

        let now = Instant::now();

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            inner.entries.retain(|_, v| v.expires_at > now);

            if inner.entries.len() >= self.capacity {
                let oldest = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, v)| v.last_used)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    inner.entries.remove(&oldest);
                }
            }
        }

        inner.entries.insert(
            key,
            CacheEntry {
                page,
                expires_at: now + self.ttl,
                last_used: now,
            },
        );
    }

    /// Drop every cached page.
    pub async fn invalidate_all(&self) {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.generation = inner.generation.wrapping_add(1);
    }

    /// Number of cached pages.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    /// Whether the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
