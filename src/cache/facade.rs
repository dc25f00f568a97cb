//! The cache's external surface.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::cache::key::Key;
use crate::cache::pipeline::{Command, Pipeline};
use crate::cache::ranking::Ranking;
use crate::cache::rrset::CRSet;
use crate::cache::store::{LookupResult, Store};
use crate::clock::Clock;
use crate::config::CacheConfig;
use crate::dns::{RecordClass, RecordType, WireRecord};

/// The cache's public surface. Total: no method here returns a `Result` —
/// failures are logged internally and never propagated to callers.
#[async_trait::async_trait]
pub trait CacheFacade: Send + Sync {
    fn lookup(
        &self,
        name: &str,
        rtype: RecordType,
        rclass: RecordClass,
    ) -> Option<(Vec<WireRecord>, Ranking)>;

    /// Queue an insert. Backpressures the caller: if the update queue is
    /// full, this waits for room rather than dropping the command. Not an
    /// error — only a closed pipeline (post-shutdown) is silently ignored.
    async fn insert(&self, key: Key, ttl: u32, crset: CRSet, rank: Ranking);

    /// All live-or-not-yet-reaped entries, for diagnostics.
    fn snapshot(&self) -> Vec<(Key, CRSet, Ranking, u64)>;

    /// `(queued, capacity)` of the update pipeline's command queue.
    fn queue_sizes(&self) -> (usize, usize);
}

/// The real cache: an atomically-swappable [`Store`] read directly by
/// lookups, mutated only by [`Pipeline`]'s single update-worker task.
pub struct DnsCache {
    store: Arc<ArcSwap<Store>>,
    clock: Arc<dyn Clock>,
    pipeline: Pipeline,
}

impl DnsCache {
    pub fn new(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(ArcSwap::from_pointee(Store::empty(config.max_cache_size)));
        let pipeline = Pipeline::spawn(Arc::clone(&store), config, Arc::clone(&clock));
        Self {
            store,
            clock,
            pipeline,
        }
    }

    /// Signal the background tasks to stop and wait for them to exit.
    pub async fn shutdown(self) {
        self.pipeline.shutdown().await;
    }
}

#[async_trait::async_trait]
impl CacheFacade for DnsCache {
    fn lookup(
        &self,
        name: &str,
        rtype: RecordType,
        rclass: RecordClass,
    ) -> Option<(Vec<WireRecord>, Ranking)> {
        let now = self.clock.now_secs();
        match self.store.load().lookup(now, name, rtype, rclass) {
            LookupResult::Hit(records, rank) => Some((records, rank)),
            LookupResult::Miss => None,
        }
    }

    async fn insert(&self, key: Key, ttl: u32, crset: CRSet, rank: Ranking) {
        let command = Command::Insert {
            key,
            ttl,
            crset,
            rank,
        };
        if let Err(err) = self.pipeline.sender().send(command).await {
            tracing::warn!(%err, "update pipeline closed; dropping insert");
        }
    }

    fn snapshot(&self) -> Vec<(Key, CRSet, Ranking, u64)> {
        self.store.load().dump()
    }

    fn queue_sizes(&self) -> (usize, usize) {
        let max = self.pipeline.max_capacity();
        let available = self.pipeline.capacity();
        (max.saturating_sub(available), max)
    }
}

/// A no-op cache, selected when the configuration disables caching
/// outright (`max_cache_size == 0`).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

#[async_trait::async_trait]
impl CacheFacade for NullCache {
    fn lookup(
        &self,
        _name: &str,
        _rtype: RecordType,
        _rclass: RecordClass,
    ) -> Option<(Vec<WireRecord>, Ranking)> {
        None
    }

    async fn insert(&self, _key: Key, _ttl: u32, _crset: CRSet, _rank: Ranking) {}

    fn snapshot(&self) -> Vec<(Key, CRSet, Ranking, u64)> {
        Vec::new()
    }

    fn queue_sizes(&self) -> (usize, usize) {
        (0, 0)
    }
}

/// Build the configured facade: a real [`DnsCache`] or, if caching is
/// disabled, a [`NullCache`].
pub fn build(config: &CacheConfig, clock: Arc<dyn Clock>) -> Arc<dyn CacheFacade> {
    if config.is_disabled() {
        Arc::new(NullCache)
    } else {
        Arc::new(DnsCache::new(config, clock))
    }
}
