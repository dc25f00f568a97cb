use std::env;
use std::time::Duration;

/// Configuration for the cache subsystem.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache may hold. `0` disables caching
    /// entirely — the facade constructor routes a `0` straight to
    /// `NullCache` rather than an unbounded `Store`.
    pub max_cache_size: usize,

    /// Capacity of the bounded update-command queue.
    pub update_queue_capacity: usize,

    /// How often the ticker enqueues an expiration sweep.
    pub expire_tick_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_cache_size: 10_000,
            update_queue_capacity: 8,
            expire_tick_interval: Duration::from_secs(1),
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_cache_size: env::var("HEIMDALL_CACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_cache_size),
            update_queue_capacity: env::var("HEIMDALL_CACHE_QUEUE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.update_queue_capacity),
            expire_tick_interval: env::var("HEIMDALL_CACHE_TICK_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.expire_tick_interval),
        }
    }

    /// Whether this configuration disables caching outright.
    pub fn is_disabled(&self) -> bool {
        self.max_cache_size == 0
    }
}
