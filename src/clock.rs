//! Time source injection.
//!
//! The cache never reads the wall clock directly. Everything that needs
//! "now" takes a `&dyn Clock`, which makes expiration and ranking races
//! deterministic in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub trait Clock: Send + Sync {
    /// Current time in seconds, monotonic-ish for this process's purposes.
    fn now_secs(&self) -> u64;

    /// Render a tail-style time string: given the rest of a log line, returns
    /// the full line with a timestamp prepended. Lets callers avoid
    /// allocating an intermediate timestamp string when they have nothing
    /// to log.
    fn now_string(&self, tail: &str) -> String;
}

/// The real wall clock, backed by `SystemTime`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn now_string(&self, tail: &str) -> String {
        format!("{}: {}", self.now_secs(), tail)
    }
}

/// A manually-advanced clock for deterministic tests.
#[derive(Debug, Default)]
pub struct TestClock {
    secs: AtomicU64,
}

impl TestClock {
    pub fn new(start: u64) -> Self {
        Self {
            secs: AtomicU64::new(start),
        }
    }

    pub fn set(&self, secs: u64) {
        self.secs.store(secs, Ordering::SeqCst);
    }

    pub fn advance(&self, delta: u64) {
        self.secs.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn now_secs(&self) -> u64 {
        self.secs.load(Ordering::SeqCst)
    }

    fn now_string(&self, tail: &str) -> String {
        format!("{}: {}", self.now_secs(), tail)
    }
}
