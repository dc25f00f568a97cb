//! Serialized update pipeline.
//!
//! All mutation of the live `Store` happens on one task draining a bounded
//! channel; lookups never wait on it. A second task ticks `Command::Expire`
//! into the same channel once per `expire_tick_interval`.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::cache::key::Key;
use crate::cache::ranking::Ranking;
use crate::cache::rrset::CRSet;
use crate::cache::store::Store;
use crate::clock::Clock;
use crate::config::CacheConfig;

/// A command queued onto the update pipeline.
#[derive(Debug)]
pub enum Command {
    Insert {
        key: Key,
        ttl: u32,
        crset: CRSet,
        rank: Ranking,
    },
    /// Enqueued by the ticker with the timestamp and rendered time string
    /// it read from the clock at tick time, not re-derived at apply time.
    Expire { now: u64, time_str: String },
}

/// Handles to the background tasks backing a running pipeline. Dropping
/// this without calling [`Pipeline::shutdown`] leaves the tasks running
/// detached; callers that care about clean shutdown should always call it.
pub struct Pipeline {
    sender: mpsc::Sender<Command>,
    shutdown_tx: broadcast::Sender<()>,
    worker: JoinHandle<()>,
    ticker: JoinHandle<()>,
}

impl Pipeline {
    /// Spawn the update-worker and ticker tasks against `store`.
    pub fn spawn(
        store: Arc<ArcSwap<Store>>,
        config: &CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(config.update_queue_capacity.max(1));
        let (shutdown_tx, _) = broadcast::channel(1);

        let worker = tokio::spawn(run_worker(
            store,
            receiver,
            Arc::clone(&clock),
            shutdown_tx.subscribe(),
        ));
        let ticker = tokio::spawn(run_ticker(
            sender.clone(),
            config.expire_tick_interval,
            clock,
            shutdown_tx.subscribe(),
        ));

        Self {
            sender,
            shutdown_tx,
            worker,
            ticker,
        }
    }

    pub fn sender(&self) -> mpsc::Sender<Command> {
        self.sender.clone()
    }

    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }

    pub fn max_capacity(&self) -> usize {
        self.sender.max_capacity()
    }

    /// Signal both background tasks to stop and wait for them to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.worker.await;
        let _ = self.ticker.await;
    }
}

async fn run_worker(
    store: Arc<ArcSwap<Store>>,
    mut receiver: mpsc::Receiver<Command>,
    clock: Arc<dyn Clock>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;
            _ = shutdown.recv() => {
                tracing::debug!("update worker draining queue before shutdown");
                receiver.close();
                while let Some(command) = receiver.recv().await {
                    apply(&store, &clock, command);
                }
                return;
            }
            command = receiver.recv() => {
                match command {
                    Some(command) => apply(&store, &clock, command),
                    None => return,
                }
            }
        }
    }
}

/// Apply one command to `store`, replacing it atomically. A panic inside
/// the pure apply logic is caught so a single malformed update can never
/// bring down the process.
fn apply(store: &Arc<ArcSwap<Store>>, clock: &Arc<dyn Clock>, command: Command) {
    let current = store.load_full();

    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        let mut next = (*current).clone();
        let changed = match command {
            Command::Insert {
                key,
                ttl,
                crset,
                rank,
            } => {
                let now = clock.now_secs();
                next.insert(now, key, ttl, crset, rank)
            }
            Command::Expire { now, time_str } => {
                let size_before = next.size();
                let changed = next.expires(now);
                if changed && next.size() != size_before {
                    tracing::info!(size = next.size(), "{}", time_str);
                }
                changed
            }
        };
        (next, changed)
    }));

    match result {
        Ok((next, changed)) => {
            if changed {
                store.store(Arc::new(next));
            }
        }
        Err(_) => {
            tracing::warn!("update application panicked; cache left unchanged");
        }
    }
}

async fn run_ticker(
    sender: mpsc::Sender<Command>,
    interval: std::time::Duration,
    clock: Arc<dyn Clock>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.recv() => {
                tracing::debug!("expiration ticker shutting down");
                return;
            }
            _ = ticker.tick() => {
                let now = clock.now_secs();
                let time_str = clock.now_string("cache size changed");
                if sender.send(Command::Expire { now, time_str }).await.is_err() {
                    return;
                }
            }
        }
    }
}
