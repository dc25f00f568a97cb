//! The indexed + time-priority cache store.
//!
//! Logical state is a mapping `Key -> (eol, Val)` plus a secondary index
//! supporting "extract the entry with minimum eol" in O(log n). The index
//! is a [`PriorityQueue`], with `eol` wrapped in `Reverse` so its max-first
//! `pop`/`peek` surface the smallest-eol entry.

use std::cmp::Reverse;
use std::collections::HashMap;

use priority_queue::PriorityQueue;

use crate::cache::assembly::extract_rrset;
use crate::cache::key::Key;
use crate::cache::ranking::Ranking;
use crate::cache::rrset::CRSet;
use crate::dns::{RecordClass, RecordType, WireRecord};

#[derive(Clone, Debug)]
struct Entry {
    crset: CRSet,
    rank: Ranking,
}

/// Result of a cache lookup.
#[derive(Debug)]
pub enum LookupResult {
    Miss,
    Hit(Vec<WireRecord>, Ranking),
}

impl LookupResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, LookupResult::Hit(..))
    }
}

#[derive(Clone, Debug)]
pub struct Store {
    entries: HashMap<Key, Entry>,
    /// Min-eol priority index over the same keys as `entries`. `push` on an
    /// already-present key updates its priority in place, so this and
    /// `entries` never drift out of sync as long as every mutation touches
    /// both.
    by_eol: PriorityQueue<Key, Reverse<u64>>,
    /// Maximum number of entries. `0` means unbounded — the facade is
    /// responsible for routing a caching-disabled configuration (also
    /// expressed as `0`) to [`crate::cache::facade::NullCache`] before a
    /// `Store` is ever built.
    max_size: usize,
}

impl Store {
    /// Fresh empty cache of the given maximum size.
    pub fn empty(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            by_eol: PriorityQueue::new(),
            max_size: capacity,
        }
    }

    /// Read-only lookup. Only live entries (`eol - now >= 1`) are returned;
    /// expired entries are treated as missing but not removed.
    pub fn lookup(
        &self,
        now: u64,
        name: &str,
        rtype: RecordType,
        rclass: RecordClass,
    ) -> LookupResult {
        let key = Key::new(name, rtype, rclass);
        let Some(entry) = self.entries.get(&key) else {
            return LookupResult::Miss;
        };
        let Some((_, Reverse(eol))) = self.by_eol.get(&key) else {
            return LookupResult::Miss;
        };

        match remaining_ttl(*eol, now) {
            Some(ttl) => {
                let records = extract_rrset(&key, ttl, &entry.crset);
                LookupResult::Hit(records, entry.rank)
            }
            None => LookupResult::Miss,
        }
    }

    /// Attempt to admit `(crset, rank)` under `key` with end-of-life
    /// `now + ttl`. Returns whether the store changed. Before inserting,
    /// every currently-expired entry is drained so the resulting cache is
    /// compact.
    pub fn insert(&mut self, now: u64, key: Key, ttl: u32, crset: CRSet, rank: Ranking) -> bool {
        self.expires(now);

        let is_new_key = !self.entries.contains_key(&key);
        if let Some(existing) = self.entries.get(&key) {
            if !rank.supersedes(existing.rank) {
                return false;
            }
        }

        if is_new_key && self.max_size > 0 && self.entries.len() >= self.max_size {
            self.evict_nearest_to_expire();
        }

        let eol = now.saturating_add(u64::from(ttl));
        self.entries.insert(key.clone(), Entry { crset, rank });
        self.by_eol.push(key, Reverse(eol));
        true
    }

    /// Remove every entry whose `eol <= now`. Returns whether anything
    /// changed.
    pub fn expires(&mut self, now: u64) -> bool {
        let mut changed = false;
        while self.expire1(now) {
            changed = true;
        }
        changed
    }

    /// Drop exactly one minimum-`eol` entry if it is expired. Exposed for
    /// tests.
    pub fn expire1(&mut self, now: u64) -> bool {
        let Some((_, Reverse(eol))) = self.by_eol.peek() else {
            return false;
        };
        if *eol > now {
            return false;
        }
        if let Some((key, _)) = self.by_eol.pop() {
            self.entries.remove(&key);
        }
        true
    }

    fn evict_nearest_to_expire(&mut self) {
        if let Some((key, _)) = self.by_eol.pop() {
            self.entries.remove(&key);
        }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// All live entries as `(Key, CRSet, Ranking, eol)` for diagnostics.
    /// Does not filter expired entries — callers wanting only-live data
    /// should call `expires` first or filter by `eol` against their own
    /// `now`.
    pub fn dump(&self) -> Vec<(Key, CRSet, Ranking, u64)> {
        self.entries
            .iter()
            .map(|(k, e)| {
                let eol = self.by_eol.get(k).map_or(0, |(_, Reverse(eol))| *eol);
                (k.clone(), e.crset.clone(), e.rank, eol)
            })
            .collect()
    }

    /// The Key with the smallest `eol`, if any.
    pub fn min_key(&self) -> Option<&Key> {
        self.by_eol.peek().map(|(key, _)| key)
    }
}

/// `eol - now`, expired (`None`) on a non-positive or overflowing result.
fn remaining_ttl(eol: u64, now: u64) -> Option<u32> {
    let wide = i64::try_from(eol).ok()? - i64::try_from(now).ok()?;
    if wide < 1 {
        return None;
    }
    u32::try_from(wide).ok()
}
