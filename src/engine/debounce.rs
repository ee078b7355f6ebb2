//! Trailing-edge debounce bookkeeping
//!
//! Time is passed in by the caller so the host loop decides when to poll
//! and tests stay deterministic.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// One pending-timer slot per key; rescheduling a key restarts its timer
#[derive(Debug)]
pub struct Debouncer<K> {
    window: Duration,
    pending: HashMap<K, Instant>,
}

impl<K: Eq + Hash + Clone> Debouncer<K> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Start (or restart) the timer for `key`
    pub fn schedule(&mut self, key: K, now: Instant) {
        self.pending.insert(key, now + self.window);
    }

    /// Drop the pending timer for `key`; returns whether one was pending
    pub fn cancel(&mut self, key: &K) -> bool {
        self.pending.remove(key).is_some()
    }

    /// Drop every pending timer matching `predicate`
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&K) -> bool) {
        self.pending.retain(|key, _| !predicate(key));
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest deadline among pending timers
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Remove and return every key whose window has elapsed, oldest first
    pub fn take_due(&mut self, now: Instant) -> Vec<K> {
        let mut due: Vec<(Instant, K)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, deadline)| (*deadline, key.clone()))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);
        for (_, key) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(_, key)| key).collect()
    }

    /// Remove and return every pending key regardless of deadline
    pub fn take_all(&mut self) -> Vec<K> {
        let mut all: Vec<(Instant, K)> = self.pending.drain().map(|(k, d)| (d, k)).collect();
        all.sort_by_key(|(deadline, _)| *deadline);
        all.into_iter().map(|(_, key)| key).collect()
    }
}
