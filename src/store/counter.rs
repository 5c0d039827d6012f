//! Counter-gated signals
//!
//! Every request channel (navigation, child events, bullets) is a monotonically
//! increasing integer per key. A consumer keeps the last counter it handled
//! and acts only when the published counter is strictly greater.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Debug)]
pub struct CounterGate<K> {
    last_processed: HashMap<K, u64>,
}

impl<K: Eq + Hash + Clone> CounterGate<K> {
    pub fn new() -> Self {
        Self {
            last_processed: HashMap::new(),
        }
    }

    /// Admit `counter` for `key` if it is newer than anything handled so far
    ///
    /// Admission records the counter, so the same value is never admitted twice.
    pub fn admit(&mut self, key: &K, counter: u64) -> bool {
        let last = self.last_processed.get(key).copied().unwrap_or(0);
        if counter > last {
            self.last_processed.insert(key.clone(), counter);
            true
        } else {
            false
        }
    }

    /// Would `counter` be admitted (no bookkeeping)
    pub fn is_pending(&self, key: &K, counter: u64) -> bool {
        counter > self.last(key)
    }

    pub fn last(&self, key: &K) -> u64 {
        self.last_processed.get(key).copied().unwrap_or(0)
    }
}

impl<K: Eq + Hash + Clone> Default for CounterGate<K> {
    fn default() -> Self {
        Self::new()
    }
}
