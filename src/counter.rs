use std::collections::{hash_map, HashMap};
use std::fmt;
use std::hash::Hash;
use std::ops::Index;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::item_count::ItemCount;

/// Tracks signed counts for distinct items.
///
/// Once a key has been added, subtracted, or loaded it stays known, even at
/// count zero or below; counts are never clamped and a key is never dropped
/// on its own. [`remove`](Counter::remove) is the only operation that
/// forgets a key.
///
/// The counter holds no locks; callers sharing one across threads must
/// serialize access themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter<T: Eq + Hash> {
    data: HashMap<T, i64>,
}

impl<T: Eq + Hash> Counter<T> {
    /// Returns a new, empty counter.
    pub fn new() -> Self {
        Counter {
            data: HashMap::new(),
        }
    }

    /// Returns a counter seeded from a map of counts.
    ///
    /// The counter takes the map over outright, so no map the caller still
    /// holds can alias its contents. Zero and negative counts are kept
    /// verbatim.
    pub fn from_map(m: HashMap<T, i64>) -> Self {
        Counter { data: m }
    }

    /// Adds one occurrence of `item` and returns the new count.
    pub fn add(&mut self, item: T) -> i64 {
        let count = self.data.entry(item).or_insert(0);
        *count += 1;
        *count
    }

    /// Subtracts one occurrence of `item` and returns the new count.
    ///
    /// Unknown items start at zero, so the first subtraction lands at -1.
    /// There is no floor; the key stays known whatever its count.
    pub fn sub(&mut self, item: T) -> i64 {
        let count = self.data.entry(item).or_insert(0);
        *count -= 1;
        *count
    }

    /// Forgets `item` entirely, returning whether it was known.
    pub fn remove(&mut self, item: &T) -> bool {
        let existed = self.data.remove(item).is_some();
        if existed {
            trace!("removed entry, {} remain", self.data.len());
        }
        existed
    }

    /// Adds every item from `items` once, in order.
    pub fn update<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.add(item);
        }
    }

    /// Adds every entry of `other` into this counter, key by key.
    pub fn merge(&mut self, other: &Self)
    where
        T: Clone,
    {
        for (item, &count) in &other.data {
            *self.data.entry(item.clone()).or_insert(0) += count;
        }
        debug!("merged {} entries", other.data.len());
    }

    /// Returns the count for `item`, or 0 if it was never seen.
    pub fn get(&self, item: &T) -> i64 {
        self.data.get(item).copied().unwrap_or(0)
    }

    /// Returns true if `item` is known, even when its count is 0.
    pub fn contains(&self, item: &T) -> bool {
        self.data.contains_key(item)
    }

    /// Number of distinct known items.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sum of all counts. Negative when subtractions dominate.
    pub fn total(&self) -> i64 {
        self.data.values().sum()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        debug!("cleared {} entries", self.data.len());
        self.data.clear();
    }

    /// Iterates over `(item, count)` pairs in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, T, i64> {
        self.data.iter()
    }
}

impl<T: Eq + Hash + Clone> Counter<T> {
    /// Returns the `n` entries with the highest counts, descending; `n` of
    /// 0 returns every entry, as does any `n` past the entry count.
    ///
    /// The relative order of entries with equal counts is unspecified.
    pub fn most_common(&self, n: usize) -> Vec<ItemCount<T>> {
        let mut result: Vec<ItemCount<T>> = self
            .data
            .iter()
            .map(|(item, &count)| ItemCount {
                item: item.clone(),
                count,
            })
            .collect();
        result.sort_unstable_by(|a, b| b.count.cmp(&a.count));
        if n > 0 && n < result.len() {
            result.truncate(n);
        }
        result
    }

    /// Expands the counter into a flat list, each item repeated `count`
    /// times, walked in descending-count order.
    ///
    /// Entries with a count of zero contribute nothing, and entries with a
    /// negative count are skipped outright rather than treated as an error.
    pub fn items(&self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.total().max(0) as usize);
        for ic in self.most_common(0) {
            for _ in 0..ic.count {
                result.push(ic.item.clone());
            }
        }
        result
    }

    /// Copies the contents out as a plain map, detached from the counter.
    pub fn to_map(&self) -> HashMap<T, i64> {
        self.data.clone()
    }
}

impl<T: Eq + Hash> Default for Counter<T> {
    fn default() -> Self {
        Counter::new()
    }
}

impl<T: Eq + Hash> fmt::Display for Counter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter{{Items: {}, Total: {}}}", self.len(), self.total())
    }
}

impl<T: Eq + Hash> FromIterator<T> for Counter<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut counter = Counter::new();
        counter.update(iter);
        counter
    }
}

impl<T: Eq + Hash> Extend<T> for Counter<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.update(iter);
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a Counter<T> {
    type Item = (&'a T, &'a i64);
    type IntoIter = hash_map::Iter<'a, T, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: Eq + Hash> Index<&T> for Counter<T> {
    type Output = i64;

    fn index(&self, item: &T) -> &i64 {
        self.data.get(item).unwrap_or(&0)
    }
}
