//! Ordered variable sets.

use std::fmt::Debug;

/// A set of variables, stored as a sorted, deduplicated vector.
///
/// Live-in and live-out sets only ever grow during the analysis
/// (union-only updates), and the variable universe is finite, so a
/// sorted vector with in-place merge rebuilds keeps the fixpoint
/// iteration cheap without requiring a dense variable index. Equality
/// is structural.
#[derive(Clone, PartialEq, Eq)]
pub struct VarSet<V: Clone + Ord + Debug> {
    items: Vec<V>,
}

impl<V: Clone + Ord + Debug> Default for VarSet<V> {
    fn default() -> Self {
        VarSet { items: vec![] }
    }
}

impl<V: Clone + Ord + Debug> VarSet<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: V) {
        if let Err(pos) = self.items.binary_search(&value) {
            self.items.insert(pos, value);
        }
    }

    pub fn contains(&self, value: &V) -> bool {
        self.items.binary_search(value).is_ok()
    }

    /// Grows `self` to `self ∪ other`. Returns `true` if any element
    /// was added.
    pub fn union_with(&mut self, other: &VarSet<V>) -> bool {
        if other.items.is_empty() {
            return false;
        }
        if self.items.is_empty() {
            self.items = other.items.clone();
            return true;
        }
        let mut merged = Vec::with_capacity(self.items.len() + other.items.len());
        let mut changed = false;
        let (mut i, mut j) = (0, 0);
        while i < self.items.len() && j < other.items.len() {
            match self.items[i].cmp(&other.items[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(self.items[i].clone());
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(other.items[j].clone());
                    j += 1;
                    changed = true;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(self.items[i].clone());
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&self.items[i..]);
        if j < other.items.len() {
            merged.extend_from_slice(&other.items[j..]);
            changed = true;
        }
        if changed {
            self.items = merged;
        }
        changed
    }

    /// Shrinks `self` to `self \ other`.
    pub fn subtract(&mut self, other: &VarSet<V>) {
        if self.items.is_empty() || other.items.is_empty() {
            return;
        }
        self.items.retain(|v| other.items.binary_search(v).is_err());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the elements in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.items.iter()
    }
}

impl<V: Clone + Ord + Debug> FromIterator<V> for VarSet<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut items: Vec<V> = iter.into_iter().collect();
        items.sort();
        items.dedup();
        VarSet { items }
    }
}

impl<V: Clone + Ord + Debug> Debug for VarSet<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}
