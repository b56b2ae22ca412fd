use super::State;
use crate::types::hash::Hash;
use std::collections::BTreeMap;

/// In-memory [`State`] backed by an ordered map.
///
/// Ordered so that two instances holding the same data compare equal and iterate
/// identically, which the determinism checks rely on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryState {
    data: BTreeMap<Hash, Vec<u8>>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<(Hash, Vec<u8>)>) -> Self {
        Self {
            data: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Hash, &Vec<u8>)> {
        self.data.iter()
    }
}

impl State for MemoryState {
    fn get(&self, key: Hash) -> Option<Vec<u8>> {
        self.data.get(&key).cloned()
    }

    fn push(&mut self, key: Hash, value: Vec<u8>) {
        self.data.insert(key, value);
    }

    fn delete(&mut self, key: Hash) {
        self.data.remove(&key);
    }

    fn contains_key(&self, key: Hash) -> bool {
        self.data.contains_key(&key)
    }
}
