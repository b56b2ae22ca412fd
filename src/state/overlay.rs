use super::{State, Write};
use crate::types::hash::Hash;
use std::collections::BTreeMap;

/// Write buffer layered over a read-only base.
///
/// Reads see buffered writes first and fall through to the base otherwise.
/// Nothing reaches the base until the caller takes [`into_writes`](Self::into_writes)
/// and applies them; dropping the overlay discards every staged change. Overlays
/// stack, so a nested call can stage on top of its caller's overlay.
pub struct OverlayState<'a, S: State + ?Sized> {
    base: &'a S,
    writes: BTreeMap<Hash, Option<Vec<u8>>>,
}

impl<'a, S: State + ?Sized> OverlayState<'a, S> {
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
        }
    }

    /// Number of keys with a staged write or delete.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Consumes the overlay, returning staged writes in key order.
    pub fn into_writes(self) -> Vec<Write> {
        self.writes.into_iter().collect()
    }
}

impl<S: State + ?Sized> State for OverlayState<'_, S> {
    fn get(&self, key: Hash) -> Option<Vec<u8>> {
        match self.writes.get(&key) {
            Some(staged) => staged.clone(),
            None => self.base.get(key),
        }
    }

    fn push(&mut self, key: Hash, value: Vec<u8>) {
        self.writes.insert(key, Some(value));
    }

    fn delete(&mut self, key: Hash) {
        self.writes.insert(key, None);
    }
}
