//! Shared, immutable byte buffer used for call outputs.

use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted byte buffer.
///
/// Cloning shares the allocation; mutation goes through copy-on-write.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bytes(Arc<Vec<u8>>);

impl Bytes {
    /// An empty buffer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `cap` bytes.
    pub fn with_capacity(cap: usize) -> Self {
        Self(Arc::new(Vec::with_capacity(cap)))
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Appends bytes, cloning the backing vector if it is shared.
    pub fn extend_from_slice(&mut self, s: &[u8]) {
        Arc::make_mut(&mut self.0).extend_from_slice(s);
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Self(Arc::new(v))
    }
}

impl From<&[u8]> for Bytes {
    fn from(s: &[u8]) -> Self {
        Self(Arc::new(s.to_vec()))
    }
}

impl Deref for Bytes {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_until_written() {
        let mut a = Bytes::from(vec![1, 2, 3]);
        let b = a.clone();
        a.extend_from_slice(&[4]);
        assert_eq!(a.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(b.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn empty_has_no_bytes() {
        assert!(Bytes::empty().is_empty());
        assert_eq!(Bytes::empty(), Bytes::from(Vec::new()));
    }
}
