use crate::types::hash::keccak256;
use std::fmt;

/// Length of a function selector in bytes.
pub const SELECTOR_LEN: usize = 4;

/// Leading four bytes of `keccak256(signature)`, identifying the called function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selector(pub [u8; SELECTOR_LEN]);

impl Selector {
    /// Computes the selector of a canonical signature such as `getAsset(bytes32)`.
    pub fn from_signature(signature: &str) -> Selector {
        let digest = keccak256(signature.as_bytes());
        let mut out = [0u8; SELECTOR_LEN];
        out.copy_from_slice(&digest.as_slice()[..SELECTOR_LEN]);
        Selector(out)
    }

    /// Splits calldata into its selector and the remaining payload.
    ///
    /// Returns `None` if `input` is shorter than a selector.
    pub fn split(input: &[u8]) -> Option<(Selector, &[u8])> {
        if input.len() < SELECTOR_LEN {
            return None;
        }
        let (head, rest) = input.split_at(SELECTOR_LEN);
        let mut out = [0u8; SELECTOR_LEN];
        out.copy_from_slice(head);
        Some((Selector(out), rest))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
