//! Deterministic binary encoding for values persisted in [`State`](crate::state::State).
//!
//! # Format
//!
//! - `u64`: little-endian, fixed width
//! - `usize`: encoded as `u64`
//! - `String`: `u64` length prefix, then UTF-8 bytes
//! - `[u8; N]`: raw bytes, no prefix
//!
//! Structs and enums get their impls from `#[derive(BinaryCodec)]`.

use precompile_derive::Error;

/// Sink for encoded bytes (buffers, hashers, size counters).
pub trait EncodeSink {
    fn write(&mut self, bytes: &[u8]);
}

/// Counts encoded bytes without storing them.
#[derive(Default)]
pub struct SizeCounter {
    len: usize,
}

impl SizeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl EncodeSink for SizeCounter {
    fn write(&mut self, bytes: &[u8]) {
        self.len += bytes.len();
    }
}

impl EncodeSink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// A value with a canonical byte representation.
pub trait Encode {
    fn encode<S: EncodeSink>(&self, out: &mut S);

    /// Encodes into a vector sized exactly for the output.
    fn to_vec(&self) -> Vec<u8> {
        let mut counter = SizeCounter::new();
        self.encode(&mut counter);

        let mut out = Vec::with_capacity(counter.len());
        self.encode(&mut out);
        out
    }
}

/// Reasons a byte string cannot be decoded.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid value")]
    InvalidValue,
    #[error("length prefix exceeds limit")]
    LengthOverflow,
}

/// A value that can be rebuilt from its canonical bytes.
pub trait Decode: Sized {
    /// Decodes one value, advancing `input` past the consumed bytes.
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError>;

    /// Decodes a value that must span all of `data`.
    fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let mut input = data;
        let value = Self::decode(&mut input)?;
        if !input.is_empty() {
            return Err(DecodeError::InvalidValue);
        }
        Ok(value)
    }
}

/// Upper bound on decoded string lengths.
const MAX_LEN: usize = 1 << 20;

fn take<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8], DecodeError> {
    if input.len() < n {
        return Err(DecodeError::UnexpectedEof);
    }
    let (head, rest) = input.split_at(n);
    *input = rest;
    Ok(head)
}

impl Encode for u64 {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&self.to_le_bytes());
    }
}

impl Decode for u64 {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(take(input, 8)?);
        Ok(u64::from_le_bytes(buf))
    }
}

impl Encode for usize {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        (*self as u64).encode(out);
    }
}

impl Decode for usize {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        usize::try_from(u64::decode(input)?).map_err(|_| DecodeError::LengthOverflow)
    }
}

impl Encode for str {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        self.len().encode(out);
        out.write(self.as_bytes());
    }
}

impl Encode for String {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        self.as_str().encode(out);
    }
}

impl Decode for String {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let len = usize::decode(input)?;
        if len > MAX_LEN {
            return Err(DecodeError::LengthOverflow);
        }
        String::from_utf8(take(input, len)?.to_vec()).map_err(|_| DecodeError::InvalidValue)
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(self);
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(take(input, N)?);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u64_is_little_endian() {
        assert_eq!(0x0102_0304u64.to_vec(), vec![4, 3, 2, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn counters_decode_back() {
        assert_eq!(u64::from_bytes(&7u64.to_vec()).unwrap(), 7);
        assert_eq!(u64::from_bytes(&u64::MAX.to_vec()).unwrap(), u64::MAX);
    }

    #[test]
    fn to_vec_allocates_exact_capacity() {
        let bytes = "location".to_string().to_vec();
        assert_eq!(bytes.len(), 8 + 8);
        assert_eq!(bytes.capacity(), bytes.len());
    }

    #[test]
    fn string_carries_length_prefix() {
        let bytes = "-".to_string().to_vec();
        assert_eq!(&bytes[..8], &1u64.to_le_bytes());
        assert_eq!(bytes[8], b'-');
        assert_eq!(String::from_bytes(&bytes).unwrap(), "-");
    }

    #[test]
    fn str_and_string_encode_identically() {
        assert_eq!("widget".to_vec(), "widget".to_string().to_vec());
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        let mut bytes = Vec::new();
        2u64.encode(&mut bytes);
        bytes.extend_from_slice(&[0xFF, 0xFE]);
        assert_eq!(String::from_bytes(&bytes), Err(DecodeError::InvalidValue));
    }

    #[test]
    fn arrays_have_no_prefix() {
        let bytes = [9u8; 4].to_vec();
        assert_eq!(bytes, vec![9, 9, 9, 9]);
        assert_eq!(<[u8; 4]>::from_bytes(&bytes).unwrap(), [9u8; 4]);
    }

    #[test]
    fn oversized_length_prefix_is_rejected() {
        let bytes = ((MAX_LEN as u64) + 1).to_vec();
        assert_eq!(String::from_bytes(&bytes), Err(DecodeError::LengthOverflow));
    }

    #[test]
    fn truncated_input_reports_eof() {
        assert_eq!(u64::from_bytes(&[1, 2, 3]), Err(DecodeError::UnexpectedEof));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        assert_eq!(u64::from_bytes(&[0u8; 9]), Err(DecodeError::InvalidValue));
    }

    #[test]
    fn decode_advances_cursor() {
        let mut input: &[u8] = &[1, 0, 0, 0, 0, 0, 0, 0, 0xAA, 0xBB];
        assert_eq!(u64::decode(&mut input).unwrap(), 1);
        assert_eq!(input, &[0xAA, 0xBB]);
    }
}
