//! 20-byte account addresses.

use hex::FromHexError;
use precompile_derive::{BinaryCodec, Error};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Address length in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Fixed-size 20-byte address identifying callers, owners and precompiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, BinaryCodec)]
pub struct Address(pub [u8; ADDRESS_LEN]);

/// Failure to parse an address from its hex form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("address must be {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("invalid hex character {0:?}")]
    InvalidHex(char),
}

impl Address {
    /// The all-zero address.
    pub const fn zero() -> Address {
        Address([0u8; ADDRESS_LEN])
    }

    /// Builds an address from exactly [`ADDRESS_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Address> {
        let array: [u8; ADDRESS_LEN] = bytes.try_into().ok()?;
        Some(Address(array))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    /// Parses `0x`-prefixed or bare hex, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != ADDRESS_LEN * 2 {
            return Err(AddressParseError::InvalidLength {
                expected: ADDRESS_LEN * 2,
                actual: digits.len(),
            });
        }

        let mut out = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut out).map_err(|err| match err {
            FromHexError::InvalidHexCharacter { c, .. } => AddressParseError::InvalidHex(c),
            _ => {
                AddressParseError::InvalidLength {
                    expected: ADDRESS_LEN * 2,
                    actual: digits.len(),
                }
            }
        })?;
        Ok(Address(out))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_lowercase_prefixed_hex() {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[0] = 0xA1;
        bytes[19] = 0x0f;
        assert_eq!(
            Address(bytes).to_string(),
            "0xa10000000000000000000000000000000000000f"
        );
    }

    #[test]
    fn parse_accepts_prefixed_and_bare_hex() {
        let prefixed: Address = "0x0300000000000000000000000000000000000001".parse().unwrap();
        let bare: Address = "0300000000000000000000000000000000000001".parse().unwrap();
        assert_eq!(prefixed, bare);
        assert_eq!(prefixed.0[0], 0x03);
        assert_eq!(prefixed.0[19], 0x01);
    }

    #[test]
    fn parse_is_case_insensitive() {
        let upper: Address = "0xABCDEF0000000000000000000000000000000000".parse().unwrap();
        let lower: Address = "0xabcdef0000000000000000000000000000000000".parse().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(
            "0x1234".parse::<Address>(),
            Err(AddressParseError::InvalidLength {
                expected: 40,
                actual: 4
            })
        );
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert_eq!(
            "0xzz00000000000000000000000000000000000000".parse::<Address>(),
            Err(AddressParseError::InvalidHex('z'))
        );
    }

    #[test]
    fn parse_rejects_non_ascii_digits() {
        // 38 hex digits plus one two-byte character: right byte length, bad digit
        let text = format!("{}é", "0".repeat(38));
        assert_eq!(text.len(), 40);
        assert!(matches!(
            text.parse::<Address>(),
            Err(AddressParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn serde_uses_hex_strings() {
        let address: Address = "0x00000000000000000000000000000000000000b2".parse().unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"0x00000000000000000000000000000000000000b2\"");
        assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), address);
    }
}
