use crate::types::address::Address;
use crate::types::hash::Hash;
use precompile_derive::BinaryCodec;

/// Location every asset starts with until it is first updated.
pub const DEFAULT_LOCATION: &str = "-";

/// A registered asset.
///
/// `id` and `owner` are fixed at registration; `name` and `location` may be
/// updated by an admin.
#[derive(Clone, Debug, PartialEq, Eq, BinaryCodec)]
pub struct Asset {
    pub id: Hash,
    pub name: String,
    pub owner: Address,
    pub location: String,
}

impl Asset {
    /// A freshly registered asset at [`DEFAULT_LOCATION`].
    pub fn new(id: Hash, owner: Address, name: String) -> Self {
        Self {
            id,
            name,
            owner,
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::encoding::{Decode, Encode};

    #[test]
    fn new_asset_starts_at_default_location() {
        let asset = Asset::new(Hash([1u8; 32]), Address([2u8; 20]), "widget".into());
        assert_eq!(asset.location, "-");
        assert_eq!(asset.name, "widget");
    }

    #[test]
    fn stored_record_decodes_to_same_asset() {
        let asset = Asset::new(Hash([1u8; 32]), Address([2u8; 20]), "widget".into());
        let bytes = asset.to_vec();
        // id, name (prefix + 6), owner, location (prefix + 1)
        assert_eq!(bytes.len(), 32 + 8 + 6 + 20 + 8 + 1);
        assert_eq!(Asset::from_bytes(&bytes).unwrap(), asset);
    }
}
