use crate::registry::asset::Asset;
use crate::state::{State, storage_key};
use crate::types::address::Address;
use crate::types::encoding::{Decode, DecodeError, Encode};
use crate::types::hash::Hash;
use crate::{debug, info, warn};
use precompile_derive::Error;

const ASSET_TABLE: &str = "asset";
const COUNT_TABLE: &str = "count";
const ORDINAL_TABLE: &str = "ordinal";
const OWNER_COUNT_TABLE: &str = "owner_count";
const OWNER_ORDINAL_TABLE: &str = "owner_ordinal";

/// Domain prefix for asset id derivation.
const ID_DOMAIN: &[u8] = b"ASSET_ID";

/// Errors raised by [`AssetRegistry`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No asset is stored under the id.
    #[error("asset not found: {0}")]
    NotFound(Hash),
    /// A freshly derived id already has a record.
    #[error("asset id {0} is already registered")]
    IdCollision(Hash),
    /// A stored value failed to decode.
    #[error("corrupt registry entry under key {key}: {reason}")]
    Corrupt { key: Hash, reason: DecodeError },
    /// An index slot points at an id with no record.
    #[error("index slot {0} references a missing asset")]
    DanglingIndex(Hash),
}

/// Typed view of the asset tables stored under one precompile address.
///
/// Layout, every key derived with [`storage_key`] under `namespace`:
///
/// | table           | key parts              | value          |
/// |-----------------|------------------------|----------------|
/// | `asset`         | id                     | encoded asset  |
/// | `count`         |                        | `u64`          |
/// | `ordinal`       | position (`u64` BE)    | id             |
/// | `owner_count`   | owner                  | `u64`          |
/// | `owner_ordinal` | owner, position        | id             |
///
/// Ordinals are appended on registration and never rewritten, so listings come
/// back in registration order.
pub struct AssetRegistry<'s, S: State + ?Sized> {
    state: &'s mut S,
    namespace: Address,
}

impl<'s, S: State + ?Sized> AssetRegistry<'s, S> {
    pub fn new(state: &'s mut S, namespace: Address) -> Self {
        Self { state, namespace }
    }

    pub fn namespace(&self) -> Address {
        self.namespace
    }

    /// Total number of registered assets.
    pub fn len(&self) -> Result<u64, RegistryError> {
        self.read_u64(self.count_key())
    }

    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.len()? == 0)
    }

    /// Registers a new asset owned by `owner` and returns its id.
    ///
    /// The id is `keccak256(domain ‖ namespace ‖ caller ‖ owner ‖ count)`, where
    /// `count` is the number of assets registered before this one. Replaying the
    /// same sequence of registrations against the same starting state therefore
    /// yields the same ids.
    pub fn register_asset(
        &mut self,
        caller: Address,
        owner: Address,
        name: String,
    ) -> Result<Hash, RegistryError> {
        let count = self.len()?;
        let id = self.derive_id(caller, owner, count);
        let asset_key = self.asset_key(id);
        if self.state.contains_key(asset_key) {
            warn!("derived asset id {} already has a record", id);
            return Err(RegistryError::IdCollision(id));
        }

        let owner_count_key = self.owner_count_key(owner);
        let owner_count = self.read_u64(owner_count_key)?;
        let ordinal_key = self.ordinal_key(count);
        let count_key = self.count_key();
        let owner_ordinal_key = self.owner_ordinal_key(owner, owner_count);

        let asset = Asset::new(id, owner, name);
        self.state.push(asset_key, asset.to_vec());
        self.state.push(ordinal_key, id.to_vec());
        self.state.push(count_key, (count + 1).to_vec());
        self.state.push(owner_ordinal_key, id.to_vec());
        self.state.push(owner_count_key, (owner_count + 1).to_vec());

        info!(
            "registered asset {} name={:?} owner={} by {}",
            id, asset.name, owner, caller
        );
        Ok(id)
    }

    /// Returns the asset stored under `id`.
    pub fn get_asset(&self, id: Hash) -> Result<Asset, RegistryError> {
        debug!("get asset {}", id);
        match self.load(id)? {
            Some(asset) => Ok(asset),
            None => {
                warn!("asset {} not found", id);
                Err(RegistryError::NotFound(id))
            }
        }
    }

    /// Every asset owned by `owner`, in registration order. Empty if none.
    pub fn get_assets_by_owner(&self, owner: Address) -> Result<Vec<Asset>, RegistryError> {
        let count = self.read_u64(self.owner_count_key(owner))?;
        debug!("get assets of {}: {} entries", owner, count);
        (0..count)
            .map(|i| self.resolve(self.owner_ordinal_key(owner, i)))
            .collect()
    }

    /// Every registered asset, in registration order.
    pub fn get_all(&self) -> Result<Vec<Asset>, RegistryError> {
        let count = self.len()?;
        debug!("get all assets: {} entries", count);
        (0..count).map(|i| self.resolve(self.ordinal_key(i))).collect()
    }

    /// Replaces the location of the asset under `id`.
    pub fn update_location(&mut self, id: Hash, location: String) -> Result<(), RegistryError> {
        let mut asset = self.get_asset(id)?;
        info!(
            "asset {} location {:?} -> {:?}",
            id, asset.location, location
        );
        asset.location = location;
        self.store(&asset);
        Ok(())
    }

    /// Replaces the name of the asset under `id`.
    pub fn update_name(&mut self, id: Hash, name: String) -> Result<(), RegistryError> {
        let mut asset = self.get_asset(id)?;
        info!("asset {} name {:?} -> {:?}", id, asset.name, name);
        asset.name = name;
        self.store(&asset);
        Ok(())
    }

    fn derive_id(&self, caller: Address, owner: Address, count: u64) -> Hash {
        let mut h = Hash::keccak();
        h.update(ID_DOMAIN);
        h.update(self.namespace.as_slice());
        h.update(caller.as_slice());
        h.update(owner.as_slice());
        h.update(&count.to_be_bytes());
        h.finalize()
    }

    fn store(&mut self, asset: &Asset) {
        let key = self.asset_key(asset.id);
        self.state.push(key, asset.to_vec());
    }

    fn load(&self, id: Hash) -> Result<Option<Asset>, RegistryError> {
        self.decode_at(self.asset_key(id))
    }

    /// Follows an index slot to the asset it names.
    fn resolve(&self, slot: Hash) -> Result<Asset, RegistryError> {
        let id: Hash = self
            .decode_at(slot)?
            .ok_or(RegistryError::DanglingIndex(slot))?;
        self.load(id)?.ok_or(RegistryError::DanglingIndex(slot))
    }

    fn read_u64(&self, key: Hash) -> Result<u64, RegistryError> {
        Ok(self.decode_at(key)?.unwrap_or(0))
    }

    fn decode_at<T: Decode>(&self, key: Hash) -> Result<Option<T>, RegistryError> {
        match self.state.get(key) {
            None => Ok(None),
            Some(bytes) => T::from_bytes(&bytes)
                .map(Some)
                .map_err(|reason| RegistryError::Corrupt { key, reason }),
        }
    }

    fn asset_key(&self, id: Hash) -> Hash {
        storage_key(&self.namespace, ASSET_TABLE, &[id.as_slice()])
    }

    fn count_key(&self) -> Hash {
        storage_key(&self.namespace, COUNT_TABLE, &[])
    }

    fn ordinal_key(&self, position: u64) -> Hash {
        storage_key(&self.namespace, ORDINAL_TABLE, &[&position.to_be_bytes()])
    }

    fn owner_count_key(&self, owner: Address) -> Hash {
        storage_key(&self.namespace, OWNER_COUNT_TABLE, &[owner.as_slice()])
    }

    fn owner_ordinal_key(&self, owner: Address, position: u64) -> Hash {
        storage_key(
            &self.namespace,
            OWNER_ORDINAL_TABLE,
            &[owner.as_slice(), &position.to_be_bytes()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DEFAULT_LOCATION;
    use crate::state::MemoryState;
    use crate::utils::test_utils::utils::addr;

    const NS: Address = Address([0x03; 20]);

    fn registry(state: &mut MemoryState) -> AssetRegistry<'_, MemoryState> {
        AssetRegistry::new(state, NS)
    }

    #[test]
    fn registered_asset_is_readable_at_default_location() {
        let mut state = MemoryState::new();
        let mut reg = registry(&mut state);
        let id = reg.register_asset(addr(1), addr(2), "pallet".into()).unwrap();

        let asset = reg.get_asset(id).unwrap();
        assert_eq!(asset.id, id);
        assert_eq!(asset.owner, addr(2));
        assert_eq!(asset.name, "pallet");
        assert_eq!(asset.location, DEFAULT_LOCATION);
        assert_eq!(reg.len().unwrap(), 1);
    }

    #[test]
    fn ids_are_unique_across_registrations() {
        let mut state = MemoryState::new();
        let mut reg = registry(&mut state);
        let a = reg.register_asset(addr(1), addr(2), "same".into()).unwrap();
        let b = reg.register_asset(addr(1), addr(2), "same".into()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn replaying_registrations_yields_identical_ids_and_state() {
        let mut first = MemoryState::new();
        let mut second = MemoryState::new();
        let ids_first: Vec<Hash> = {
            let mut reg = registry(&mut first);
            (0..3)
                .map(|i| reg.register_asset(addr(1), addr(i), format!("a{i}")).unwrap())
                .collect()
        };
        let ids_second: Vec<Hash> = {
            let mut reg = registry(&mut second);
            (0..3)
                .map(|i| reg.register_asset(addr(1), addr(i), format!("a{i}")).unwrap())
                .collect()
        };
        assert_eq!(ids_first, ids_second);
        assert_eq!(first, second);
    }

    #[test]
    fn namespaces_are_isolated() {
        let mut state = MemoryState::new();
        let id = AssetRegistry::new(&mut state, NS)
            .register_asset(addr(1), addr(2), "x".into())
            .unwrap();

        let other = AssetRegistry::new(&mut state, addr(9));
        assert_eq!(other.get_asset(id), Err(RegistryError::NotFound(id)));
        assert!(other.is_empty().unwrap());
    }

    #[test]
    fn owner_listing_keeps_registration_order() {
        let mut state = MemoryState::new();
        let mut reg = registry(&mut state);
        let first = reg.register_asset(addr(1), addr(2), "first".into()).unwrap();
        reg.register_asset(addr(1), addr(3), "other".into()).unwrap();
        let second = reg.register_asset(addr(1), addr(2), "second".into()).unwrap();

        let owned: Vec<Hash> = reg
            .get_assets_by_owner(addr(2))
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(owned, vec![first, second]);
        assert!(reg.get_assets_by_owner(addr(7)).unwrap().is_empty());
    }

    #[test]
    fn get_all_lists_every_asset_in_order() {
        let mut state = MemoryState::new();
        let mut reg = registry(&mut state);
        assert!(reg.get_all().unwrap().is_empty());

        let ids: Vec<Hash> = (0..4)
            .map(|i| reg.register_asset(addr(1), addr(i % 2), format!("n{i}")).unwrap())
            .collect();
        let listed: Vec<Hash> = reg.get_all().unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn updates_touch_only_their_field() {
        let mut state = MemoryState::new();
        let mut reg = registry(&mut state);
        let id = reg.register_asset(addr(1), addr(2), "crate".into()).unwrap();

        reg.update_location(id, "dock 4".into()).unwrap();
        let asset = reg.get_asset(id).unwrap();
        assert_eq!(asset.location, "dock 4");
        assert_eq!(asset.name, "crate");

        reg.update_name(id, "crate #7".into()).unwrap();
        let asset = reg.get_asset(id).unwrap();
        assert_eq!(asset.name, "crate #7");
        assert_eq!(asset.location, "dock 4");
        assert_eq!(asset.owner, addr(2));
        assert_eq!(reg.len().unwrap(), 1);
    }

    #[test]
    fn updates_are_visible_through_listings() {
        let mut state = MemoryState::new();
        let mut reg = registry(&mut state);
        let id = reg.register_asset(addr(1), addr(2), "crate".into()).unwrap();
        reg.update_location(id, "yard".into()).unwrap();

        assert_eq!(reg.get_all().unwrap()[0].location, "yard");
        assert_eq!(reg.get_assets_by_owner(addr(2)).unwrap()[0].location, "yard");
    }

    #[test]
    fn updating_unknown_id_fails_without_writes() {
        let mut state = MemoryState::new();
        registry(&mut state)
            .register_asset(addr(1), addr(2), "crate".into())
            .unwrap();
        let before = state.clone();

        let missing = Hash([0xEE; 32]);
        let mut reg = registry(&mut state);
        assert_eq!(
            reg.update_location(missing, "x".into()),
            Err(RegistryError::NotFound(missing))
        );
        assert_eq!(
            reg.update_name(missing, "x".into()),
            Err(RegistryError::NotFound(missing))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn colliding_id_is_rejected() {
        let mut state = MemoryState::new();
        let (predicted, key) = {
            let reg = registry(&mut state);
            let id = reg.derive_id(addr(1), addr(2), 0);
            (id, reg.asset_key(id))
        };
        state.push(key, vec![0xAB]);
        let before = state.clone();

        let mut reg = registry(&mut state);
        assert_eq!(
            reg.register_asset(addr(1), addr(2), "x".into()),
            Err(RegistryError::IdCollision(predicted))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn corrupt_record_is_reported() {
        let mut state = MemoryState::new();
        let id = registry(&mut state)
            .register_asset(addr(1), addr(2), "crate".into())
            .unwrap();
        let key = registry(&mut state).asset_key(id);
        state.push(key, vec![1, 2, 3]);

        let reg = registry(&mut state);
        assert!(matches!(
            reg.get_asset(id),
            Err(RegistryError::Corrupt { key: k, .. }) if k == key
        ));
    }
}
