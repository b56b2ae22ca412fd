use super::abi::{TEXT_FIELD_LEN, WORD_LEN};
use super::gas::{
    GET_ALL_GAS, GET_ASSET_GAS, GET_ASSETS_BY_OWNER_GAS, REGISTER_ASSET_GAS, UPDATE_LOCATION_GAS,
    UPDATE_NAME_GAS,
};
use super::selector::Selector;
use crate::types::address::ADDRESS_LEN;

/// Number of operations the asset precompile exposes.
const OPERATION_COUNT: usize = 6;

/// An operation exposed by the asset precompile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operation {
    RegisterAsset = 0,
    GetAsset = 1,
    GetAll = 2,
    GetAssetByAddress = 3,
    UpdateLocation = 4,
    UpdateName = 5,
}

impl Operation {
    /// All operations in dispatch-table order.
    pub const ALL: [Operation; OPERATION_COUNT] = [
        Operation::RegisterAsset,
        Operation::GetAsset,
        Operation::GetAll,
        Operation::GetAssetByAddress,
        Operation::UpdateLocation,
        Operation::UpdateName,
    ];

    /// Canonical signature hashed into the selector.
    pub const fn signature(&self) -> &'static str {
        match self {
            Operation::RegisterAsset => "registerAsset()",
            Operation::GetAsset => "getAsset(bytes32)",
            Operation::GetAll => "getAll()",
            Operation::GetAssetByAddress => "getAssetByAddress(address)",
            Operation::UpdateLocation => "updateLocation(string,string)",
            Operation::UpdateName => "updateName(string,string)",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Operation::RegisterAsset => "registerAsset",
            Operation::GetAsset => "getAsset",
            Operation::GetAll => "getAll",
            Operation::GetAssetByAddress => "getAssetByAddress",
            Operation::UpdateLocation => "updateLocation",
            Operation::UpdateName => "updateName",
        }
    }

    pub const fn gas_cost(&self) -> u64 {
        match self {
            Operation::RegisterAsset => REGISTER_ASSET_GAS,
            Operation::GetAsset => GET_ASSET_GAS,
            Operation::GetAll => GET_ALL_GAS,
            Operation::GetAssetByAddress => GET_ASSETS_BY_OWNER_GAS,
            Operation::UpdateLocation => UPDATE_LOCATION_GAS,
            Operation::UpdateName => UPDATE_NAME_GAS,
        }
    }

    /// Exact payload length after the selector.
    pub const fn input_len(&self) -> usize {
        match self {
            Operation::RegisterAsset => ADDRESS_LEN + TEXT_FIELD_LEN,
            Operation::GetAsset => WORD_LEN,
            Operation::GetAll => 0,
            Operation::GetAssetByAddress => ADDRESS_LEN,
            Operation::UpdateLocation | Operation::UpdateName => WORD_LEN + TEXT_FIELD_LEN,
        }
    }

    /// Whether the operation writes state and therefore passes the access gate.
    pub const fn is_mutating(&self) -> bool {
        matches!(
            self,
            Operation::RegisterAsset | Operation::UpdateLocation | Operation::UpdateName
        )
    }

    pub fn selector(&self) -> Selector {
        Selector::from_signature(self.signature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn selectors_are_distinct() {
        let selectors: HashSet<Selector> = Operation::ALL.iter().map(|op| op.selector()).collect();
        assert_eq!(selectors.len(), OPERATION_COUNT);
    }

    #[test]
    fn all_is_in_discriminant_order() {
        for (i, op) in Operation::ALL.iter().enumerate() {
            assert_eq!(*op as usize, i);
        }
    }

    #[test]
    fn payload_lengths() {
        assert_eq!(Operation::RegisterAsset.input_len(), 52);
        assert_eq!(Operation::GetAsset.input_len(), 32);
        assert_eq!(Operation::GetAll.input_len(), 0);
        assert_eq!(Operation::GetAssetByAddress.input_len(), 20);
        assert_eq!(Operation::UpdateLocation.input_len(), 64);
        assert_eq!(Operation::UpdateName.input_len(), 64);
    }

    #[test]
    fn only_writes_are_mutating() {
        let mutating: Vec<Operation> = Operation::ALL
            .into_iter()
            .filter(|op| op.is_mutating())
            .collect();
        assert_eq!(
            mutating,
            vec![
                Operation::RegisterAsset,
                Operation::UpdateLocation,
                Operation::UpdateName
            ]
        );
    }
}
