use super::gas::OutOfGas;
use super::selector::Selector;
use crate::access::AccessError;
use crate::registry::RegistryError;
use crate::types::address::Address;
use crate::types::hash::Hash;
use precompile_derive::Error;

/// Every way a precompile call can fail.
///
/// Any error aborts the call: staged writes are dropped and gas already deducted
/// stays spent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrecompileError {
    #[error("out of gas: required {required}, supplied {supplied}")]
    OutOfGas { required: u64, supplied: u64 },
    #[error("invalid input length for {operation}: expected {expected}, got {actual}")]
    InvalidInputLength {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A text field is not valid UTF-8.
    #[error("invalid text in field {field}")]
    InvalidText { field: &'static str },
    #[error("asset not found: {0}")]
    NotFound(Hash),
    #[error("permission denied: {0} is not an admin")]
    PermissionDenied(Address),
    #[error("write protection: state modification in a read-only call")]
    WriteProtection,
    #[error("function selector {0} not found")]
    SelectorNotFound(Selector),
    /// Input too short to carry a selector; holds the input length.
    #[error("missing function selector: input is {0} bytes")]
    MissingSelector(usize),
    #[error("asset id {0} is already registered")]
    IdCollision(Hash),
    /// Stored data under the key could not be interpreted.
    #[error("corrupt state under key {0}")]
    CorruptState(Hash),
}

impl From<OutOfGas> for PrecompileError {
    fn from(err: OutOfGas) -> Self {
        PrecompileError::OutOfGas {
            required: err.required,
            supplied: err.supplied,
        }
    }
}

impl From<AccessError> for PrecompileError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::WriteProtection => PrecompileError::WriteProtection,
            AccessError::PermissionDenied(caller) => PrecompileError::PermissionDenied(caller),
        }
    }
}

impl From<RegistryError> for PrecompileError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => PrecompileError::NotFound(id),
            RegistryError::IdCollision(id) => PrecompileError::IdCollision(id),
            RegistryError::Corrupt { key, .. } => PrecompileError::CorruptState(key),
            RegistryError::DanglingIndex(slot) => PrecompileError::CorruptState(slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            PrecompileError::InvalidInputLength {
                operation: "getAsset",
                expected: 32,
                actual: 31
            }
            .to_string(),
            "invalid input length for getAsset: expected 32, got 31"
        );
        assert_eq!(
            PrecompileError::SelectorNotFound(Selector([0, 0, 0, 1])).to_string(),
            "function selector 0x00000001 not found"
        );
    }

    #[test]
    fn access_errors_convert() {
        let caller = Address([7u8; 20]);
        assert_eq!(
            PrecompileError::from(AccessError::PermissionDenied(caller)),
            PrecompileError::PermissionDenied(caller)
        );
        assert_eq!(
            PrecompileError::from(AccessError::WriteProtection),
            PrecompileError::WriteProtection
        );
    }

    #[test]
    fn registry_errors_convert() {
        let id = Hash([1u8; 32]);
        assert_eq!(
            PrecompileError::from(RegistryError::NotFound(id)),
            PrecompileError::NotFound(id)
        );
        assert_eq!(
            PrecompileError::from(RegistryError::DanglingIndex(id)),
            PrecompileError::CorruptState(id)
        );
    }
}
