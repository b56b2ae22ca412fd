use super::allow_list::read_role;
use crate::state::State;
use crate::types::address::Address;
use crate::warn;
use precompile_derive::Error;

/// Reasons a mutating call is refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("write protection: state modification in a read-only call")]
    WriteProtection,
    #[error("permission denied: {0} is not an admin")]
    PermissionDenied(Address),
}

/// Checks that `caller` may mutate state through the precompile at `precompile`.
///
/// A read-only call is refused first, whoever the caller is. Otherwise the caller
/// must hold [`Role::Admin`](super::Role::Admin) at that address.
pub fn ensure_can_mutate<S: State + ?Sized>(
    state: &S,
    precompile: Address,
    caller: Address,
    read_only: bool,
) -> Result<(), AccessError> {
    if read_only {
        warn!("refused mutation from {} in read-only call", caller);
        return Err(AccessError::WriteProtection);
    }
    if !read_role(state, precompile, caller).is_admin() {
        warn!("refused mutation from non-admin {}", caller);
        return Err(AccessError::PermissionDenied(caller));
    }
    Ok(())
}
