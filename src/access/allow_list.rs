use crate::state::{State, storage_key};
use crate::types::address::Address;
use crate::types::hash::Hash;
use crate::{debug, info};
use std::fmt;

const ROLE_TABLE: &str = "role";

/// Permission level of an account at one precompile address.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    None = 0,
    Enabled = 1,
    Admin = 2,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    /// Parses the stored byte; anything unrecognised reads as [`Role::None`].
    fn from_byte(raw: u8) -> Role {
        match raw {
            1 => Role::Enabled,
            2 => Role::Admin,
            _ => Role::None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::None => "none",
            Role::Enabled => "enabled",
            Role::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// Per-account roles stored under a precompile address.
///
/// Accounts with no entry hold [`Role::None`]. Setting `None` removes the entry
/// instead of storing a zero byte.
pub struct AllowList<'s, S: State + ?Sized> {
    state: &'s mut S,
    namespace: Address,
}

impl<'s, S: State + ?Sized> AllowList<'s, S> {
    pub fn new(state: &'s mut S, namespace: Address) -> Self {
        Self { state, namespace }
    }

    pub fn get_role(&self, account: Address) -> Role {
        let role = read_role(&*self.state, self.namespace, account);
        debug!("role of {} at {} is {}", account, self.namespace, role);
        role
    }

    pub fn set_role(&mut self, account: Address, role: Role) {
        let key = role_key(self.namespace, account);
        match role {
            Role::None => self.state.delete(key),
            _ => self.state.push(key, vec![role as u8]),
        }
        info!("set role of {} at {} to {}", account, self.namespace, role);
    }
}

/// Reads a role without taking a mutable borrow of the state.
pub(crate) fn read_role<S: State + ?Sized>(state: &S, namespace: Address, account: Address) -> Role {
    match state.get(role_key(namespace, account)) {
        Some(bytes) if bytes.len() == 1 => Role::from_byte(bytes[0]),
        _ => Role::None,
    }
}

fn role_key(namespace: Address, account: Address) -> Hash {
    storage_key(&namespace, ROLE_TABLE, &[account.as_slice()])
}
