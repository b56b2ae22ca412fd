//! Activation settings for the asset precompiles.
//!
//! Each precompile variant is switched on by an [`AssetConfig`] carrying the block
//! timestamp it activates at and the accounts seeded as admins. Configs are read
//! from JSON:
//!
//! ```json
//! {
//!   "contractDeployerAssetConfig": {
//!     "blockTimestamp": 0,
//!     "adminAddresses": ["0x8db97c7cece249c2b98bdc0226cc4c2a57bf52fc"]
//!   },
//!   "txAssetConfig": { "blockTimestamp": 1700000000, "adminAddresses": [] }
//! }
//! ```

use super::contract::AssetPrecompile;
use super::{CONTRACT_DEPLOYER_ASSET_ADDRESS, TX_ASSET_ADDRESS};
use crate::access::{AllowList, Role};
use crate::state::{State, storage_key};
use crate::types::address::Address;
use crate::{info, warn};
use precompile_derive::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const CONFIGURED_TABLE: &str = "configured";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(serde_json::Error),
    #[error("{config}: admin {address} listed more than once")]
    DuplicateAdmin {
        config: &'static str,
        address: Address,
    },
    #[error("{config}: the zero address cannot be an admin")]
    ZeroAdmin { config: &'static str },
}

/// Shared settings of an asset precompile variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetConfig {
    /// Activation time; `None` keeps the precompile disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_timestamp: Option<u64>,
    /// Accounts granted the admin role on activation.
    #[serde(default)]
    pub admin_addresses: Vec<Address>,
}

impl AssetConfig {
    pub fn new(block_timestamp: Option<u64>, admin_addresses: Vec<Address>) -> Self {
        Self {
            block_timestamp,
            admin_addresses,
        }
    }

    /// Seeds the admins under `address`, once.
    ///
    /// Returns `false` if the precompile at `address` was already configured.
    fn configure(&self, state: &mut dyn State, address: Address) -> bool {
        let marker = storage_key(&address, CONFIGURED_TABLE, &[]);
        if state.contains_key(marker) {
            warn!("precompile {} already configured, skipping", address);
            return false;
        }

        let mut allow_list = AllowList::new(&mut *state, address);
        for admin in &self.admin_addresses {
            allow_list.set_role(*admin, Role::Admin);
        }
        state.push(marker, vec![1]);
        info!(
            "configured precompile {} with {} admins",
            address,
            self.admin_addresses.len()
        );
        true
    }

    fn verify(&self, config: &'static str) -> Result<(), ConfigError> {
        let mut seen = HashSet::with_capacity(self.admin_addresses.len());
        for admin in &self.admin_addresses {
            if *admin == Address::zero() {
                return Err(ConfigError::ZeroAdmin { config });
            }
            if !seen.insert(*admin) {
                return Err(ConfigError::DuplicateAdmin {
                    config,
                    address: *admin,
                });
            }
        }
        Ok(())
    }
}

/// Hooks the host uses to activate a stateful precompile.
pub trait StatefulPrecompileConfig {
    /// Address the precompile is installed at.
    fn address(&self) -> Address;

    /// Activation timestamp, if any.
    fn timestamp(&self) -> Option<u64>;

    /// Writes the initial state at activation. Idempotent.
    fn configure(&self, state: &mut dyn State) -> bool;

    fn contract(&self) -> AssetPrecompile;

    /// Whether the precompile is live at `timestamp`.
    fn is_active(&self, timestamp: u64) -> bool {
        self.timestamp().is_some_and(|start| start <= timestamp)
    }
}

macro_rules! asset_config_variant {
    ($(#[$doc:meta])* $name:ident, $address:expr, $label:literal) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub AssetConfig);

        impl $name {
            const LABEL: &'static str = $label;
        }

        impl StatefulPrecompileConfig for $name {
            fn address(&self) -> Address {
                $address
            }

            fn timestamp(&self) -> Option<u64> {
                self.0.block_timestamp
            }

            fn configure(&self, state: &mut dyn State) -> bool {
                self.0.configure(state, $address)
            }

            fn contract(&self) -> AssetPrecompile {
                AssetPrecompile::new($address)
            }
        }
    };
}

asset_config_variant!(
    /// Asset registry used by contract deployers.
    ContractDeployerAssetConfig,
    CONTRACT_DEPLOYER_ASSET_ADDRESS,
    "contractDeployerAssetConfig"
);

asset_config_variant!(
    /// Asset registry used by transaction senders.
    TxAssetConfig,
    TX_ASSET_ADDRESS,
    "txAssetConfig"
);

/// The precompile activations a chain is configured with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecompileUpgrades {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_deployer_asset_config: Option<ContractDeployerAssetConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_asset_config: Option<TxAssetConfig>,
}

impl PrecompileUpgrades {
    /// Parses and verifies a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let upgrades: Self = serde_json::from_str(json).map_err(ConfigError::Json)?;
        upgrades.verify()?;
        Ok(upgrades)
    }

    pub fn verify(&self) -> Result<(), ConfigError> {
        if let Some(config) = &self.contract_deployer_asset_config {
            config.0.verify(ContractDeployerAssetConfig::LABEL)?;
        }
        if let Some(config) = &self.tx_asset_config {
            config.0.verify(TxAssetConfig::LABEL)?;
        }
        Ok(())
    }

    /// Every configured precompile.
    pub fn configs(&self) -> Vec<&dyn StatefulPrecompileConfig> {
        let mut out: Vec<&dyn StatefulPrecompileConfig> = Vec::new();
        if let Some(config) = &self.contract_deployer_asset_config {
            out.push(config);
        }
        if let Some(config) = &self.tx_asset_config {
            out.push(config);
        }
        out
    }

    /// Whether any configured precompile is live at `timestamp`.
    pub fn is_active(&self, timestamp: u64) -> bool {
        self.configs().iter().any(|c| c.is_active(timestamp))
    }

    /// Configures every precompile whose activation falls in `(parent, current]`.
    ///
    /// `parent` is `None` for the first block, in which case everything active
    /// at `current` is configured. Returns the addresses configured now.
    pub fn configure_transitions(
        &self,
        parent: Option<u64>,
        current: u64,
        state: &mut dyn State,
    ) -> Vec<Address> {
        let mut configured = Vec::new();
        for config in self.configs() {
            let Some(start) = config.timestamp() else {
                continue;
            };
            let after_parent = parent.is_none_or(|p| start > p);
            if after_parent && start <= current && config.configure(state) {
                configured.push(config.address());
            }
        }
        configured
    }

    /// The live precompile installed at `address`, if any.
    pub fn active_precompile(&self, address: Address, timestamp: u64) -> Option<AssetPrecompile> {
        self.configs()
            .into_iter()
            .find(|c| c.address() == address && c.is_active(timestamp))
            .map(|c| c.contract())
    }
}
