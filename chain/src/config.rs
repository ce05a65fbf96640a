use crate::ForkName;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SLOTS_PER_EPOCH: u64 = 32;

pub const GENESIS_FORK_VERSION: u32 = 0x0000_0000;
pub const ALTAIR_FORK_VERSION: u32 = 0x0100_0000;
pub const ALTAIR_FORK_EPOCH: u64 = 74_240;
pub const ALTAIR_FORK_SLOT: u64 = ALTAIR_FORK_EPOCH * SLOTS_PER_EPOCH;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidChainConfig {
    #[error("SLOTS_PER_EPOCH must be greater than zero")]
    ZeroSlotsPerEpoch,
}

/// Network parameters the transition function and the fixture loader share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct ChainConfig {
    pub slots_per_epoch: u64,
    pub genesis_fork_version: u32,
    pub altair_fork_version: u32,
    pub altair_fork_epoch: u64,
}

pub const MAINNET_CONFIG: ChainConfig = ChainConfig {
    slots_per_epoch: SLOTS_PER_EPOCH,
    genesis_fork_version: GENESIS_FORK_VERSION,
    altair_fork_version: ALTAIR_FORK_VERSION,
    altair_fork_epoch: ALTAIR_FORK_EPOCH,
};

impl Default for ChainConfig {
    fn default() -> Self {
        MAINNET_CONFIG
    }
}

impl ChainConfig {
    /// First slot processed under the altair rules.
    ///
    /// An unscheduled fork (`u64::MAX` epoch) saturates to `u64::MAX`.
    pub const fn altair_fork_slot(&self) -> u64 {
        self.altair_fork_epoch.saturating_mul(self.slots_per_epoch)
    }

    /// Selects the fork (and therefore the SSZ schema and processing rules)
    /// that applies at `slot`.
    ///
    /// This is the only place the fork boundary is derived. States, blocks and
    /// the upgrade step inside slot processing all go through it.
    pub const fn fork_at_slot(&self, slot: u64) -> ForkName {
        if slot < self.altair_fork_slot() {
            ForkName::Phase0
        } else {
            ForkName::Altair
        }
    }

    /// Rejects parameters the slot arithmetic cannot work with.
    pub const fn validate(&self) -> Result<(), InvalidChainConfig> {
        if self.slots_per_epoch == 0 {
            return Err(InvalidChainConfig::ZeroSlotsPerEpoch);
        }
        Ok(())
    }

    /// Requires a validated config.
    pub const fn epoch_at_slot(&self, slot: u64) -> u64 {
        slot / self.slots_per_epoch
    }

    pub const fn fork_version(&self, fork: ForkName) -> u32 {
        match fork {
            ForkName::Phase0 => self.genesis_fork_version,
            ForkName::Altair => self.altair_fork_version,
        }
    }
}
