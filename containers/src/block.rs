use crate::{altair, phase0, Bytes32, Signature, Slot, ValidatorIndex};
use chain::ForkName;
use serde::{Deserialize, Serialize};
use ssz::{SszHash, SszWrite, WriteError};
use ssz_derive::Ssz;

#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: Bytes32,
    pub state_root: Bytes32,
    pub body_root: Bytes32,
}

/// Compute the SSZ hash tree root for any type implementing `SszHash`.
pub fn hash_tree_root<T: SszHash>(value: &T) -> Bytes32 {
    let h = value.hash_tree_root();
    Bytes32(h)
}

/// A signed block of whichever fork it was decoded as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignedBeaconBlock {
    Phase0(phase0::SignedBeaconBlock),
    Altair(altair::SignedBeaconBlock),
}

impl From<phase0::SignedBeaconBlock> for SignedBeaconBlock {
    fn from(block: phase0::SignedBeaconBlock) -> Self {
        Self::Phase0(block)
    }
}

impl From<altair::SignedBeaconBlock> for SignedBeaconBlock {
    fn from(block: altair::SignedBeaconBlock) -> Self {
        Self::Altair(block)
    }
}

impl SignedBeaconBlock {
    pub fn fork_name(&self) -> ForkName {
        match self {
            Self::Phase0(_) => ForkName::Phase0,
            Self::Altair(_) => ForkName::Altair,
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            Self::Phase0(block) => block.message.slot,
            Self::Altair(block) => block.message.slot,
        }
    }

    pub fn proposer_index(&self) -> ValidatorIndex {
        match self {
            Self::Phase0(block) => block.message.proposer_index,
            Self::Altair(block) => block.message.proposer_index,
        }
    }

    pub fn parent_root(&self) -> Bytes32 {
        match self {
            Self::Phase0(block) => block.message.parent_root,
            Self::Altair(block) => block.message.parent_root,
        }
    }

    /// Post-state commitment the proposer claims for this block.
    pub fn state_root(&self) -> Bytes32 {
        match self {
            Self::Phase0(block) => block.message.state_root,
            Self::Altair(block) => block.message.state_root,
        }
    }

    pub fn signature(&self) -> Signature {
        match self {
            Self::Phase0(block) => block.signature,
            Self::Altair(block) => block.signature,
        }
    }

    /// Root of the unsigned block message.
    pub fn message_root(&self) -> Bytes32 {
        match self {
            Self::Phase0(block) => hash_tree_root(&block.message),
            Self::Altair(block) => hash_tree_root(&block.message),
        }
    }

    pub fn body_root(&self) -> Bytes32 {
        match self {
            Self::Phase0(block) => hash_tree_root(&block.message.body),
            Self::Altair(block) => hash_tree_root(&block.message.body),
        }
    }

    pub fn to_ssz(&self) -> Result<Vec<u8>, WriteError> {
        match self {
            Self::Phase0(block) => block.to_ssz(),
            Self::Altair(block) => block.to_ssz(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_variant() {
        let mut phase0_block = phase0::SignedBeaconBlock::default();
        phase0_block.message.slot = Slot(7);
        phase0_block.message.state_root = Bytes32::from_slice([1; 32]);
        let block = SignedBeaconBlock::from(phase0_block);
        assert_eq!(block.fork_name(), ForkName::Phase0);
        assert_eq!(block.slot(), Slot(7));
        assert_eq!(block.state_root(), Bytes32::from_slice([1; 32]));

        let mut altair_block = altair::SignedBeaconBlock::default();
        altair_block.message.slot = Slot(9);
        let block = SignedBeaconBlock::from(altair_block);
        assert_eq!(block.fork_name(), ForkName::Altair);
        assert_eq!(block.slot(), Slot(9));
    }

    #[test]
    fn body_changes_message_root() {
        let plain = altair::SignedBeaconBlock::default();
        let mut with_sync = plain.clone();
        with_sync.message.body.sync_aggregate.sync_committee_bits = 1;
        assert_ne!(
            SignedBeaconBlock::from(plain).message_root(),
            SignedBeaconBlock::from(with_sync).message_root()
        );
    }
}
