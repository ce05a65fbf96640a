//! Altair containers and the upgrade from phase0.

use crate::error::TransitionError;
use crate::types::gwei_list_from;
use crate::{
    phase0, Balances, BlockHeader, Bytes32, Fork, HistoricalBlockHashes, InactivityScores,
    Signature, Slot, ValidatorIndex, Validators, Version,
};
use chain::ChainConfig;
use serde::{Deserialize, Serialize};
use ssz_derive::Ssz;

/// Sync committee participation, one bit per committee seat.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncAggregate {
    pub sync_committee_bits: u64,
    pub sync_committee_signature: Signature,
}

#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeaconBlockBody {
    pub randao_reveal: Signature,
    pub graffiti: Bytes32,
    pub sync_aggregate: SyncAggregate,
}

#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeaconBlock {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: Bytes32,
    pub state_root: Bytes32,
    pub body: BeaconBlockBody,
}

#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
pub struct SignedBeaconBlock {
    pub message: BeaconBlock,
    pub signature: Signature,
}

#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeaconState {
    // --- versioning ---
    pub genesis_time: u64,
    pub genesis_validators_root: Bytes32,
    pub slot: Slot,
    pub fork: Fork,

    // --- history ---
    pub latest_block_header: BlockHeader,
    #[serde(with = "crate::serde_helpers")]
    pub historical_block_hashes: HistoricalBlockHashes,

    // --- registry ---
    #[serde(with = "crate::serde_helpers")]
    pub validators: Validators,
    #[serde(with = "crate::serde_helpers")]
    pub balances: Balances,
    #[serde(with = "crate::serde_helpers")]
    pub inactivity_scores: InactivityScores,
}

/// Converts a phase0 state into its altair form at the fork slot.
pub fn upgrade_to_altair(
    pre: &phase0::BeaconState,
    config: &ChainConfig,
) -> Result<BeaconState, TransitionError> {
    Ok(BeaconState {
        genesis_time: pre.genesis_time,
        genesis_validators_root: pre.genesis_validators_root,
        slot: pre.slot,
        fork: Fork {
            previous_version: pre.fork.current_version,
            current_version: Version(config.altair_fork_version),
            epoch: pre.slot.epoch(config),
        },
        latest_block_header: pre.latest_block_header.clone(),
        historical_block_hashes: pre.historical_block_hashes.clone(),
        validators: pre.validators.clone(),
        balances: pre.balances.clone(),
        inactivity_scores: gwei_list_from(vec![0; pre.validators.len_usize()])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::anchor_state;
    use crate::BeaconState as VersionedState;
    use chain::{config::ALTAIR_FORK_SLOT, MAINNET_CONFIG};
    use pretty_assertions::assert_eq;

    #[test]
    fn upgrade_rotates_versions_and_keeps_registry() {
        let mut pre = match anchor_state(MAINNET_CONFIG, Slot(ALTAIR_FORK_SLOT - 1), 4).state {
            VersionedState::Phase0(state) => state,
            VersionedState::Altair(_) => panic!("expected phase0 anchor"),
        };
        pre.slot = Slot(ALTAIR_FORK_SLOT);

        let post = upgrade_to_altair(&pre, &MAINNET_CONFIG).expect("upgrade");

        assert_eq!(post.slot, pre.slot);
        assert_eq!(post.fork.previous_version, pre.fork.current_version);
        assert_eq!(post.fork.current_version, Version(MAINNET_CONFIG.altair_fork_version));
        assert_eq!(post.fork.epoch, MAINNET_CONFIG.altair_fork_epoch);
        assert_eq!(post.latest_block_header, pre.latest_block_header);
        assert_eq!(post.validators, pre.validators);
        assert_eq!(post.balances, pre.balances);
        assert_eq!(
            (&post.inactivity_scores).into_iter().copied().collect::<Vec<_>>(),
            vec![0; 4]
        );
    }
}
