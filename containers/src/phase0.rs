//! Phase0 containers.

use crate::{Balances, BlockHeader, Bytes32, Fork, HistoricalBlockHashes, Signature, Slot, ValidatorIndex, Validators};
use serde::{Deserialize, Serialize};
use ssz_derive::Ssz;

#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeaconBlockBody {
    pub randao_reveal: Signature,
    pub graffiti: Bytes32,
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
}
