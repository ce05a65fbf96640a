use crate::{Bytes32, Slot, ValidatorIndex};
use chain::ForkName;
use thiserror::Error;

/// Reasons a block is rejected by the state transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("target slot {target} must be after state slot {state}")]
    SlotNotInFuture { state: Slot, target: Slot },
    #[error("block slot {block} does not match state slot {state}")]
    BlockSlotMismatch { block: Slot, state: Slot },
    #[error("block at slot {block} is not newer than latest header at slot {header}")]
    BlockNotNewer { block: Slot, header: Slot },
    #[error("incorrect block proposer: expected {expected}, got {actual}")]
    IncorrectProposer {
        expected: ValidatorIndex,
        actual: ValidatorIndex,
    },
    #[error("block parent root mismatch: expected {expected}, got {actual}")]
    ParentRootMismatch { expected: Bytes32, actual: Bytes32 },
    #[error("{block} block cannot be applied to a {state} state")]
    ForkMismatch { state: ForkName, block: ForkName },
    #[error("invalid proposer signature for block at slot {slot}")]
    InvalidBlockSignature { slot: Slot },
    #[error("validator index {0} out of range")]
    ValidatorIndexOutOfRange(ValidatorIndex),
    #[error("state has no validators")]
    NoValidators,
    #[error("invalid block state root: block declares {declared}, computed {computed}")]
    StateRootMismatch { declared: Bytes32, computed: Bytes32 },
    #[error("list {0} is full")]
    ListFull(&'static str),
}
