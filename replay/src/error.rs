use crate::source::FixtureKey;
use chain::ForkName;
use containers::{Bytes32, Slot, TransitionError};
use std::io;
use thiserror::Error;

/// Everything that can end a scenario early.
///
/// Empty slots are not represented here; they are ordinary control flow.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("fixture {0} not found")]
    FixtureNotFound(FixtureKey),
    #[error("failed to read fixture {key}")]
    FixtureRead {
        key: FixtureKey,
        #[source]
        source: io::Error,
    },
    #[error("block at slot {slot} carries unknown version tag {tag:?}")]
    UnknownScheme { slot: Slot, tag: String },
    #[error("block at slot {slot} is tagged {tagged} but the slot belongs to {expected}")]
    SchemeMismatch {
        slot: Slot,
        tagged: ForkName,
        expected: ForkName,
    },
    #[error("cannot decode {fork} state at slot {slot}: {reason}")]
    StateDecode {
        slot: Slot,
        fork: ForkName,
        reason: String,
    },
    #[error("cannot decode {fork} block at slot {slot}")]
    BlockDecode {
        slot: Slot,
        fork: ForkName,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed block envelope at slot {slot}: {reason}")]
    MalformedEnvelope { slot: Slot, reason: String },
    #[error("state transition failed at slot {slot}")]
    Transition {
        slot: Slot,
        #[source]
        source: TransitionError,
    },
    #[error("state root {state_root} does not match block state root {block_state_root} at slot {slot}")]
    CommitmentMismatch {
        slot: Slot,
        state_root: Bytes32,
        block_state_root: Bytes32,
    },
}
