use crate::block::hash_tree_root;
use crate::error::TransitionError;
use crate::signature::{compute_signing_root, SignatureVerifier};
use crate::state::{BeaconState, CachedBeaconState};
use crate::types::historical_hashes_from;
use crate::{altair, BlockHeader, HistoricalBlockHashes, SignedBeaconBlock, Slot, ValidatorIndex};
use chain::ForkName;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Checks the transition performs besides the mandatory ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionOptions {
    pub verify_proposer: bool,
    pub verify_signatures: bool,
    pub verify_state_root: bool,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            verify_proposer: false,
            verify_signatures: false,
            verify_state_root: true,
        }
    }
}

/// Applies `signed_block` on top of `pre`, producing the post-state.
///
/// Slots between the state and the block are processed first, which is where
/// a phase0 state is upgraded once the fork slot is reached.
pub fn state_transition(
    pre: &CachedBeaconState,
    signed_block: &SignedBeaconBlock,
    verifier: &SignatureVerifier,
    options: TransitionOptions,
) -> Result<CachedBeaconState, TransitionError> {
    let state = process_slots(pre, signed_block.slot())?;

    if options.verify_signatures {
        verify_block_signature(&state, signed_block, verifier)?;
    }

    let state = process_block(&state, signed_block, options)?;

    if options.verify_state_root {
        let computed = state.hash_tree_root();
        let declared = signed_block.state_root();
        if computed != declared {
            return Err(TransitionError::StateRootMismatch { declared, computed });
        }
    }

    Ok(state)
}

pub fn process_slots(
    pre: &CachedBeaconState,
    target_slot: Slot,
) -> Result<CachedBeaconState, TransitionError> {
    if pre.slot() >= target_slot {
        return Err(TransitionError::SlotNotInFuture {
            state: pre.slot(),
            target: target_slot,
        });
    }

    let chain = pre.config.chain;
    let mut state = pre.state.clone();

    while state.slot() < target_slot {
        process_slot(&mut state);

        let next_slot = state.slot().next();
        state.set_slot(next_slot);

        if let BeaconState::Phase0(phase0_state) = &state {
            if chain.fork_at_slot(next_slot.0) == ForkName::Altair {
                info!(slot = %next_slot, "Upgrading state from phase0 to altair");
                state = BeaconState::Altair(altair::upgrade_to_altair(phase0_state, &chain)?);
            }
        }
    }

    Ok(pre.with_state(state))
}

/// Caches the pre-block state root into the latest header.
pub fn process_slot(state: &mut BeaconState) {
    if state.latest_block_header().state_root.is_zero() {
        let previous_state_root = state.hash_tree_root();
        state.latest_block_header_mut().state_root = previous_state_root;
    }
}

pub fn process_block(
    cached: &CachedBeaconState,
    signed_block: &SignedBeaconBlock,
    options: TransitionOptions,
) -> Result<CachedBeaconState, TransitionError> {
    let (header, hashes) = process_block_header(&cached.state, signed_block, options)?;

    let next = match &cached.state {
        BeaconState::Phase0(state) => {
            let mut next = state.clone();
            next.latest_block_header = header;
            next.historical_block_hashes = hashes;
            BeaconState::Phase0(next)
        }
        BeaconState::Altair(state) => {
            let mut next = state.clone();
            next.latest_block_header = header;
            next.historical_block_hashes = hashes;
            BeaconState::Altair(next)
        }
    };

    Ok(cached.with_state(next))
}

fn process_block_header(
    state: &BeaconState,
    signed_block: &SignedBeaconBlock,
    options: TransitionOptions,
) -> Result<(BlockHeader, HistoricalBlockHashes), TransitionError> {
    let block_slot = signed_block.slot();
    let latest_header = state.latest_block_header();

    if state.fork_name() != signed_block.fork_name() {
        return Err(TransitionError::ForkMismatch {
            state: state.fork_name(),
            block: signed_block.fork_name(),
        });
    }
    if block_slot != state.slot() {
        return Err(TransitionError::BlockSlotMismatch {
            block: block_slot,
            state: state.slot(),
        });
    }
    if block_slot <= latest_header.slot {
        return Err(TransitionError::BlockNotNewer {
            block: block_slot,
            header: latest_header.slot,
        });
    }
    if options.verify_proposer {
        let expected = state.proposer_index().ok_or(TransitionError::NoValidators)?;
        if signed_block.proposer_index().0 != expected {
            return Err(TransitionError::IncorrectProposer {
                expected: ValidatorIndex(expected),
                actual: signed_block.proposer_index(),
            });
        }
    }

    let parent_root = hash_tree_root(latest_header);
    if signed_block.parent_root() != parent_root {
        return Err(TransitionError::ParentRootMismatch {
            expected: parent_root,
            actual: signed_block.parent_root(),
        });
    }

    let hashes = match state {
        BeaconState::Phase0(state) => &state.historical_block_hashes,
        BeaconState::Altair(state) => &state.historical_block_hashes,
    };
    let hashes = historical_hashes_from(hashes.into_iter().copied().chain([parent_root]))?;

    let header = BlockHeader {
        slot: block_slot,
        proposer_index: signed_block.proposer_index(),
        parent_root,
        state_root: crate::Bytes32::zero(),
        body_root: signed_block.body_root(),
    };

    Ok((header, hashes))
}

fn verify_block_signature(
    cached: &CachedBeaconState,
    signed_block: &SignedBeaconBlock,
    verifier: &SignatureVerifier,
) -> Result<(), TransitionError> {
    let validators = cached.state.validators();
    let domain = cached.config.domain(signed_block.fork_name());

    let proposer_index = signed_block.proposer_index();
    let proposer = validators
        .get(proposer_index.0)
        .map_err(|_| TransitionError::ValidatorIndexOutOfRange(proposer_index))?;
    let signing_root = compute_signing_root(signed_block.message_root(), domain);
    if !verifier.verify(&proposer.pubkey, &signing_root, &signed_block.signature()) {
        return Err(TransitionError::InvalidBlockSignature {
            slot: signed_block.slot(),
        });
    }

    Ok(())
}
