//! Fixture helpers: anchor states and a block builder producing valid chains.

use crate::block::hash_tree_root;
use crate::error::TransitionError;
use crate::signature::{compute_signing_root, SignatureVerifier};
use crate::state::{BeaconState, CachedBeaconState};
use crate::transition::{process_block, process_slots, TransitionOptions};
use crate::types::{gwei_list_from, validators_from};
use crate::{
    altair, phase0, BlockHeader, Bytes32, Fork, SignedBeaconBlock, Slot, SyncAggregate, Validator,
    ValidatorIndex, Version,
};
use chain::{ChainConfig, ForkName};
use sha2::{Digest, Sha256};

pub const MAX_EFFECTIVE_BALANCE: u64 = 32_000_000_000;
pub const GENESIS_TIME: u64 = 1_606_824_023;

pub fn pubkey_for(index: u64) -> Bytes32 {
    Bytes32::from_slice(Sha256::digest(index.to_le_bytes()).into())
}

/// A freshly initialised state at `slot`, in the fork the slot belongs to.
pub fn anchor_state(chain: ChainConfig, slot: Slot, validator_count: u64) -> CachedBeaconState {
    let validators = validators_from((0..validator_count).map(|index| Validator {
        pubkey: pubkey_for(index),
        effective_balance: MAX_EFFECTIVE_BALANCE,
    }))
    .expect("validator count within registry limit");
    let genesis_version = Version(chain.genesis_fork_version);

    let state = phase0::BeaconState {
        genesis_time: GENESIS_TIME,
        genesis_validators_root: hash_tree_root(&validators),
        slot,
        fork: Fork {
            previous_version: genesis_version,
            current_version: genesis_version,
            epoch: 0,
        },
        latest_block_header: BlockHeader {
            slot,
            body_root: hash_tree_root(&phase0::BeaconBlockBody::default()),
            ..BlockHeader::default()
        },
        historical_block_hashes: Default::default(),
        validators,
        balances: gwei_list_from(vec![MAX_EFFECTIVE_BALANCE; validator_count as usize])
            .expect("validator count within registry limit"),
    };

    let state = match chain.fork_at_slot(slot.0) {
        ForkName::Phase0 => BeaconState::Phase0(state),
        ForkName::Altair => BeaconState::Altair(
            altair::upgrade_to_altair(&state, &chain).expect("upgradable anchor"),
        ),
    };
    CachedBeaconState::new(state, chain)
}

/// Extends a chain one block at a time, keeping the post-state as its head.
pub struct ChainBuilder {
    head: CachedBeaconState,
    verifier: SignatureVerifier,
}

impl ChainBuilder {
    pub fn new(anchor: CachedBeaconState) -> Self {
        Self {
            head: anchor,
            verifier: SignatureVerifier::init(),
        }
    }

    pub fn head(&self) -> &CachedBeaconState {
        &self.head
    }

    /// Builds a fully signed block at `slot` and advances the head to its
    /// post-state.
    pub fn build_block(&mut self, slot: Slot) -> Result<SignedBeaconBlock, TransitionError> {
        let advanced = process_slots(&self.head, slot)?;
        let fork = advanced.fork_name();
        let domain = advanced.config.domain(fork);
        let validators = advanced.state.validators();
        let proposer = advanced
            .state
            .proposer_index()
            .ok_or(TransitionError::NoValidators)?;
        let proposer_pubkey = validators
            .get(proposer)
            .map(|validator| validator.pubkey)
            .map_err(|_| TransitionError::ValidatorIndexOutOfRange(ValidatorIndex(proposer)))?;
        let parent_root = hash_tree_root(advanced.state.latest_block_header());

        let randao_reveal = self.verifier.sign(
            &proposer_pubkey,
            &compute_signing_root(hash_tree_root(&slot), domain),
        );
        let graffiti = Bytes32::from_slice(*b"fork-replay fixture builder\0\0\0\0\0");

        let mut block = match fork {
            ForkName::Phase0 => SignedBeaconBlock::Phase0(phase0::SignedBeaconBlock {
                message: phase0::BeaconBlock {
                    slot,
                    proposer_index: ValidatorIndex(proposer),
                    parent_root,
                    state_root: Bytes32::zero(),
                    body: phase0::BeaconBlockBody {
                        randao_reveal,
                        graffiti,
                    },
                },
                signature: Bytes32::zero(),
            }),
            ForkName::Altair => {
                let seats = validators.len_u64().min(64);
                let sync_committee_bits = if seats == 64 { u64::MAX } else { (1 << seats) - 1 };
                SignedBeaconBlock::Altair(altair::SignedBeaconBlock {
                    message: altair::BeaconBlock {
                        slot,
                        proposer_index: ValidatorIndex(proposer),
                        parent_root,
                        state_root: Bytes32::zero(),
                        body: altair::BeaconBlockBody {
                            randao_reveal,
                            graffiti,
                            sync_aggregate: SyncAggregate {
                                sync_committee_bits,
                                sync_committee_signature: self
                                    .verifier
                                    .sign(&proposer_pubkey, &parent_root),
                            },
                        },
                    },
                    signature: Bytes32::zero(),
                })
            }
        };

        let no_root_check = TransitionOptions {
            verify_state_root: false,
            ..TransitionOptions::default()
        };
        let post = process_block(&advanced, &block, no_root_check)?;
        let state_root = post.hash_tree_root();

        match &mut block {
            SignedBeaconBlock::Phase0(block) => block.message.state_root = state_root,
            SignedBeaconBlock::Altair(block) => block.message.state_root = state_root,
        }
        let signing_root = compute_signing_root(block.message_root(), domain);
        let signature = self.verifier.sign(&proposer_pubkey, &signing_root);
        match &mut block {
            SignedBeaconBlock::Phase0(block) => block.signature = signature,
            SignedBeaconBlock::Altair(block) => block.signature = signature,
        }

        self.head = post;
        Ok(block)
    }
}
