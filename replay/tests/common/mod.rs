#![allow(dead_code)]

use chain::ChainConfig;
use containers::testing::{anchor_state, ChainBuilder};
use containers::{Bytes32, SignatureVerifier, SignedBeaconBlock, Slot, TransitionOptions};
use replay::{
    BeaconTransition, BlockEnvelope, CommitmentVerifier, FixtureKey, FixtureLoader,
    FixtureSource, MemorySource, Replayer, Scenario,
};
use std::fs;
use std::path::Path;

pub const VALIDATORS: u64 = 4;

pub const ALL_CHECKS: TransitionOptions = TransitionOptions {
    verify_proposer: true,
    verify_signatures: true,
    verify_state_root: true,
};

/// Initial state and blocks for one scenario, built on a valid chain.
pub struct Fixtures {
    pub start: Slot,
    pub state: Vec<u8>,
    pub blocks: Vec<(Slot, Option<SignedBeaconBlock>)>,
}

impl Fixtures {
    /// Builds the state at the scenario start and every block after it.
    /// Slots in `empty` get no block.
    pub fn build(chain: ChainConfig, scenario: &Scenario, empty: &[u64]) -> Self {
        let start = scenario.start_slot;
        let mut builder = ChainBuilder::new(anchor_state(chain, Slot(start.0 - 1), VALIDATORS));

        let first = builder.build_block(start).expect("buildable start block");
        let state = builder.head().state.to_ssz().expect("encodable state");
        let mut blocks = vec![(start, Some(first))];

        for slot in scenario.slots() {
            let block = if empty.contains(&slot.0) {
                None
            } else {
                Some(builder.build_block(slot).expect("buildable block"))
            };
            blocks.push((slot, block));
        }

        Self {
            start,
            state,
            blocks,
        }
    }

    pub fn block_mut(&mut self, slot: u64) -> &mut SignedBeaconBlock {
        self.blocks
            .iter_mut()
            .find(|(block_slot, _)| block_slot.0 == slot)
            .and_then(|(_, block)| block.as_mut())
            .expect("block present at slot")
    }

    pub fn entries(&self) -> Vec<(FixtureKey, Vec<u8>)> {
        let mut entries = vec![(FixtureKey::State(self.start), self.state.clone())];
        for (slot, block) in &self.blocks {
            let envelope = match block {
                Some(block) => BlockEnvelope::found(block).expect("serializable block"),
                None => BlockEnvelope::not_found(),
            };
            let bytes = serde_json::to_vec_pretty(&envelope).expect("serializable envelope");
            entries.push((FixtureKey::Block(*slot), bytes));
        }
        entries
    }

    pub fn into_memory(self) -> MemorySource {
        let mut source = MemorySource::new();
        for (key, bytes) in self.entries() {
            source.insert(key, bytes);
        }
        source
    }

    pub fn write_to(&self, dir: &Path) {
        for (key, bytes) in self.entries() {
            fs::write(dir.join(key.file_name()), bytes).expect("write fixture");
        }
    }
}

pub fn set_state_root(block: &mut SignedBeaconBlock, root: Bytes32) {
    match block {
        SignedBeaconBlock::Phase0(block) => block.message.state_root = root,
        SignedBeaconBlock::Altair(block) => block.message.state_root = root,
    }
}

pub fn replayer<S: FixtureSource>(
    chain: ChainConfig,
    source: S,
    options: TransitionOptions,
    strict: bool,
) -> Replayer<S, BeaconTransition> {
    Replayer::new(
        FixtureLoader::new(source, chain),
        BeaconTransition::new(SignatureVerifier::init()),
        options,
        CommitmentVerifier::new(strict),
    )
}
