use crate::block::hash_tree_root;
use crate::config::BeaconConfig;
use crate::{altair, phase0, BlockHeader, Bytes32, Slot, Validators};
use chain::{ChainConfig, ForkName};
use ssz::{ReadError, SszReadDefault, SszWrite, WriteError};

/// Beacon state of whichever fork it was decoded as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BeaconState {
    Phase0(phase0::BeaconState),
    Altair(altair::BeaconState),
}

macro_rules! with_state {
    ($state:expr, $inner:ident => $body:expr) => {
        match $state {
            BeaconState::Phase0($inner) => $body,
            BeaconState::Altair($inner) => $body,
        }
    };
}

impl From<phase0::BeaconState> for BeaconState {
    fn from(state: phase0::BeaconState) -> Self {
        Self::Phase0(state)
    }
}

impl From<altair::BeaconState> for BeaconState {
    fn from(state: altair::BeaconState) -> Self {
        Self::Altair(state)
    }
}

impl BeaconState {
    /// Decodes SSZ bytes with the schema of `fork`.
    pub fn from_ssz_bytes(fork: ForkName, bytes: &[u8]) -> Result<Self, ReadError> {
        Ok(match fork {
            ForkName::Phase0 => Self::Phase0(phase0::BeaconState::from_ssz_default(bytes)?),
            ForkName::Altair => Self::Altair(altair::BeaconState::from_ssz_default(bytes)?),
        })
    }

    pub fn to_ssz(&self) -> Result<Vec<u8>, WriteError> {
        with_state!(self, state => state.to_ssz())
    }

    pub fn fork_name(&self) -> ForkName {
        match self {
            Self::Phase0(_) => ForkName::Phase0,
            Self::Altair(_) => ForkName::Altair,
        }
    }

    pub fn slot(&self) -> Slot {
        with_state!(self, state => state.slot)
    }

    pub(crate) fn set_slot(&mut self, slot: Slot) {
        with_state!(self, state => state.slot = slot)
    }

    pub fn genesis_validators_root(&self) -> Bytes32 {
        with_state!(self, state => state.genesis_validators_root)
    }

    pub fn latest_block_header(&self) -> &BlockHeader {
        with_state!(self, state => &state.latest_block_header)
    }

    pub(crate) fn latest_block_header_mut(&mut self) -> &mut BlockHeader {
        with_state!(self, state => &mut state.latest_block_header)
    }

    pub fn validators(&self) -> &Validators {
        with_state!(self, state => &state.validators)
    }

    pub fn balance(&self, index: u64) -> Option<u64> {
        with_state!(self, state => state.balances.get(index).ok().copied())
    }

    /// Content commitment over the full state.
    pub fn hash_tree_root(&self) -> Bytes32 {
        with_state!(self, state => hash_tree_root(state))
    }

    /// Round-robin proposer for the state's current slot.
    pub fn proposer_index(&self) -> Option<u64> {
        let validator_count = self.validators().len_u64();
        (validator_count > 0).then(|| self.slot().0 % validator_count)
    }
}

/// A state together with the chain configuration needed to process it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedBeaconState {
    pub state: BeaconState,
    pub config: BeaconConfig,
}

impl CachedBeaconState {
    /// Binds `state` to the network parameters, taking the genesis validators
    /// root from the state.
    pub fn new(state: BeaconState, chain: ChainConfig) -> Self {
        let config = BeaconConfig::new(chain, state.genesis_validators_root());
        Self { state, config }
    }

    pub fn slot(&self) -> Slot {
        self.state.slot()
    }

    pub fn fork_name(&self) -> ForkName {
        self.state.fork_name()
    }

    pub fn hash_tree_root(&self) -> Bytes32 {
        self.state.hash_tree_root()
    }

    pub(crate) fn with_state(&self, state: BeaconState) -> Self {
        Self {
            state,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::anchor_state;
    use chain::{config::ALTAIR_FORK_SLOT, MAINNET_CONFIG};
    use pretty_assertions::assert_eq;

    #[test]
    fn ssz_bytes_decode_with_matching_schema() {
        for slot in [ALTAIR_FORK_SLOT - 1, ALTAIR_FORK_SLOT] {
            let cached = anchor_state(MAINNET_CONFIG, Slot(slot), 4);
            let fork = MAINNET_CONFIG.fork_at_slot(slot);
            let bytes = cached.state.to_ssz().expect("encodable");

            let decoded = BeaconState::from_ssz_bytes(fork, &bytes).expect("decodable");

            assert_eq!(decoded.fork_name(), fork);
            assert_eq!(decoded, cached.state);
            assert_eq!(decoded.hash_tree_root(), cached.hash_tree_root());
        }
    }

    #[test]
    fn cached_state_reads_genesis_validators_root() {
        let cached = anchor_state(MAINNET_CONFIG, Slot(320), 4);
        assert!(!cached.state.genesis_validators_root().is_zero());
        assert_eq!(
            cached.config.genesis_validators_root,
            cached.state.genesis_validators_root()
        );
        assert_eq!(cached.config.chain, MAINNET_CONFIG);
    }

    #[test]
    fn root_tracks_content() {
        let cached = anchor_state(MAINNET_CONFIG, Slot(320), 4);
        let mut changed = cached.state.clone();
        changed.set_slot(Slot(321));
        assert_ne!(changed.hash_tree_root(), cached.hash_tree_root());
    }

    #[test]
    fn proposer_rotates_over_validators() {
        let cached = anchor_state(MAINNET_CONFIG, Slot(322), 4);
        assert_eq!(cached.state.proposer_index(), Some(2));
    }
}
