use crate::signature::compute_domain;
use crate::{Bytes32, Version};
use chain::{ChainConfig, ForkName};

/// Chain configuration bound to one chain instance.
///
/// Built when a state is loaded: the network parameters come from the run
/// configuration, the genesis validators root is read out of the state itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeaconConfig {
    pub chain: ChainConfig,
    pub genesis_validators_root: Bytes32,
}

impl BeaconConfig {
    pub fn new(chain: ChainConfig, genesis_validators_root: Bytes32) -> Self {
        Self {
            chain,
            genesis_validators_root,
        }
    }

    /// Signing domain for messages of the given fork on this chain.
    pub fn domain(&self, fork: ForkName) -> Bytes32 {
        compute_domain(
            Version(self.chain.fork_version(fork)),
            self.genesis_validators_root,
        )
    }
}
