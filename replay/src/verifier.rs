use crate::error::ReplayError;
use containers::{Bytes32, CachedBeaconState, SignedBeaconBlock, Slot};
use tracing::warn;

/// Computed and declared post-state roots for one applied block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Commitment {
    pub slot: Slot,
    pub state_root: Bytes32,
    pub block_state_root: Bytes32,
}

impl Commitment {
    pub fn matches(&self) -> bool {
        self.state_root == self.block_state_root
    }
}

/// Compares a post-state with the root its block declares.
///
/// A mismatch is only reported unless the verifier is strict.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommitmentVerifier {
    strict: bool,
}

impl CommitmentVerifier {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn verify(&self, state: &CachedBeaconState, block: &SignedBeaconBlock) -> Commitment {
        let commitment = Commitment {
            slot: block.slot(),
            state_root: state.hash_tree_root(),
            block_state_root: block.state_root(),
        };
        if !commitment.matches() {
            warn!(
                slot = %commitment.slot,
                state_root = %commitment.state_root,
                block_state_root = %commitment.block_state_root,
                "State root differs from block state root"
            );
        }
        commitment
    }

    /// Turns a mismatch into an error in strict mode.
    pub fn enforce(&self, commitment: &Commitment) -> Result<(), ReplayError> {
        if self.strict && !commitment.matches() {
            return Err(ReplayError::CommitmentMismatch {
                slot: commitment.slot,
                state_root: commitment.state_root,
                block_state_root: commitment.block_state_root,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain::MAINNET_CONFIG;
    use containers::testing::{anchor_state, ChainBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn built_block_commits_to_post_state() {
        let mut builder = ChainBuilder::new(anchor_state(MAINNET_CONFIG, Slot(320), 4));
        let block = builder.build_block(Slot(321)).expect("buildable");

        let commitment = CommitmentVerifier::default().verify(builder.head(), &block);

        assert!(commitment.matches());
        assert_eq!(commitment.slot, Slot(321));
        assert_eq!(commitment.state_root, builder.head().hash_tree_root());
    }

    #[test]
    fn mismatch_is_only_fatal_when_strict() {
        let mut builder = ChainBuilder::new(anchor_state(MAINNET_CONFIG, Slot(320), 4));
        let block = builder.build_block(Slot(321)).expect("buildable");
        let unrelated = anchor_state(MAINNET_CONFIG, Slot(900), 4);

        let lenient = CommitmentVerifier::new(false);
        let commitment = lenient.verify(&unrelated, &block);
        assert!(!commitment.matches());
        assert!(lenient.enforce(&commitment).is_ok());

        let strict = CommitmentVerifier::new(true);
        assert!(matches!(
            strict.enforce(&commitment),
            Err(ReplayError::CommitmentMismatch { slot: Slot(321), .. })
        ));
    }
}
