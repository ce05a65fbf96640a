pub mod altair;
pub mod block;
pub mod config;
pub mod error;
pub mod fork;
pub mod phase0;
pub mod serde_helpers;
pub mod signature;
pub mod slot;
pub mod state;
pub mod transition;
pub mod types;
pub mod validator;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use altair::SyncAggregate;
pub use block::{hash_tree_root, BlockHeader, SignedBeaconBlock};
pub use config::BeaconConfig;
pub use error::TransitionError;
pub use fork::Fork;
pub use signature::SignatureVerifier;
pub use slot::Slot;
pub use state::{BeaconState, CachedBeaconState};
pub use transition::{state_transition, TransitionOptions};
pub use types::{
    Balances, Bytes32, Gwei, HistoricalBlockHashes, InactivityScores, Signature, ValidatorIndex,
    Validators, Version,
};
pub use validator::Validator;
pub use ssz;
