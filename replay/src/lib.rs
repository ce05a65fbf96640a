//! Fork-aware block replay: loads a state, applies the following blocks and
//! checks every post-state against the root its block declares.

pub mod config;
pub mod driver;
pub mod error;
pub mod loader;
pub mod scenario;
pub mod source;
pub mod verifier;

pub use config::{ConfigError, ReplayConfig};
pub use driver::{
    AppliedBlock, BeaconTransition, Replayer, ScenarioReport, ScenarioStatus, Transition,
};
pub use error::ReplayError;
pub use loader::{BlockEnvelope, FixtureLoader, LoadedBlock};
pub use scenario::{Scenario, USECASES};
pub use source::{DirectorySource, FixtureKey, FixtureSource, MemorySource};
pub use verifier::{Commitment, CommitmentVerifier};
