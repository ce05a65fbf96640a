use crate::error::ReplayError;
use crate::loader::{FixtureLoader, LoadedBlock};
use crate::scenario::Scenario;
use crate::source::FixtureSource;
use crate::verifier::{Commitment, CommitmentVerifier};
use chain::ForkName;
use containers::{
    state_transition, Bytes32, CachedBeaconState, SignatureVerifier, SignedBeaconBlock, Slot,
    TransitionError, TransitionOptions,
};
use tracing::{error, info, warn};

/// The state transition the driver applies blocks with.
pub trait Transition {
    fn apply(
        &mut self,
        state: &CachedBeaconState,
        block: &SignedBeaconBlock,
        options: TransitionOptions,
    ) -> Result<CachedBeaconState, TransitionError>;
}

/// Beacon chain transition owning the signature backend handle.
#[derive(Debug)]
pub struct BeaconTransition {
    verifier: SignatureVerifier,
}

impl BeaconTransition {
    pub fn new(verifier: SignatureVerifier) -> Self {
        Self { verifier }
    }
}

impl Transition for BeaconTransition {
    fn apply(
        &mut self,
        state: &CachedBeaconState,
        block: &SignedBeaconBlock,
        options: TransitionOptions,
    ) -> Result<CachedBeaconState, TransitionError> {
        state_transition(state, block, &self.verifier, options)
    }
}

#[derive(Debug)]
pub enum ScenarioStatus {
    Completed,
    Aborted { slot: Slot, reason: ReplayError },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedBlock {
    pub slot: Slot,
    pub fork: ForkName,
    /// The state entered this block's fork while processing it.
    pub upgraded: bool,
    pub commitment: Commitment,
}

#[derive(Debug)]
pub struct ScenarioReport {
    pub title: &'static str,
    pub status: ScenarioStatus,
    pub applied: Vec<AppliedBlock>,
    pub skipped: Vec<Slot>,
    pub final_state_root: Option<Bytes32>,
}

impl ScenarioReport {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            status: ScenarioStatus::Completed,
            applied: Vec::new(),
            skipped: Vec::new(),
            final_state_root: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, ScenarioStatus::Completed)
    }

    pub fn upgrades(&self) -> usize {
        self.applied.iter().filter(|block| block.upgraded).count()
    }

    pub fn mismatches(&self) -> usize {
        self.applied
            .iter()
            .filter(|block| !block.commitment.matches())
            .count()
    }
}

/// Replays scenarios block by block on top of their initial state.
pub struct Replayer<S, T> {
    loader: FixtureLoader<S>,
    transition: T,
    options: TransitionOptions,
    commitments: CommitmentVerifier,
}

impl<S: FixtureSource, T: Transition> Replayer<S, T> {
    pub fn new(
        loader: FixtureLoader<S>,
        transition: T,
        options: TransitionOptions,
        commitments: CommitmentVerifier,
    ) -> Self {
        Self {
            loader,
            transition,
            options,
            commitments,
        }
    }

    pub fn transition(&self) -> &T {
        &self.transition
    }

    /// Runs one scenario to completion or to its first fatal error.
    ///
    /// Errors never escape: they end up in the report as `Aborted`.
    pub fn run(&mut self, scenario: &Scenario) -> ScenarioReport {
        info!(title = scenario.title, "=====================");
        info!(summary = scenario.summary, "Scenario");
        info!(
            from = %scenario.start_slot,
            to = %scenario.last_slot(),
            count = scenario.count,
            "Slot range"
        );

        let mut report = ScenarioReport::new(scenario.title);
        if let Err((slot, reason)) = self.replay(scenario, &mut report) {
            error!(
                title = scenario.title,
                %slot,
                error = %reason,
                "Scenario aborted"
            );
            report.status = ScenarioStatus::Aborted { slot, reason };
        }

        info!(
            title = scenario.title,
            completed = report.is_completed(),
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            upgrades = report.upgrades(),
            mismatches = report.mismatches(),
            "Scenario finished"
        );
        report
    }

    fn replay(
        &mut self,
        scenario: &Scenario,
        report: &mut ScenarioReport,
    ) -> Result<(), (Slot, ReplayError)> {
        let start = scenario.start_slot;
        let mut state = self.loader.load_state(start).map_err(|error| (start, error))?;
        report.final_state_root = Some(state.hash_tree_root());

        let mut reference = match self.loader.load_block(start) {
            Ok(loaded) => loaded.present(),
            Err(error) => {
                warn!(slot = %start, %error, "No reference block for the initial state");
                None
            }
        };

        for slot in scenario.slots() {
            let block = match self.loader.load_block(slot).map_err(|error| (slot, error))? {
                LoadedBlock::Present(block) => block,
                LoadedBlock::Absent => {
                    info!(%slot, "Skipping empty block");
                    report.skipped.push(slot);
                    continue;
                }
            };

            log_roots("before", &state, reference.as_ref());

            let post = self
                .transition
                .apply(&state, &block, self.options)
                .map_err(|source| (slot, ReplayError::Transition { slot, source }))?;

            let commitment = self.commitments.verify(&post, &block);
            report.applied.push(AppliedBlock {
                slot,
                fork: block.fork_name(),
                upgraded: post.fork_name() != state.fork_name(),
                commitment,
            });
            report.final_state_root = Some(commitment.state_root);
            self.commitments
                .enforce(&commitment)
                .map_err(|error| (slot, error))?;

            log_roots("after", &post, Some(&block));
            state = post;
            reference = Some(block);
        }

        Ok(())
    }
}

fn log_roots(stage: &str, state: &CachedBeaconState, block: Option<&SignedBeaconBlock>) {
    let block_state_root = block.map(SignedBeaconBlock::state_root);
    info!(
        stage,
        slot = %state.slot(),
        fork = %state.fork_name(),
        state_root = %state.hash_tree_root(),
        block_state_root = ?block_state_root.map(|root| root.to_string()),
        "Roots"
    );
}
