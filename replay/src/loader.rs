use crate::error::ReplayError;
use crate::source::{FixtureKey, FixtureSource};
use chain::{ChainConfig, ForkName};
use containers::{altair, phase0, BeaconState, CachedBeaconState, SignedBeaconBlock, Slot};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Status marking a slot that has no block.
pub const NOT_FOUND_STATUS: u16 = 404;

/// Stored form of a block fixture.
///
/// Either `{"version": "PHASE0", "data": {...}}` or `{"status": 404}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl BlockEnvelope {
    pub fn found(block: &SignedBeaconBlock) -> serde_json::Result<Self> {
        let data = match block {
            SignedBeaconBlock::Phase0(block) => serde_json::to_value(block)?,
            SignedBeaconBlock::Altair(block) => serde_json::to_value(block)?,
        };
        Ok(Self {
            version: Some(block.fork_name().as_str().to_ascii_uppercase()),
            data: Some(data),
            status: None,
        })
    }

    pub fn not_found() -> Self {
        Self {
            status: Some(NOT_FOUND_STATUS),
            ..Self::default()
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(NOT_FOUND_STATUS)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadedBlock {
    Present(SignedBeaconBlock),
    Absent,
}

impl LoadedBlock {
    pub fn present(self) -> Option<SignedBeaconBlock> {
        match self {
            Self::Present(block) => Some(block),
            Self::Absent => None,
        }
    }
}

/// Resolves slots to decoded states and blocks.
///
/// The decoding schema always comes from [`ChainConfig::fork_at_slot`].
pub struct FixtureLoader<S> {
    source: S,
    chain: ChainConfig,
}

impl<S: FixtureSource> FixtureLoader<S> {
    pub fn new(source: S, chain: ChainConfig) -> Self {
        Self { source, chain }
    }

    pub fn load_state(&self, slot: Slot) -> Result<CachedBeaconState, ReplayError> {
        let key = FixtureKey::State(slot);
        info!(path = %self.source.locate(key), "readState");
        let bytes = self.fetch(key)?;

        let fork = self.chain.fork_at_slot(slot.0);
        let state = BeaconState::from_ssz_bytes(fork, &bytes).map_err(|error| {
            ReplayError::StateDecode {
                slot,
                fork,
                reason: format!("{error:?}"),
            }
        })?;
        debug!(%slot, %fork, validators = state.validators().len_u64(), "Decoded state");

        Ok(CachedBeaconState::new(state, self.chain))
    }

    pub fn load_block(&self, slot: Slot) -> Result<LoadedBlock, ReplayError> {
        let key = FixtureKey::Block(slot);
        info!(path = %self.source.locate(key), "readBlock");
        let bytes = self.fetch(key)?;

        let envelope: BlockEnvelope =
            serde_json::from_slice(&bytes).map_err(|error| ReplayError::MalformedEnvelope {
                slot,
                reason: error.to_string(),
            })?;
        if envelope.is_not_found() {
            return Ok(LoadedBlock::Absent);
        }

        let tag = envelope.version.ok_or_else(|| ReplayError::MalformedEnvelope {
            slot,
            reason: "missing version tag".to_string(),
        })?;
        let tagged: ForkName = tag
            .parse()
            .map_err(|_| ReplayError::UnknownScheme { slot, tag: tag.clone() })?;
        let expected = self.chain.fork_at_slot(slot.0);
        if tagged != expected {
            return Err(ReplayError::SchemeMismatch {
                slot,
                tagged,
                expected,
            });
        }

        let data = envelope.data.ok_or_else(|| ReplayError::MalformedEnvelope {
            slot,
            reason: "missing block data".to_string(),
        })?;
        let block = decode_block(expected, data).map_err(|source| ReplayError::BlockDecode {
            slot,
            fork: expected,
            source,
        })?;

        Ok(LoadedBlock::Present(block))
    }

    fn fetch(&self, key: FixtureKey) -> Result<Vec<u8>, ReplayError> {
        self.source
            .fetch(key)
            .map_err(|source| ReplayError::FixtureRead { key, source })?
            .ok_or(ReplayError::FixtureNotFound(key))
    }
}

fn decode_block(fork: ForkName, data: Value) -> serde_json::Result<SignedBeaconBlock> {
    Ok(match fork {
        ForkName::Phase0 => serde_json::from_value::<phase0::SignedBeaconBlock>(data)?.into(),
        ForkName::Altair => serde_json::from_value::<altair::SignedBeaconBlock>(data)?.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use chain::{config::ALTAIR_FORK_SLOT, MAINNET_CONFIG};
    use containers::testing::{anchor_state, ChainBuilder};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn envelope_bytes(envelope: &BlockEnvelope) -> Vec<u8> {
        serde_json::to_vec(envelope).expect("serializable envelope")
    }

    fn loader_with(key: FixtureKey, bytes: Vec<u8>) -> FixtureLoader<MemorySource> {
        let mut source = MemorySource::new();
        source.insert(key, bytes);
        FixtureLoader::new(source, MAINNET_CONFIG)
    }

    #[rstest]
    #[case::last_phase0_slot(ALTAIR_FORK_SLOT - 1, ForkName::Phase0)]
    #[case::fork_slot(ALTAIR_FORK_SLOT, ForkName::Altair)]
    fn state_schema_follows_slot(#[case] slot: u64, #[case] fork: ForkName) {
        let state = anchor_state(MAINNET_CONFIG, Slot(slot), 4);
        let bytes = state.state.to_ssz().expect("encodable");
        let loader = loader_with(FixtureKey::State(Slot(slot)), bytes);

        let loaded = loader.load_state(Slot(slot)).expect("loadable");

        assert_eq!(loaded.fork_name(), fork);
        assert_eq!(loaded, state);
    }

    #[test]
    fn missing_state_is_not_found() {
        let loader = FixtureLoader::new(MemorySource::new(), MAINNET_CONFIG);
        assert!(matches!(
            loader.load_state(Slot(320)),
            Err(ReplayError::FixtureNotFound(FixtureKey::State(Slot(320))))
        ));
    }

    #[test]
    fn not_found_status_is_absent_before_decoding() {
        let bytes = br#"{"status": 404, "version": "BELLATRIX", "data": 17}"#.to_vec();
        let loader = loader_with(FixtureKey::Block(Slot(321)), bytes);
        assert_eq!(loader.load_block(Slot(321)).expect("loadable"), LoadedBlock::Absent);
    }

    #[test]
    fn present_block_round_trips_through_envelope() {
        let mut builder = ChainBuilder::new(anchor_state(MAINNET_CONFIG, Slot(320), 4));
        let block = builder.build_block(Slot(321)).expect("buildable");
        let envelope = BlockEnvelope::found(&block).expect("serializable");
        assert_eq!(envelope.version.as_deref(), Some("PHASE0"));

        let loader = loader_with(FixtureKey::Block(Slot(321)), envelope_bytes(&envelope));

        assert_eq!(
            loader.load_block(Slot(321)).expect("loadable"),
            LoadedBlock::Present(block)
        );
    }

    #[test]
    fn version_tag_is_case_insensitive() {
        let mut builder = ChainBuilder::new(anchor_state(MAINNET_CONFIG, Slot(320), 4));
        let block = builder.build_block(Slot(321)).expect("buildable");
        let mut envelope = BlockEnvelope::found(&block).expect("serializable");
        envelope.version = Some("phase0".to_string());

        let loader = loader_with(FixtureKey::Block(Slot(321)), envelope_bytes(&envelope));
        assert!(loader.load_block(Slot(321)).expect("loadable").present().is_some());
    }

    #[test]
    fn unknown_version_tag_is_rejected() {
        let bytes = br#"{"version": "BELLATRIX", "data": {}}"#.to_vec();
        let loader = loader_with(FixtureKey::Block(Slot(400)), bytes);
        assert!(matches!(
            loader.load_block(Slot(400)),
            Err(ReplayError::UnknownScheme { slot: Slot(400), tag }) if tag == "BELLATRIX"
        ));
    }

    #[test]
    fn version_tag_must_match_slot_fork() {
        let mut builder = ChainBuilder::new(anchor_state(MAINNET_CONFIG, Slot(320), 4));
        let block = builder.build_block(Slot(321)).expect("buildable");
        let mut envelope = BlockEnvelope::found(&block).expect("serializable");
        envelope.version = Some("ALTAIR".to_string());

        let loader = loader_with(FixtureKey::Block(Slot(321)), envelope_bytes(&envelope));
        assert!(matches!(
            loader.load_block(Slot(321)),
            Err(ReplayError::SchemeMismatch {
                tagged: ForkName::Altair,
                expected: ForkName::Phase0,
                ..
            })
        ));
    }

    #[rstest]
    #[case::not_json(b"not json".to_vec())]
    #[case::no_version(br#"{"data": {}}"#.to_vec())]
    #[case::no_data(br#"{"version": "PHASE0"}"#.to_vec())]
    fn malformed_envelopes(#[case] bytes: Vec<u8>) {
        let loader = loader_with(FixtureKey::Block(Slot(321)), bytes);
        assert!(matches!(
            loader.load_block(Slot(321)),
            Err(ReplayError::MalformedEnvelope { slot: Slot(321), .. })
        ));
    }

    #[test]
    fn undecodable_block_data() {
        let bytes = br#"{"version": "PHASE0", "data": {"message": 3}}"#.to_vec();
        let loader = loader_with(FixtureKey::Block(Slot(321)), bytes);
        assert!(matches!(
            loader.load_block(Slot(321)),
            Err(ReplayError::BlockDecode {
                fork: ForkName::Phase0,
                ..
            })
        ));
    }
}
