use chain::{ChainConfig, InvalidChainConfig};
use containers::TransitionOptions;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_FIXTURES_DIR: &str = "test-data";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open config file")]
    Read(#[from] io::Error),
    #[error("cannot parse config file")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid chain parameters")]
    Chain(#[from] InvalidChainConfig),
}

/// Run configuration of the harness.
///
/// Every field is optional in the YAML file; missing ones fall back to the
/// mainnet chain and the harness transition options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplayConfig {
    pub fixtures_dir: PathBuf,
    pub chain: ChainConfig,
    pub options: TransitionOptions,
    pub strict_commitments: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: PathBuf::from(DEFAULT_FIXTURES_DIR),
            chain: ChainConfig::default(),
            options: TransitionOptions::default(),
            strict_commitments: false,
        }
    }
}

impl ReplayConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.chain.validate()?;
        Ok(config)
    }
}
