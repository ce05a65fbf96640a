pub mod config;
pub mod fork;

pub use config::{ChainConfig, InvalidChainConfig, MAINNET_CONFIG};
pub use fork::ForkName;
