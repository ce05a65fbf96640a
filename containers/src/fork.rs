use crate::Version;
use serde::{Deserialize, Serialize};
use ssz_derive::Ssz;

/// Fork versions recorded inside a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fork {
    pub previous_version: Version,
    pub current_version: Version,
    pub epoch: u64,
}
