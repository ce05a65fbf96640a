use chain::ChainConfig;
use serde::{Deserialize, Serialize};
use ssz_derive::Ssz;
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Ssz, Default, Serialize, Deserialize)]
#[ssz(transparent)]
pub struct Slot(pub u64);

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Slot {
    pub fn next(self) -> Slot {
        Slot(self.0 + 1)
    }

    pub fn epoch(self, config: &ChainConfig) -> u64 {
        config.epoch_at_slot(self.0)
    }
}
