use hex::FromHex;
use serde::{Deserialize, Serialize};
use ssz::{PersistentList, H256};
use ssz_derive::Ssz;
use std::fmt;
use std::str::FromStr;
use typenum::{U262144, U4096};

use crate::validator::Validator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Ssz, Default, Serialize, Deserialize)]
#[ssz(transparent)]
pub struct Bytes32(pub H256);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Ssz, Default, Serialize, Deserialize)]
#[ssz(transparent)]
pub struct ValidatorIndex(pub u64);

/// Four-byte fork version, kept as a big-endian integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Ssz, Default, Serialize, Deserialize)]
#[ssz(transparent)]
pub struct Version(pub u32);

pub type Gwei = u64;
pub type Signature = Bytes32;

pub type HistoricalBlockHashes = PersistentList<Bytes32, U262144>;
pub type Validators = PersistentList<Validator, U4096>;
pub type Balances = PersistentList<Gwei, U4096>;
pub type InactivityScores = PersistentList<u64, U4096>;

impl Bytes32 {
    pub fn zero() -> Self {
        Bytes32(H256::zero())
    }

    pub fn from_slice(bytes: [u8; 32]) -> Self {
        Bytes32(H256::from(bytes))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Bytes32 {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 32] = <[u8; 32]>::from_hex(s.trim_start_matches("0x"))?;
        Ok(Bytes32(H256::from(bytes)))
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl Version {
    pub fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for ValidatorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rebuilds a list from an iterator, failing once the type-level limit is hit.
macro_rules! list_from_iter {
    ($name:ident, $list:ty, $item:ty) => {
        pub fn $name(
            items: impl IntoIterator<Item = $item>,
        ) -> Result<$list, crate::error::TransitionError> {
            let mut list = <$list>::default();
            for item in items {
                list.push(item)
                    .map_err(|_| crate::error::TransitionError::ListFull(stringify!($list)))?;
            }
            Ok(list)
        }
    };
}

list_from_iter!(historical_hashes_from, HistoricalBlockHashes, Bytes32);
list_from_iter!(validators_from, Validators, Validator);
list_from_iter!(gwei_list_from, Balances, Gwei);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes32_hex_round_trip() {
        let root = Bytes32::from_slice([0xab; 32]);
        let text = root.to_string();
        assert!(text.starts_with("0xabab"));
        assert_eq!(text.parse::<Bytes32>(), Ok(root));
    }

    #[test]
    fn bytes32_accepts_unprefixed_hex() {
        let hex = "11".repeat(32);
        assert_eq!(hex.parse::<Bytes32>(), Ok(Bytes32::from_slice([0x11; 32])));
    }

    #[test]
    fn version_bytes_are_big_endian() {
        assert_eq!(Version(0x0100_0000).to_bytes(), [1, 0, 0, 0]);
    }
}
