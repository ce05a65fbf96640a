use crate::{Bytes32, Gwei};
use serde::{Deserialize, Serialize};
use ssz_derive::Ssz;

#[derive(Clone, Debug, PartialEq, Eq, Default, Ssz, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validator {
    pub pubkey: Bytes32,
    pub effective_balance: Gwei,
}
