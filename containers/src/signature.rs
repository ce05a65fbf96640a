use crate::{Bytes32, Signature, Version};
use sha2::{Digest, Sha256};
use tracing::info;

fn sha256(parts: &[&[u8]]) -> Bytes32 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    Bytes32::from_slice(hasher.finalize().into())
}

pub fn compute_domain(fork_version: Version, genesis_validators_root: Bytes32) -> Bytes32 {
    sha256(&[&fork_version.to_bytes(), genesis_validators_root.0.as_bytes()])
}

pub fn compute_signing_root(object_root: Bytes32, domain: Bytes32) -> Bytes32 {
    sha256(&[object_root.0.as_bytes(), domain.0.as_bytes()])
}

/// Handle to the signature backend.
///
/// Created once per process by [`SignatureVerifier::init`] and moved into
/// whatever applies blocks; nothing else can verify signatures.
/// Signatures are digests of the signer's public key and the signing root.
#[derive(Debug)]
pub struct SignatureVerifier {
    _private: (),
}

impl SignatureVerifier {
    pub fn init() -> Self {
        info!(backend = "sha256-digest", "Signature backend initialized");
        Self { _private: () }
    }

    pub fn sign(&self, pubkey: &Bytes32, signing_root: &Bytes32) -> Signature {
        sha256(&[pubkey.0.as_bytes(), signing_root.0.as_bytes()])
    }

    pub fn verify(&self, pubkey: &Bytes32, signing_root: &Bytes32, signature: &Signature) -> bool {
        !signature.is_zero() && self.sign(pubkey, signing_root) == *signature
    }
}
