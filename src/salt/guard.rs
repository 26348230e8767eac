//! Guard transform: maps a user-supplied salt to the salt the factory
//! actually feeds into address derivation.
//!
//! Preimages per protection type (all hashed with Keccak-256):
//! - normal:                   salt (32)
//! - sender-protected:         pad32(signer) || salt (64)
//! - cross-chain-protected:    uint256(chainId) || salt (64, packed)
//! - sender-and-cross-chain:   pad32(signer) || uint256(chainId) || salt (96)

use std::fmt;

use crate::crypto::{keccak256, Address};
use crate::salt::{ProtectionType, Salt};

/// Chain id used when no live network context is available (the standard
/// local-test chain id).
pub const DEFAULT_CHAIN_ID: u64 = 31337;

/// A guarded salt: the 32-byte address-derivation input. Only ever consumed
/// by the CREATE2/CREATE3 formulas, never decoded back into segments.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuardedSalt([u8; 32]);

impl GuardedSalt {
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex with 0x prefix.
    pub fn to_hex_prefixed(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for GuardedSalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GuardedSalt({})", self.to_hex_prefixed())
    }
}

impl fmt::Display for GuardedSalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_prefixed())
    }
}

/// Applies the factory's guard to a salt. Must reproduce the on-chain
/// transform bit-for-bit; a divergent preimage silently shifts every derived
/// address.
pub fn guard_salt(salt: &Salt, signer: &Address, chain_id: u64) -> GuardedSalt {
    let hash = match salt.protection_type() {
        ProtectionType::Normal => keccak256(salt.as_bytes()),
        ProtectionType::SenderProtected => {
            let mut preimage = [0u8; 64];
            preimage[12..32].copy_from_slice(signer.as_bytes());
            preimage[32..64].copy_from_slice(salt.as_bytes());
            keccak256(&preimage)
        }
        ProtectionType::CrossChainProtected => {
            let mut preimage = [0u8; 64];
            preimage[24..32].copy_from_slice(&chain_id.to_be_bytes());
            preimage[32..64].copy_from_slice(salt.as_bytes());
            keccak256(&preimage)
        }
        ProtectionType::SenderAndCrossChainProtected => {
            let mut preimage = [0u8; 96];
            preimage[12..32].copy_from_slice(signer.as_bytes());
            preimage[56..64].copy_from_slice(&chain_id.to_be_bytes());
            preimage[64..96].copy_from_slice(salt.as_bytes());
            keccak256(&preimage)
        }
    };
    GuardedSalt(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salt::ENTROPY_LEN;

    fn signer() -> Address {
        "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap()
    }

    #[test]
    fn test_normal_hashes_salt_alone() {
        let salt = Salt::encode(&Address::ZERO, false, &[3u8; ENTROPY_LEN]).unwrap();
        let guarded = guard_salt(&salt, &signer(), DEFAULT_CHAIN_ID);
        assert_eq!(guarded.as_bytes(), &keccak256(salt.as_bytes()));
    }

    #[test]
    fn test_sender_protected_preimage() {
        let salt = Salt::encode(&signer(), false, &[3u8; ENTROPY_LEN]).unwrap();
        let guarded = guard_salt(&salt, &signer(), DEFAULT_CHAIN_ID);

        let mut expected = [0u8; 64];
        expected[12..32].copy_from_slice(signer().as_bytes());
        expected[32..64].copy_from_slice(salt.as_bytes());
        assert_eq!(guarded.as_bytes(), &keccak256(&expected));
    }

    #[test]
    fn test_cross_chain_preimage() {
        let salt = Salt::encode(&Address::ZERO, true, &[3u8; ENTROPY_LEN]).unwrap();
        let guarded = guard_salt(&salt, &signer(), 1);

        let mut expected = [0u8; 64];
        expected[31] = 0x01;
        expected[32..64].copy_from_slice(salt.as_bytes());
        assert_eq!(guarded.as_bytes(), &keccak256(&expected));
    }

    #[test]
    fn test_sender_and_cross_chain_preimage() {
        let salt = Salt::encode(&signer(), true, &[3u8; ENTROPY_LEN]).unwrap();
        let guarded = guard_salt(&salt, &signer(), DEFAULT_CHAIN_ID);

        let mut expected = [0u8; 96];
        expected[12..32].copy_from_slice(signer().as_bytes());
        expected[56..64].copy_from_slice(&DEFAULT_CHAIN_ID.to_be_bytes());
        expected[64..96].copy_from_slice(salt.as_bytes());
        assert_eq!(guarded.as_bytes(), &keccak256(&expected));
    }

    #[test]
    fn test_protection_types_diverge() {
        let entropy = [9u8; ENTROPY_LEN];
        let normal = Salt::encode(&Address::ZERO, false, &entropy).unwrap();
        let cross = Salt::encode(&Address::ZERO, true, &entropy).unwrap();
        let sender = Salt::encode(&signer(), false, &entropy).unwrap();
        let both = Salt::encode(&signer(), true, &entropy).unwrap();

        let guards = [
            guard_salt(&normal, &signer(), DEFAULT_CHAIN_ID),
            guard_salt(&cross, &signer(), DEFAULT_CHAIN_ID),
            guard_salt(&sender, &signer(), DEFAULT_CHAIN_ID),
            guard_salt(&both, &signer(), DEFAULT_CHAIN_ID),
        ];
        for i in 0..guards.len() {
            for j in i + 1..guards.len() {
                assert_ne!(guards[i], guards[j]);
            }
        }
    }

    #[test]
    fn test_chain_id_changes_guard() {
        let salt = Salt::encode(&signer(), true, &[1u8; ENTROPY_LEN]).unwrap();
        let local = guard_salt(&salt, &signer(), DEFAULT_CHAIN_ID);
        let mainnet = guard_salt(&salt, &signer(), 1);
        assert_ne!(local, mainnet);
    }
}
