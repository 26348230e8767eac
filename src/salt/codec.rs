//! 32-byte salt layout and protection metadata.
//!
//! Layout: bytes[0..20) binding address (deployer EOA or all-zero),
//! byte[20] cross-chain protection flag (0x01 = enabled),
//! bytes[21..32) entropy.

use std::fmt;

use rand::RngCore;

use crate::crypto::Address;

/// Total salt length in bytes.
pub const SALT_LEN: usize = 32;

/// Entropy segment length in bytes.
pub const ENTROPY_LEN: usize = 11;

/// Offset of the protection flag byte.
const FLAG_INDEX: usize = 20;

/// Flag value enabling cross-chain redeploy protection.
const CROSS_CHAIN_FLAG: u8 = 0x01;

#[derive(Debug, thiserror::Error)]
pub enum SaltError {
    #[error("salt must be exactly 32 bytes, got {0}")]
    InvalidSaltLength(usize),
    #[error("entropy must be exactly 11 bytes, got {0}")]
    InvalidEntropyLength(usize),
}

/// Protection scheme embedded in a salt, derived from its binding bytes and
/// flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionType {
    /// No embedded protection.
    Normal,
    /// Salt bound to a specific deployer address.
    SenderProtected,
    /// Salt bound to the deployment chain.
    CrossChainProtected,
    /// Both sender and cross-chain protection.
    SenderAndCrossChainProtected,
}

impl fmt::Display for ProtectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtectionType::Normal => write!(f, "normal"),
            ProtectionType::SenderProtected => write!(f, "sender-protected"),
            ProtectionType::CrossChainProtected => write!(f, "cross-chain-protected"),
            ProtectionType::SenderAndCrossChainProtected => {
                write!(f, "sender-and-cross-chain-protected")
            }
        }
    }
}

/// A 32-byte deployment salt carrying protection metadata.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Creates a salt from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    /// Creates a salt from a slice, rejecting anything that is not 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SaltError> {
        let bytes: [u8; SALT_LEN] = bytes
            .try_into()
            .map_err(|_| SaltError::InvalidSaltLength(bytes.len()))?;
        Ok(Self(bytes))
    }

    /// Encodes a salt from its three segments. Entropy must be exactly
    /// 11 bytes.
    pub fn encode(binding: &Address, cross_chain: bool, entropy: &[u8]) -> Result<Self, SaltError> {
        let entropy: &[u8; ENTROPY_LEN] = entropy
            .try_into()
            .map_err(|_| SaltError::InvalidEntropyLength(entropy.len()))?;
        Ok(Self::with_entropy(binding, cross_chain, entropy))
    }

    /// Encodes a salt from a fixed-size entropy segment.
    #[inline]
    pub fn with_entropy(binding: &Address, cross_chain: bool, entropy: &[u8; ENTROPY_LEN]) -> Self {
        let mut bytes = [0u8; SALT_LEN];
        bytes[..FLAG_INDEX].copy_from_slice(binding.as_bytes());
        bytes[FLAG_INDEX] = if cross_chain { CROSS_CHAIN_FLAG } else { 0x00 };
        bytes[FLAG_INDEX + 1..].copy_from_slice(entropy);
        Self(bytes)
    }

    /// Encodes a salt with random entropy.
    pub fn random(binding: &Address, cross_chain: bool) -> Self {
        let mut entropy = [0u8; ENTROPY_LEN];
        rand::thread_rng().fill_bytes(&mut entropy);
        Self::with_entropy(binding, cross_chain, &entropy)
    }

    /// Returns the salt as raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }

    /// Returns the binding segment as an address.
    #[inline]
    pub fn binding_address(&self) -> Address {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&self.0[..FLAG_INDEX]);
        Address::from_bytes(bytes)
    }

    /// Returns the entropy segment.
    #[inline]
    pub fn entropy(&self) -> [u8; ENTROPY_LEN] {
        let mut entropy = [0u8; ENTROPY_LEN];
        entropy.copy_from_slice(&self.0[FLAG_INDEX + 1..]);
        entropy
    }

    /// Classifies the salt's protection scheme from binding bytes and flag.
    ///
    /// Non-zero binding bytes with a flag other than 0x01 classify as
    /// sender-protected; the flag byte itself is not validated further,
    /// matching the on-chain classifier.
    #[inline]
    pub fn protection_type(&self) -> ProtectionType {
        let binding_zero = self.0[..FLAG_INDEX].iter().all(|&b| b == 0);
        match (binding_zero, self.0[FLAG_INDEX]) {
            (true, CROSS_CHAIN_FLAG) => ProtectionType::CrossChainProtected,
            (true, _) => ProtectionType::Normal,
            (false, CROSS_CHAIN_FLAG) => ProtectionType::SenderAndCrossChainProtected,
            (false, _) => ProtectionType::SenderProtected,
        }
    }

    /// For sender-protected salts, true iff the binding bytes equal the
    /// signer. Unprotected salts always validate.
    pub fn validates_for_signer(&self, signer: &Address) -> bool {
        match self.protection_type() {
            ProtectionType::SenderProtected | ProtectionType::SenderAndCrossChainProtected => {
                &self.0[..FLAG_INDEX] == signer.as_bytes()
            }
            _ => true,
        }
    }

    /// Lowercase hex with 0x prefix.
    pub fn to_hex_prefixed(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", self.to_hex_prefixed())
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_prefixed())
    }
}
