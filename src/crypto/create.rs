//! CREATE2 / CREATE3 address computation.
//!
//! CREATE2: address = keccak256(0xff || factory || salt || initCodeHash)[12..32]
//! CREATE3: a proxy is first deployed via CREATE2 with a fixed init code, then
//! the final contract is deployed by that proxy with plain CREATE at nonce 1:
//!   proxy   = CREATE2(factory, salt, PROXY_INITCODE_HASH)
//!   address = keccak256(0xd6 || 0x94 || proxy || 0x01)[12..32]

use crate::crypto::{keccak256, Address};
use crate::salt::GuardedSalt;

/// Canonical guarded-salt deployer factory, deployed at the same address on
/// all major chains.
pub const CANONICAL_FACTORY: Address = Address::from_bytes([
    0xba, 0x5e, 0xd0, 0x99, 0x63, 0x3d, 0x3b, 0x31, 0x3e, 0x4d, 0x5f, 0x7b, 0xdc, 0x13, 0x05,
    0xd3, 0xc2, 0x8b, 0xa5, 0xed,
]);

/// Keccak-256 hash of the CREATE3 proxy contract initialization code.
/// The proxy bytecode is fixed, so this constant holds for every deployment.
pub const PROXY_INITCODE_HASH: [u8; 32] = [
    0x21, 0xc3, 0x5d, 0xbe, 0x1b, 0x34, 0x4a, 0x24, 0x88, 0xcf, 0x33, 0x21, 0xd6, 0xce, 0x54,
    0x2f, 0x8e, 0x9f, 0x30, 0x55, 0x44, 0xff, 0x09, 0xe4, 0x99, 0x3a, 0x62, 0x31, 0x9a, 0x49,
    0x7c, 0x1f,
];

/// Computes a CREATE2 address.
/// Preimage: 0xff (1) || factory (20) || salt (32) || init_code_hash (32) = 85 bytes.
#[inline]
pub fn create2_address(
    factory: &Address,
    salt: &GuardedSalt,
    init_code_hash: &[u8; 32],
) -> Address {
    let mut preimage = [0u8; 85];
    preimage[0] = 0xff;
    preimage[1..21].copy_from_slice(factory.as_bytes());
    preimage[21..53].copy_from_slice(salt.as_bytes());
    preimage[53..85].copy_from_slice(init_code_hash);

    let hash = keccak256(&preimage);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..32]);
    Address::from_bytes(addr)
}

/// Computes a CREATE3 address: the address the CREATE2-deployed proxy gives
/// the contract it deploys at nonce 1. Preimage is the RLP encoding of
/// [proxy_address, 1]: 0xd6 || 0x94 || proxy (20) || 0x01 = 23 bytes.
#[inline]
pub fn create3_address(factory: &Address, salt: &GuardedSalt) -> Address {
    let proxy = create2_address(factory, salt, &PROXY_INITCODE_HASH);

    let mut preimage = [0u8; 23];
    preimage[0] = 0xd6;
    preimage[1] = 0x94;
    preimage[2..22].copy_from_slice(proxy.as_bytes());
    preimage[22] = 0x01;

    let hash = keccak256(&preimage);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..32]);
    Address::from_bytes(addr)
}

/// Keccak-256 of the full init code (creation bytecode || constructor args).
#[inline]
pub fn init_code_hash(init_code: &[u8]) -> [u8; 32] {
    keccak256(init_code)
}
