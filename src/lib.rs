//! # createx_vanity
//!
//! Vanity salt miner for guarded-salt deployer factories. Searches salt
//! values until the CREATE2/CREATE3-derived deployment address matches a
//! desired pattern, reproducing the factory's on-chain salt guarding
//! bit-for-bit so predicted addresses match real deployments.
//!
//! ## Architecture
//!
//! - `crypto`: Keccak-256, addresses, CREATE2/CREATE3 derivation
//! - `salt`: salt layout, protection metadata, guard transform
//! - `matcher`: vanity pattern compilation and matching
//! - `worker`: search-space partitioning, parallel workers, coordination
//! - `config`: runtime configuration

pub mod config;
pub mod crypto;
pub mod matcher;
pub mod salt;
pub mod worker;

pub use config::Config;
pub use crypto::create::{
    create2_address, create3_address, init_code_hash, CANONICAL_FACTORY, PROXY_INITCODE_HASH,
};
pub use crypto::{keccak256, Address};
pub use matcher::{MatchResult, Pattern, PatternError, PatternKind};
pub use salt::{guard_salt, GuardedSalt, ProtectionType, Salt, SaltError, DEFAULT_CHAIN_ID};
pub use worker::{
    partition, PatternReport, ProgressUpdate, SaltMatch, SearchConfig, SearchError, SearchPool,
    SearchRange, SearchReport,
};
