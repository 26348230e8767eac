//! Salt encoding, protection metadata, and the guard transform.

mod codec;
mod guard;

pub use codec::{ProtectionType, Salt, SaltError, ENTROPY_LEN, SALT_LEN};
pub use guard::{guard_salt, GuardedSalt, DEFAULT_CHAIN_ID};
