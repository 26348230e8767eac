//! Runtime configuration for the salt search CLI.

use clap::Parser;

use crate::crypto::create::CANONICAL_FACTORY;
use crate::crypto::Address;
use crate::matcher::{Pattern, PatternKind};
use crate::salt::DEFAULT_CHAIN_ID;

/// Vanity Salt Miner
///
/// Searches salt values until the CREATE3-derived deployment address matches
/// the given pattern(s). Candidate salts are bound to the signer and carry
/// cross-chain redeploy protection, so a found salt can only be consumed by
/// that signer on the configured chain.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Deployer EOA (20 bytes, hex with or without 0x); bound into every salt
    #[arg(short = 's', long)]
    pub signer: String,

    /// Factory contract address (defaults to the canonical deployer)
    #[arg(short = 'f', long)]
    pub factory: Option<String>,

    /// Chain id mixed into the guarded salt
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// Pattern as KIND:VALUE. Kinds: prefix, suffix, both, repeating-prefix,
    /// repeating-suffix, custom. May be given multiple times.
    #[arg(short = 'p', long = "pattern", required = true)]
    pub patterns: Vec<String>,

    /// Total salt indices to try
    #[arg(short = 'a', long, default_value_t = 1_000_000)]
    pub max_attempts: u64,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Stop after finding N addresses (0 = exhaust the whole range)
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Returns the chain id, defaulting to the local-test chain id.
    pub fn chain_id(&self) -> u64 {
        self.chain_id.unwrap_or(DEFAULT_CHAIN_ID)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.signer.parse::<Address>().is_err() {
            return Err(ConfigError::InvalidConfig(
                "signer must be 20 bytes (40 hex chars)".into(),
            ));
        }

        if let Some(ref factory) = self.factory {
            if factory.parse::<Address>().is_err() {
                return Err(ConfigError::InvalidConfig(
                    "factory must be 20 bytes (40 hex chars)".into(),
                ));
            }
        }

        if self.patterns.is_empty() {
            return Err(ConfigError::InvalidPattern(
                "at least one pattern is required".into(),
            ));
        }
        for raw in &self.patterns {
            parse_pattern(raw)?;
        }

        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidConfig(
                "max attempts must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Signer as an address (after validation).
    pub fn signer_address(&self) -> Address {
        self.signer.parse().expect("validated address")
    }

    /// Factory as an address, defaulting to the canonical deployer.
    pub fn factory_address(&self) -> Address {
        match self.factory {
            Some(ref factory) => factory.parse().expect("validated address"),
            None => CANONICAL_FACTORY,
        }
    }

    /// Compiles every pattern argument.
    pub fn compiled_patterns(&self) -> Result<Vec<Pattern>, ConfigError> {
        self.patterns.iter().map(|s| parse_pattern(s)).collect()
    }
}

/// Parses a KIND:VALUE pattern argument and compiles it.
fn parse_pattern(raw: &str) -> Result<Pattern, ConfigError> {
    let (kind, value) = raw.split_once(':').ok_or_else(|| {
        ConfigError::InvalidPattern(format!("expected KIND:VALUE, got '{}'", raw))
    })?;
    let kind: PatternKind = kind
        .parse()
        .map_err(|e| ConfigError::InvalidPattern(format!("{}", e)))?;
    Pattern::compile(kind, value).map_err(|e| ConfigError::InvalidPattern(format!("{}", e)))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            signer: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".into(),
            factory: None,
            chain_id: None,
            patterns: vec!["prefix:ed6e".into()],
            max_attempts: 1_000_000,
            workers: None,
            count: 1,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = base_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.factory_address(), CANONICAL_FACTORY);
        assert_eq!(config.chain_id(), DEFAULT_CHAIN_ID);

        let patterns = config.compiled_patterns().unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].kind(), PatternKind::Prefix);
        assert_eq!(patterns[0].value(), "ed6e");
    }

    #[test]
    fn test_rejects_bad_signer() {
        let mut config = base_config();
        config.signer = "0x1234".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bad_pattern() {
        let mut config = base_config();
        config.patterns = vec!["ed6e".into()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern(_))
        ));

        config.patterns = vec!["anagram:ed6e".into()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let mut config = base_config();
        config.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_custom_pattern_value_may_contain_colons() {
        let mut config = base_config();
        config.patterns = vec!["custom:^0x[0-9]{2}:?".into()];
        assert!(config.validate().is_ok());
    }
}
