//! Vanity pattern compilation and matching.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::crypto::Address;

/// The kind of vanity criterion to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternKind {
    /// Address starts with the value
    #[default]
    Prefix,
    /// Address ends with the value
    Suffix,
    /// Address starts and ends with the value
    Both,
    /// Address starts with a run of one repeated hex digit (as long as the
    /// value) and ends with the value
    RepeatingPrefix,
    /// Address starts with the value and ends with a run of one repeated hex
    /// digit (as long as the value)
    RepeatingSuffix,
    /// Value is a case-insensitive regex searched over the 0x-prefixed address
    Custom,
}

impl FromStr for PatternKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prefix" | "start" | "begin" => Ok(PatternKind::Prefix),
            "suffix" | "end" => Ok(PatternKind::Suffix),
            "both" | "prefixandsuffix" => Ok(PatternKind::Both),
            "repeating-prefix" | "repeatingprefix" => Ok(PatternKind::RepeatingPrefix),
            "repeating-suffix" | "repeatingsuffix" => Ok(PatternKind::RepeatingSuffix),
            "custom" | "regex" => Ok(PatternKind::Custom),
            _ => Err(PatternError::UnsupportedKind(s.to_string())),
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Prefix => write!(f, "prefix"),
            PatternKind::Suffix => write!(f, "suffix"),
            PatternKind::Both => write!(f, "both"),
            PatternKind::RepeatingPrefix => write!(f, "repeating-prefix"),
            PatternKind::RepeatingSuffix => write!(f, "repeating-suffix"),
            PatternKind::Custom => write!(f, "custom"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("unsupported pattern kind: {0}")]
    UnsupportedKind(String),
    #[error("pattern cannot be empty")]
    EmptyPattern,
    #[error("pattern must contain only hex characters (0-9, a-f): {0}")]
    InvalidHexPattern(String),
    #[error("pattern requires more than 40 characters of address: {0}")]
    PatternTooLong(String),
    #[error("invalid custom regex: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// Result of a pattern match operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Match,
    NoMatch,
}

impl MatchResult {
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Match)
    }
}

/// A compiled vanity pattern. Compile once, match against every candidate.
#[derive(Debug, Clone)]
pub struct Pattern {
    kind: PatternKind,
    value: String,
    /// Pre-parsed nibbles for zero-allocation matching (hex kinds only).
    nibbles: Vec<u8>,
    /// Compiled regex for the custom kind.
    regex: Option<Regex>,
}

/// Convert hex string to nibble array. Each char becomes one u8 (0..15).
fn hex_to_nibbles(hex: &str) -> Vec<u8> {
    hex.bytes()
        .map(|b| match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => 0,
        })
        .collect()
}

/// Convert 20-byte address to 40 nibbles on the stack (no heap allocation).
#[inline]
fn addr_to_nibbles(bytes: &[u8; 20]) -> [u8; 40] {
    let mut nibbles = [0u8; 40];
    for i in 0..20 {
        nibbles[i * 2] = bytes[i] >> 4;
        nibbles[i * 2 + 1] = bytes[i] & 0x0f;
    }
    nibbles
}

#[inline]
fn nibbles_start_with(haystack: &[u8; 40], needle: &[u8]) -> bool {
    needle.len() <= 40 && haystack[..needle.len()] == *needle
}

#[inline]
fn nibbles_end_with(haystack: &[u8; 40], needle: &[u8]) -> bool {
    needle.len() <= 40 && haystack[40 - needle.len()..] == *needle
}

/// True if the first `len` nibbles are all the same hex digit.
#[inline]
fn leading_run(haystack: &[u8; 40], len: usize) -> bool {
    len >= 1 && len <= 40 && haystack[1..len].iter().all(|&n| n == haystack[0])
}

/// True if the last `len` nibbles are all the same hex digit.
#[inline]
fn trailing_run(haystack: &[u8; 40], len: usize) -> bool {
    len >= 1 && len <= 40 && {
        let tail = &haystack[40 - len..];
        tail[1..].iter().all(|&n| n == tail[0])
    }
}

impl Pattern {
    /// Compiles a pattern. Hex kinds are normalized to lowercase and
    /// validated; the custom kind compiles its value as a case-insensitive
    /// regex.
    pub fn compile(kind: PatternKind, value: impl Into<String>) -> Result<Self, PatternError> {
        let value = value.into();
        if value.is_empty() {
            return Err(PatternError::EmptyPattern);
        }

        if kind == PatternKind::Custom {
            let regex = Regex::new(&format!("(?i){}", value))?;
            return Ok(Self {
                kind,
                value,
                nibbles: Vec::new(),
                regex: Some(regex),
            });
        }

        let value = value.to_lowercase();
        if !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PatternError::InvalidHexPattern(value));
        }
        let required = match kind {
            PatternKind::Prefix | PatternKind::Suffix => value.len(),
            // Dual-ended kinds constrain both ends of the address.
            _ => value.len() * 2,
        };
        if required > 40 {
            return Err(PatternError::PatternTooLong(value));
        }

        let nibbles = hex_to_nibbles(&value);
        Ok(Self {
            kind,
            value,
            nibbles,
            regex: None,
        })
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Zero-allocation matching on raw address bytes for the hex kinds; the
    /// custom kind searches its regex over the 0x-prefixed lowercase hex.
    #[inline]
    pub fn matches(&self, address: &Address) -> MatchResult {
        let matched = match self.kind {
            PatternKind::Custom => match &self.regex {
                Some(re) => re.is_match(&address.to_hex_prefixed()),
                None => false,
            },
            _ => {
                let nibbles = addr_to_nibbles(address.as_bytes());
                match self.kind {
                    PatternKind::Prefix => nibbles_start_with(&nibbles, &self.nibbles),
                    PatternKind::Suffix => nibbles_end_with(&nibbles, &self.nibbles),
                    PatternKind::Both => {
                        nibbles_start_with(&nibbles, &self.nibbles)
                            && nibbles_end_with(&nibbles, &self.nibbles)
                    }
                    PatternKind::RepeatingPrefix => {
                        leading_run(&nibbles, self.nibbles.len())
                            && nibbles_end_with(&nibbles, &self.nibbles)
                    }
                    PatternKind::RepeatingSuffix => {
                        nibbles_start_with(&nibbles, &self.nibbles)
                            && trailing_run(&nibbles, self.nibbles.len())
                    }
                    PatternKind::Custom => unreachable!(),
                }
            }
        };
        if matched {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }

    /// Expected number of attempts to find a match (hex kinds only; the
    /// custom kind's difficulty is unknown).
    pub fn estimated_difficulty(&self) -> u64 {
        let constrained = match self.kind {
            PatternKind::Custom => return 0,
            PatternKind::Prefix | PatternKind::Suffix => self.nibbles.len(),
            PatternKind::Both => self.nibbles.len() * 2,
            // The repeated digit is free to be any of the 16 values.
            PatternKind::RepeatingPrefix | PatternKind::RepeatingSuffix => {
                self.nibbles.len() * 2 - 1
            }
        };
        16u64.saturating_pow(constrained as u32)
    }

    pub fn difficulty_description(&self) -> String {
        if self.kind == PatternKind::Custom {
            return "Unknown (custom regex)".into();
        }
        match self.estimated_difficulty() {
            0..=1_000 => "Very Easy (< 1 second)".into(),
            1_001..=100_000 => "Easy (seconds)".into(),
            100_001..=10_000_000 => "Medium (minutes)".into(),
            10_000_001..=1_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}
