//! Pattern matching for 20-byte addresses (hex nibbles).

mod pattern;

pub use pattern::{MatchResult, Pattern, PatternError, PatternKind};
