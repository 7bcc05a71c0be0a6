//! Engine error taxonomy
//!
//! The engine has no I/O, so every error here is a configuration-contract
//! violation detected at load time. Builders and the tick path never fail.

use thiserror::Error;

/// Errors raised while validating or loading engine configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Distribution table '{table}' decreases at slot {index}: {previous} -> {current}")]
    NonMonotonicTable {
        table: String,
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("Distribution table '{table}' has negative count {value} at slot {index}")]
    NegativeCount {
        table: String,
        index: usize,
        value: i64,
    },

    #[error("Distribution table '{table}' has {len} slots but its business window needs {required}")]
    TableTooShort {
        table: String,
        len: usize,
        required: usize,
    },

    #[error("Category split '{table}' sums to {sum}, expected 1.0")]
    SplitSumMismatch { table: String, sum: f64 },

    #[error("Invalid business window {start}..={end}")]
    InvalidWindow { start: u32, end: u32 },

    #[error("Phase table is empty")]
    EmptyPhaseTable,

    #[error("Phase {id} has non-positive width: [{start}, {end})")]
    ZeroWidthPhase { id: u8, start: f64, end: f64 },

    #[error("Phases {previous} and {next} are not contiguous: {previous_end} != {next_start}")]
    PhaseDiscontinuity {
        previous: u8,
        next: u8,
        previous_end: f64,
        next_start: f64,
    },

    #[error("Phase ids must be 1..=n in order, found {found} at position {position}")]
    PhaseIdOrder { position: usize, found: u8 },

    #[error("Invalid sampling parameter '{name}': {value}")]
    InvalidParameter { name: String, value: f64 },

    #[error("Time multiplier must be finite and positive, got {0}")]
    InvalidTimeMultiplier(f64),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Config serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::ConfigParse(err.to_string())
    }
}
