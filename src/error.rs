//! Typed errors for the equity calculation engine
//!
//! Validation failures surface as `Result` values so callers can render
//! them directly; nothing in the library panics on bad user input.

use thiserror::Error;

/// Errors produced by the calculators and loaders
#[derive(Debug, Error)]
pub enum EngineError {
    /// Required monetary fields are zero or unset. On the cap table path
    /// this is normally expressed as `CapTableOutcome::Incomplete`; loaders
    /// surface it when a document has no usable terms at all.
    #[error("required monetary fields are zero or unset; configure the raise amount and valuation cap")]
    IncompleteInput,

    /// Option pool larger than the pre-money total. Rejected, never clamped.
    #[error("option pool of {pool} shares exceeds the pre-money total of {total} shares")]
    InvalidBaseline { pool: f64, total: f64 },

    /// Cliff beyond the schedule, or a zero-length schedule.
    #[error("cliff of {cliff} months does not fit a {vesting}-month vesting schedule")]
    InvalidVestingTerms { cliff: u32, vesting: u32 },

    /// Contribution entry with a non-positive multiplier or negative value.
    #[error("contribution {id}: {reason}")]
    InvalidContribution { id: String, reason: String },

    /// Division by a zero share count. Validation should prevent this;
    /// the guard exists so no calculator ever emits NaN or infinity.
    #[error("division by zero in {context}")]
    DivisionByZero { context: &'static str },

    /// A calculator produced NaN or infinity. Internal invariant violation,
    /// not a user-facing state.
    #[error("non-finite result in {context}")]
    NonFiniteResult { context: &'static str },

    /// Malformed JSON in a persisted document field.
    #[error("failed to parse document field: {0}")]
    Parse(#[from] serde_json::Error),

    /// Malformed contribution ledger CSV.
    #[error("failed to read contribution ledger: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_inputs() {
        let err = EngineError::InvalidBaseline {
            pool: 1_500_000.0,
            total: 1_000_000.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("1500000"));
        assert!(msg.contains("exceeds"));

        let err = EngineError::InvalidVestingTerms { cliff: 60, vesting: 48 };
        assert!(err.to_string().contains("60"));
    }
}
