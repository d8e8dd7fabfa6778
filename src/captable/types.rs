//! Cap table output records

use serde::{Deserialize, Serialize};

/// Ownership table after a single SAFE converts.
///
/// Percentages total 100 within 1e-6 relative tolerance; share counts are
/// fractional (conversion rarely lands on whole shares).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapTableResult {
    /// Effective price per share implied by the cap
    pub price_per_share: f64,

    /// Shares issued to the SAFE investor on conversion
    pub investor_shares: f64,

    /// Fully-diluted share count after conversion
    pub total_post_money_shares: f64,

    pub founder_pct: f64,
    pub pool_pct: f64,
    pub investor_pct: f64,
}

impl CapTableResult {
    /// Dilution as the residual after founder and pool ownership.
    ///
    /// This is one of two distinct dilution metrics: scenario rows report
    /// dilution as the investor's share fraction instead
    /// (`WaterfallRow::dilution_pct`). The two agree in pre-money mode and
    /// differ in post-money mode; they are intentionally not unified.
    pub fn dilution_by_residual(&self) -> f64 {
        100.0 - self.founder_pct - self.pool_pct
    }
}

/// Result of attempting a conversion.
///
/// `Incomplete` is a normal, expected state while the raise amount or cap
/// is still unset — callers render a prompt-to-configure view, not an
/// error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CapTableOutcome {
    Computed(CapTableResult),
    Incomplete,
}

impl CapTableOutcome {
    pub fn is_incomplete(&self) -> bool {
        matches!(self, CapTableOutcome::Incomplete)
    }

    /// The computed table, if the terms were complete
    pub fn computed(&self) -> Option<&CapTableResult> {
        match self {
            CapTableOutcome::Computed(result) => Some(result),
            CapTableOutcome::Incomplete => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let outcome = CapTableOutcome::Incomplete;
        assert!(outcome.is_incomplete());
        assert!(outcome.computed().is_none());
    }

    #[test]
    fn test_dilution_by_residual() {
        let result = CapTableResult {
            price_per_share: 0.5,
            investor_shares: 1_000_000.0,
            total_post_money_shares: 11_000_000.0,
            founder_pct: 76.5,
            pool_pct: 13.5,
            investor_pct: 10.0,
        };
        assert!((result.dilution_by_residual() - 10.0).abs() < 1e-9);
    }
}
