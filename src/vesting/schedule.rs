//! Cliff + linear monthly vesting math

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::terms::VestingTerms;

/// Vested state of a grant at a point in time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestedPosition {
    pub vested_shares: f64,
    pub vested_pct: f64,
    pub is_cliff_reached: bool,
}

/// One month of the vesting schedule table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestingScheduleRow {
    pub month: u32,
    pub vested_shares: f64,
    pub vested_pct: f64,
    /// Shares that vested in this month (the cliff chunk lands atomically)
    pub newly_vested: f64,
}

/// Vested position after `months_elapsed` months of service.
///
/// Nothing vests before the cliff. At the cliff month the accrued chunk
/// (`total * cliff / vesting`) vests atomically; thereafter vesting is
/// linear per month until the grant is fully vested at `vesting_months`.
pub fn vested_position(
    terms: &VestingTerms,
    months_elapsed: u32,
) -> Result<VestedPosition, EngineError> {
    terms.validate()?;

    let vested_shares = if months_elapsed < terms.cliff_months {
        0.0
    } else if months_elapsed >= terms.vesting_months {
        terms.total_shares
    } else {
        terms.total_shares * months_elapsed as f64 / terms.vesting_months as f64
    };

    // A zero-share grant vests trivially at 0%, never NaN
    let vested_pct = if terms.total_shares == 0.0 {
        0.0
    } else {
        vested_shares / terms.total_shares * 100.0
    };

    Ok(VestedPosition {
        vested_shares,
        vested_pct,
        is_cliff_reached: months_elapsed >= terms.cliff_months,
    })
}

/// Full month-by-month schedule, months 0 through `vesting_months`.
///
/// Used to render the vesting exhibit of a grant document.
pub fn schedule(terms: &VestingTerms) -> Result<Vec<VestingScheduleRow>, EngineError> {
    terms.validate()?;

    let mut rows = Vec::with_capacity(terms.vesting_months as usize + 1);
    let mut prior_vested = 0.0;

    for month in 0..=terms.vesting_months {
        let position = vested_position(terms, month)?;
        rows.push(VestingScheduleRow {
            month,
            vested_shares: position.vested_shares,
            vested_pct: position.vested_pct,
            newly_vested: position.vested_shares - prior_vested,
        });
        prior_vested = position.vested_shares;
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::AccelerationPolicy;
    use approx::assert_relative_eq;

    fn standard_grant() -> VestingTerms {
        VestingTerms {
            recipient: "Lead Developer".to_string(),
            total_shares: 2_000_000.0,
            vesting_months: 48,
            cliff_months: 12,
            acceleration: AccelerationPolicy::DoubleTrigger,
        }
    }

    #[test]
    fn test_nothing_vests_before_cliff() {
        let terms = standard_grant();
        for month in [0, 1, 6, 11] {
            let position = vested_position(&terms, month).unwrap();
            assert_eq!(position.vested_shares, 0.0, "month {}", month);
            assert!(!position.is_cliff_reached);
        }
    }

    #[test]
    fn test_cliff_chunk_vests_atomically() {
        // 2M shares / 48 months, 12-month cliff: 500K (25%) at the cliff
        let position = vested_position(&standard_grant(), 12).unwrap();
        assert_relative_eq!(position.vested_shares, 500_000.0);
        assert_relative_eq!(position.vested_pct, 25.0);
        assert!(position.is_cliff_reached);
    }

    #[test]
    fn test_linear_vesting_after_cliff() {
        let terms = standard_grant();
        let at_24 = vested_position(&terms, 24).unwrap();
        assert_relative_eq!(at_24.vested_shares, 1_000_000.0);

        let at_36 = vested_position(&terms, 36).unwrap();
        assert_relative_eq!(at_36.vested_shares, 1_500_000.0);
    }

    #[test]
    fn test_fully_vested_at_and_past_term() {
        let terms = standard_grant();
        for month in [48, 49, 60, 1000] {
            let position = vested_position(&terms, month).unwrap();
            assert_relative_eq!(position.vested_shares, 2_000_000.0);
            assert_relative_eq!(position.vested_pct, 100.0);
        }
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let mut terms = standard_grant();
        terms.cliff_months = 60;
        assert!(vested_position(&terms, 12).is_err());
    }

    #[test]
    fn test_zero_share_grant_has_zero_pct_not_nan() {
        let mut terms = standard_grant();
        terms.total_shares = 0.0;
        let position = vested_position(&terms, 24).unwrap();
        assert_eq!(position.vested_pct, 0.0);
        assert!(position.vested_pct.is_finite());
    }

    #[test]
    fn test_schedule_table() {
        let rows = schedule(&standard_grant()).unwrap();
        assert_eq!(rows.len(), 49); // months 0..=48

        // Cliff month carries the whole accrued chunk
        assert_relative_eq!(rows[12].newly_vested, 500_000.0);
        assert_relative_eq!(rows[11].vested_shares, 0.0);

        // Post-cliff months vest 1/48 each
        assert_relative_eq!(rows[13].newly_vested, 2_000_000.0 / 48.0, max_relative = 1e-9);

        // Table ends fully vested
        assert_relative_eq!(rows[48].vested_shares, 2_000_000.0);
        let total_newly: f64 = rows.iter().map(|r| r.newly_vested).sum();
        assert_relative_eq!(total_newly, 2_000_000.0, max_relative = 1e-9);
    }
}
