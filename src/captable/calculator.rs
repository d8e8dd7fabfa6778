//! SAFE conversion math for pre-money and post-money agreements

use crate::error::EngineError;
use crate::sharemath;
use crate::terms::{SafeTerms, ShareBaseline};

use super::types::{CapTableOutcome, CapTableResult};

/// Converts a SAFE term set against a share baseline.
///
/// Stateless beyond the baseline it was built with; every call recomputes
/// from its inputs, so calls may run concurrently without coordination.
#[derive(Debug, Clone)]
pub struct CapTableCalculator {
    baseline: ShareBaseline,
}

impl CapTableCalculator {
    pub fn new(baseline: ShareBaseline) -> Self {
        Self { baseline }
    }

    pub fn baseline(&self) -> &ShareBaseline {
        &self.baseline
    }

    /// Convert the SAFE into a post-round ownership table.
    ///
    /// The two money modes are not algebraically equivalent:
    ///
    /// * **Post-money** fixes the investor's percentage at
    ///   `amount / cap` up front; founders and pool are re-scaled into the
    ///   remainder, preserving their ratio from the baseline.
    /// * **Pre-money** treats the cap as the pre-money value and dilutes
    ///   founders and pool proportionally by the newly issued shares.
    ///
    /// Incomplete terms (zero raise or cap) and an unconfigured baseline
    /// (zero shares) return `Incomplete`; an oversized option pool is a
    /// validation error.
    pub fn convert(&self, terms: &SafeTerms) -> Result<CapTableOutcome, EngineError> {
        self.baseline.validate()?;

        if terms.is_incomplete() || self.baseline.total_pre_money_shares == 0.0 {
            return Ok(CapTableOutcome::Incomplete);
        }

        let amount = terms.amount_raising;
        let cap = terms.valuation_cap;
        let pre_shares = self.baseline.total_pre_money_shares;

        let price_per_share = sharemath::price_per_share(cap, pre_shares)?;
        let investor_shares = sharemath::shares_for_investment(amount, price_per_share)?;
        let total_post_money_shares = pre_shares + investor_shares;

        let (founder_pct, pool_pct, investor_pct) = if terms.post_money {
            // Investor percentage comes straight off the cap; the existing
            // holders split the remainder in their baseline ratio.
            let investor_pct = amount / cap * 100.0;
            let founder_and_pool_pct = 100.0 - investor_pct;
            let founder_ratio = self.baseline.founder_shares() / pre_shares;
            let pool_ratio = self.baseline.option_pool_shares / pre_shares;
            (
                founder_and_pool_pct * founder_ratio,
                founder_and_pool_pct * pool_ratio,
                investor_pct,
            )
        } else {
            // Straight share fractions of the enlarged pool.
            (
                self.baseline.founder_shares() / total_post_money_shares * 100.0,
                self.baseline.option_pool_shares / total_post_money_shares * 100.0,
                investor_shares / total_post_money_shares * 100.0,
            )
        };

        let result = CapTableResult {
            price_per_share,
            investor_shares,
            total_post_money_shares: sharemath::ensure_finite(
                total_post_money_shares,
                "convert: total_post_money_shares",
            )?,
            founder_pct: sharemath::ensure_finite(founder_pct, "convert: founder_pct")?,
            pool_pct: sharemath::ensure_finite(pool_pct, "convert: pool_pct")?,
            investor_pct: sharemath::ensure_finite(investor_pct, "convert: investor_pct")?,
        };

        Ok(CapTableOutcome::Computed(result))
    }
}
