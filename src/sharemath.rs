//! Share-count primitives shared by every calculator
//!
//! Pure functions over f64 share counts and money amounts. All division is
//! guarded: a zero denominator returns a typed error instead of infinity,
//! and every result is checked for finiteness before it leaves the module.

use crate::error::EngineError;

/// Relative tolerance for percentage-sum invariants (percentages of a cap
/// table must total 100 within this bound).
pub const PCT_TOLERANCE: f64 = 1e-6;

/// Price per share implied by a valuation over a share count.
///
/// Errors with `DivisionByZero` when `total_shares` is zero — an
/// unconfigured baseline, not a computable state.
pub fn price_per_share(valuation_cap: f64, total_shares: f64) -> Result<f64, EngineError> {
    if total_shares == 0.0 {
        return Err(EngineError::DivisionByZero {
            context: "price_per_share: total_shares is zero",
        });
    }
    ensure_finite(valuation_cap / total_shares, "price_per_share")
}

/// Number of shares an investment buys at a given price per share.
pub fn shares_for_investment(amount: f64, price_per_share: f64) -> Result<f64, EngineError> {
    if price_per_share == 0.0 {
        return Err(EngineError::DivisionByZero {
            context: "shares_for_investment: price_per_share is zero",
        });
    }
    ensure_finite(amount / price_per_share, "shares_for_investment")
}

/// Fraction of the post-money company a holding represents.
///
/// Used for the pro-rata participation figure on SAFEs carrying pro-rata
/// rights, and for share-fraction dilution in scenario rows.
pub fn pro_rata_fraction(shares: f64, total_post_money_shares: f64) -> Result<f64, EngineError> {
    if total_post_money_shares == 0.0 {
        return Err(EngineError::DivisionByZero {
            context: "pro_rata_fraction: total_post_money_shares is zero",
        });
    }
    ensure_finite(shares / total_post_money_shares, "pro_rata_fraction")
}

/// Round half-up at display precision.
///
/// Calculators keep full f64 precision internally; rounding happens only
/// when a value is formatted for a report or document.
pub fn round_display(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Guard against NaN/infinity escaping a calculator.
pub fn ensure_finite(value: f64, context: &'static str) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFiniteResult { context })
    }
}
