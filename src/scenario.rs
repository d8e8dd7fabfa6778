//! Scenario engine for what-if raise comparison
//!
//! Evaluates an ordered list of named raise scenarios against one share
//! baseline and exit valuation, producing a waterfall row per scenario.
//!
//! Every scenario is priced under one fixed convention — price per share
//! from the cap over the pre-money share count, ownership as share
//! fractions of the post-money total — regardless of how the primary SAFE
//! is configured. Rows are only meaningful relative to each other, so a
//! single convention keeps them comparable.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::sharemath;
use crate::terms::{CapTableScenario, ShareBaseline};

/// One row of the scenario waterfall.
///
/// `dilution_pct` here is the investor's share fraction of the post-money
/// total — a different metric from `CapTableResult::dilution_by_residual`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallRow {
    pub scenario: CapTableScenario,

    pub price_per_share: f64,
    pub investor_shares: f64,
    pub total_post_money_shares: f64,

    /// New shares as a percentage of the post-money total
    pub dilution_pct: f64,

    pub founder_ownership_pct: f64,
    pub investor_ownership_pct: f64,

    pub founder_payout: f64,
    pub investor_payout: f64,

    /// False when the scenario cannot be priced (zero cap or baseline).
    /// Invalid rows carry zeroed numerics so downstream totals stay finite.
    pub is_valid: bool,
}

impl WaterfallRow {
    fn invalid(scenario: CapTableScenario) -> Self {
        Self {
            scenario,
            price_per_share: 0.0,
            investor_shares: 0.0,
            total_post_money_shares: 0.0,
            dilution_pct: 0.0,
            founder_ownership_pct: 0.0,
            investor_ownership_pct: 0.0,
            founder_payout: 0.0,
            investor_payout: 0.0,
            is_valid: false,
        }
    }
}

/// Aggregate view over a waterfall run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterfallSummary {
    pub total_scenarios: usize,
    pub valid_scenarios: usize,
    pub best_founder_payout: f64,
    pub worst_founder_payout: f64,
    pub widest_dilution_pct: f64,
}

/// Pre-loaded engine for evaluating raise scenarios.
///
/// Holds the shared baseline and exit valuation once; each `run` evaluates
/// every scenario independently from its own inputs, with no accumulator
/// carried between iterations. Output order matches input order.
#[derive(Debug, Clone)]
pub struct ScenarioEngine {
    baseline: ShareBaseline,
    exit_valuation: f64,
}

impl ScenarioEngine {
    pub fn new(baseline: ShareBaseline, exit_valuation: f64) -> Self {
        Self {
            baseline,
            exit_valuation,
        }
    }

    pub fn exit_valuation(&self) -> f64 {
        self.exit_valuation
    }

    /// Evaluate one scenario in isolation
    pub fn evaluate(&self, scenario: &CapTableScenario) -> Result<WaterfallRow, EngineError> {
        self.baseline.validate()?;

        let pre_shares = self.baseline.total_pre_money_shares;
        if scenario.valuation_cap == 0.0 || pre_shares == 0.0 {
            return Ok(WaterfallRow::invalid(scenario.clone()));
        }

        let price_per_share = sharemath::price_per_share(scenario.valuation_cap, pre_shares)?;
        let investor_shares =
            sharemath::shares_for_investment(scenario.amount_raising, price_per_share)?;
        let total_post_money_shares = pre_shares + investor_shares;

        let founder_ownership_pct = sharemath::pro_rata_fraction(
            self.baseline.founder_shares(),
            total_post_money_shares,
        )? * 100.0;
        let investor_ownership_pct =
            sharemath::pro_rata_fraction(investor_shares, total_post_money_shares)? * 100.0;
        let dilution_pct = investor_ownership_pct;

        let founder_payout = sharemath::ensure_finite(
            founder_ownership_pct / 100.0 * self.exit_valuation,
            "evaluate: founder_payout",
        )?;
        let investor_payout = sharemath::ensure_finite(
            investor_ownership_pct / 100.0 * self.exit_valuation,
            "evaluate: investor_payout",
        )?;

        Ok(WaterfallRow {
            scenario: scenario.clone(),
            price_per_share,
            investor_shares,
            total_post_money_shares,
            dilution_pct,
            founder_ownership_pct,
            investor_ownership_pct,
            founder_payout,
            investor_payout,
            is_valid: true,
        })
    }

    /// Evaluate every scenario, preserving input order
    pub fn run(&self, scenarios: &[CapTableScenario]) -> Result<Vec<WaterfallRow>, EngineError> {
        scenarios.iter().map(|s| self.evaluate(s)).collect()
    }
}

/// Summarize a waterfall run. Invalid rows are counted but excluded from
/// the payout and dilution figures.
pub fn summarize(rows: &[WaterfallRow]) -> WaterfallSummary {
    let valid: Vec<&WaterfallRow> = rows.iter().filter(|r| r.is_valid).collect();

    let best_founder_payout = valid.iter().map(|r| r.founder_payout).fold(0.0, f64::max);
    let worst_founder_payout = if valid.is_empty() {
        0.0
    } else {
        valid
            .iter()
            .map(|r| r.founder_payout)
            .fold(f64::MAX, f64::min)
    };

    WaterfallSummary {
        total_scenarios: rows.len(),
        valid_scenarios: valid.len(),
        best_founder_payout,
        worst_founder_payout,
        widest_dilution_pct: valid.iter().map(|r| r.dilution_pct).fold(0.0, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario(id: &str, name: &str, amount: f64, cap: f64) -> CapTableScenario {
        CapTableScenario {
            id: id.to_string(),
            name: name.to_string(),
            amount_raising: amount,
            valuation_cap: cap,
        }
    }

    fn engine() -> ScenarioEngine {
        ScenarioEngine::new(ShareBaseline::new(10_000_000.0, 1_500_000.0), 25_000_000.0)
    }

    #[test]
    fn test_single_scenario_math() {
        // $500K at a $5M cap: $0.50/share, 1M new shares, 11M post
        let row = engine()
            .evaluate(&scenario("1", "Seed", 500_000.0, 5_000_000.0))
            .unwrap();

        assert!(row.is_valid);
        assert_relative_eq!(row.price_per_share, 0.5);
        assert_relative_eq!(row.investor_shares, 1_000_000.0);
        assert_relative_eq!(row.total_post_money_shares, 11_000_000.0);
        assert_relative_eq!(row.dilution_pct, 1.0 / 11.0 * 100.0, max_relative = 1e-9);
        assert_relative_eq!(
            row.founder_ownership_pct,
            8_500_000.0 / 11_000_000.0 * 100.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            row.founder_payout,
            8_500_000.0 / 11_000_000.0 * 25_000_000.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_lower_cap_means_more_dilution() {
        let engine = engine();
        let a = engine
            .evaluate(&scenario("a", "Low Cap", 1_000_000.0, 5_000_000.0))
            .unwrap();
        let b = engine
            .evaluate(&scenario("b", "High Cap", 1_000_000.0, 15_000_000.0))
            .unwrap();
        assert!(a.dilution_pct > b.dilution_pct);
    }

    #[test]
    fn test_output_order_matches_input_order() {
        let scenarios = vec![
            scenario("z", "Last Alphabetically", 500_000.0, 7_000_000.0),
            scenario("a", "First Alphabetically", 2_000_000.0, 15_000_000.0),
            scenario("m", "Middle", 100_000.0, 2_000_000.0),
        ];
        let rows = engine().run(&scenarios).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.scenario.id.as_str()).collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }

    #[test]
    fn test_scenarios_are_independent() {
        // Removing a scenario must not change any other row
        let engine = engine();
        let full = vec![
            scenario("1", "A", 500_000.0, 7_000_000.0),
            scenario("2", "B", 2_000_000.0, 15_000_000.0),
            scenario("3", "C", 100_000.0, 2_000_000.0),
        ];
        let rows_full = engine.run(&full).unwrap();

        let trimmed = vec![full[0].clone(), full[2].clone()];
        let rows_trimmed = engine.run(&trimmed).unwrap();

        assert_relative_eq!(rows_full[0].founder_payout, rows_trimmed[0].founder_payout);
        assert_relative_eq!(rows_full[2].founder_payout, rows_trimmed[1].founder_payout);
    }

    #[test]
    fn test_zero_cap_scenario_flagged_invalid() {
        let rows = engine()
            .run(&[
                scenario("1", "Broken", 500_000.0, 0.0),
                scenario("2", "Fine", 500_000.0, 5_000_000.0),
            ])
            .unwrap();

        assert!(!rows[0].is_valid);
        assert!(rows[1].is_valid);

        // Invalid rows must not poison totals with non-finite values
        let total: f64 = rows.iter().map(|r| r.founder_payout).sum();
        assert!(total.is_finite());
    }

    #[test]
    fn test_summary_skips_invalid_rows() {
        let rows = engine()
            .run(&[
                scenario("1", "Broken", 500_000.0, 0.0),
                scenario("2", "Small", 500_000.0, 5_000_000.0),
                scenario("3", "Big", 500_000.0, 20_000_000.0),
            ])
            .unwrap();
        let summary = summarize(&rows);

        assert_eq!(summary.total_scenarios, 3);
        assert_eq!(summary.valid_scenarios, 2);
        assert!(summary.best_founder_payout > summary.worst_founder_payout);
        assert!(summary.best_founder_payout.is_finite());
        assert_relative_eq!(
            summary.widest_dilution_pct,
            rows[1].dilution_pct,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_empty_run_summary_is_finite() {
        let summary = summarize(&[]);
        assert_eq!(summary.valid_scenarios, 0);
        assert!(summary.best_founder_payout.is_finite());
        assert!(summary.worst_founder_payout.is_finite());
    }
}
