//! Preset SAFE packages for quick simulation
//!
//! In-memory equivalents of the standard deal templates offered by the
//! form layer, usable without a persisted document.

use super::data::{
    AccelerationPolicy, CapTableScenario, SafeTerms, ShareBaseline, VestingTerms,
};

/// A complete preset: terms, baseline, vesting grant, and comparison
/// scenarios with an exit valuation for waterfall analysis
#[derive(Debug, Clone)]
pub struct SafePackage {
    pub label: &'static str,
    pub safe: SafeTerms,
    pub baseline: ShareBaseline,
    pub vesting: VestingTerms,
    pub scenarios: Vec<CapTableScenario>,
    pub exit_valuation: f64,
}

fn scenario(id: &str, name: &str, amount_raising: f64, valuation_cap: f64) -> CapTableScenario {
    CapTableScenario {
        id: id.to_string(),
        name: name.to_string(),
        amount_raising,
        valuation_cap,
    }
}

/// YC standard deal: $500K on a $5M post-money cap
pub fn yc_standard() -> SafePackage {
    SafePackage {
        label: "YC Standard ($500K @ $5M Cap)",
        safe: SafeTerms {
            amount_raising: 500_000.0,
            valuation_cap: 5_000_000.0,
            discount_rate: 0.0,
            post_money: true,
            investor_name: "Y Combinator".to_string(),
            rep_name: "Founder Rep".to_string(),
            state_of_incorporation: "Delaware".to_string(),
            ..Default::default()
        },
        baseline: ShareBaseline::standard(10_000_000.0),
        vesting: VestingTerms {
            recipient: "Lead Developer".to_string(),
            total_shares: 2_000_000.0,
            vesting_months: 48,
            cliff_months: 12,
            acceleration: AccelerationPolicy::DoubleTrigger,
        },
        scenarios: vec![
            scenario("1", "Seed Extension", 500_000.0, 7_000_000.0),
            scenario("2", "Series A Target", 2_000_000.0, 15_000_000.0),
        ],
        exit_valuation: 25_000_000.0,
    }
}

/// Seed round: $1M on a $10M post-money cap with a 20% discount
pub fn seed_round() -> SafePackage {
    SafePackage {
        label: "Seed Round ($1M @ $10M Cap)",
        safe: SafeTerms {
            amount_raising: 1_000_000.0,
            valuation_cap: 10_000_000.0,
            discount_rate: 20.0,
            post_money: true,
            investor_name: "Venture Syndicate".to_string(),
            rep_name: "CEO".to_string(),
            state_of_incorporation: "Delaware".to_string(),
            ..Default::default()
        },
        baseline: ShareBaseline::standard(8_000_000.0),
        vesting: VestingTerms {
            recipient: "Founding Team Member".to_string(),
            total_shares: 1_500_000.0,
            vesting_months: 48,
            cliff_months: 12,
            acceleration: AccelerationPolicy::DoubleTrigger,
        },
        scenarios: vec![
            scenario("1", "Upside Exit", 1_000_000.0, 15_000_000.0),
            scenario("2", "Market Standard", 1_000_000.0, 10_000_000.0),
        ],
        exit_valuation: 50_000_000.0,
    }
}

/// Friends & family: $100K on a $2M pre-money cap
pub fn friends_and_family() -> SafePackage {
    SafePackage {
        label: "Friends & Family ($100K @ $2M)",
        safe: SafeTerms {
            amount_raising: 100_000.0,
            valuation_cap: 2_000_000.0,
            discount_rate: 20.0,
            post_money: false,
            investor_name: "Family Holding".to_string(),
            rep_name: "Founder".to_string(),
            state_of_incorporation: "California".to_string(),
            ..Default::default()
        },
        baseline: ShareBaseline::standard(10_000_000.0),
        vesting: VestingTerms {
            recipient: "Family Member".to_string(),
            total_shares: 500_000.0,
            vesting_months: 24,
            cliff_months: 6,
            acceleration: AccelerationPolicy::None,
        },
        scenarios: vec![scenario("1", "Early Exit", 100_000.0, 2_000_000.0)],
        exit_valuation: 5_000_000.0,
    }
}

/// All presets in menu order
pub fn all() -> Vec<SafePackage> {
    vec![yc_standard(), seed_round(), friends_and_family()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_internally_valid() {
        for package in all() {
            assert!(package.baseline.validate().is_ok(), "{}", package.label);
            assert!(package.vesting.validate().is_ok(), "{}", package.label);
            assert!(!package.safe.is_incomplete(), "{}", package.label);
            assert!(package.exit_valuation > 0.0);
        }
    }

    #[test]
    fn test_scenario_ids_unique_within_preset() {
        for package in all() {
            let mut ids: Vec<_> = package.scenarios.iter().map(|s| s.id.clone()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), package.scenarios.len(), "{}", package.label);
        }
    }
}
