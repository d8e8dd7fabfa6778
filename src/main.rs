//! Equity System CLI
//!
//! Command-line interface for running a SAFE conversion and scenario
//! waterfall against the standard deal preset

use equity_system::{
    captable::CapTableCalculator,
    scenario::{summarize, ScenarioEngine},
    sharemath, terms,
    vesting::{self, vested_position},
};
use std::fs::File;
use std::io::Write;

fn main() {
    env_logger::init();

    println!("Equity System v0.1.0");
    println!("====================\n");

    // Standard deal preset: $500K @ $5M post-money cap over 10M shares
    let package = terms::templates::yc_standard();

    println!("SAFE: {}", package.label);
    println!("  Investor: {}", package.safe.investor_name);
    println!("  Raise: ${:.0}", package.safe.amount_raising);
    println!("  Cap: ${:.0} ({})", package.safe.valuation_cap,
        if package.safe.post_money { "post-money" } else { "pre-money" });
    println!("  Pre-money shares: {:.0}", package.baseline.total_pre_money_shares);
    println!("  Option pool: {:.0}", package.baseline.option_pool_shares);
    println!();

    // Cap table after conversion
    let calculator = CapTableCalculator::new(package.baseline);
    let outcome = calculator.convert(&package.safe).expect("baseline is valid");

    match outcome.computed() {
        Some(table) => {
            println!("Post-Conversion Cap Table:");
            println!("{:<24} {:>14} {:>10}", "Holder", "Shares", "Ownership");
            println!("{}", "-".repeat(50));
            println!("{:<24} {:>14.0} {:>9.2}%", "Founders",
                package.baseline.founder_shares(), table.founder_pct);
            println!("{:<24} {:>14.0} {:>9.2}%", "Option Pool (Reserved)",
                package.baseline.option_pool_shares, table.pool_pct);
            println!("{:<24} {:>14.2} {:>9.2}%", "SAFE Investors",
                table.investor_shares, table.investor_pct);
            println!("{:<24} {:>14.2} {:>9.2}%", "Total",
                table.total_post_money_shares,
                table.founder_pct + table.pool_pct + table.investor_pct);
            println!();
            println!("  Price per share: ${}", sharemath::round_display(table.price_per_share, 4));
            println!("  Dilution impact: {:.2}%", table.dilution_by_residual());
        }
        None => {
            println!("Configure the raise amount and valuation cap to view the cap table.");
        }
    }

    // Vesting milestones for the grant in the preset
    let grant = &package.vesting;
    println!("\nVesting ({}, {} shares, {}mo / {}mo cliff):",
        grant.recipient, grant.total_shares, grant.vesting_months, grant.cliff_months);
    for months in [0, grant.cliff_months - 1, grant.cliff_months, 24, 36, grant.vesting_months] {
        let position = vested_position(grant, months).expect("preset grant is valid");
        println!("  Month {:>3}: {:>12.0} shares ({:>6.2}%){}",
            months,
            position.vested_shares,
            position.vested_pct,
            if months == grant.cliff_months { "  <- cliff" } else { "" });
    }
    println!("  Double-trigger window: {} months",
        vesting::DEFAULT_DOUBLE_TRIGGER_WINDOW_MONTHS);

    // Scenario waterfall at the preset exit valuation
    let engine = ScenarioEngine::new(package.baseline, package.exit_valuation);
    let rows = engine.run(&package.scenarios).expect("preset scenarios are valid");

    println!("\nScenario Waterfall (exit at ${:.0}):", package.exit_valuation);
    println!("{:<18} {:>12} {:>12} {:>10} {:>14} {:>14}",
        "Scenario", "Raise", "Cap", "Dilution", "Founder $", "Investor $");
    println!("{}", "-".repeat(86));
    for row in &rows {
        if row.is_valid {
            println!("{:<18} {:>12.0} {:>12.0} {:>9.2}% {:>14.0} {:>14.0}",
                row.scenario.name,
                row.scenario.amount_raising,
                row.scenario.valuation_cap,
                row.dilution_pct,
                row.founder_payout,
                row.investor_payout);
        } else {
            println!("{:<18} {:>12.0} {:>12.0} {:>10} {:>14} {:>14}",
                row.scenario.name,
                row.scenario.amount_raising,
                row.scenario.valuation_cap,
                "invalid", "-", "-");
        }
    }

    // Write full waterfall to CSV
    let csv_path = "waterfall_output.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");

    writeln!(file, "ScenarioID,Name,AmountRaising,ValuationCap,PricePerShare,InvestorShares,TotalPostMoneyShares,DilutionPct,FounderOwnershipPct,InvestorOwnershipPct,FounderPayout,InvestorPayout,IsValid").unwrap();
    for row in &rows {
        writeln!(file, "{},{},{:.2},{:.2},{:.6},{:.2},{:.2},{:.6},{:.6},{:.6},{:.2},{:.2},{}",
            row.scenario.id,
            row.scenario.name,
            row.scenario.amount_raising,
            row.scenario.valuation_cap,
            row.price_per_share,
            row.investor_shares,
            row.total_post_money_shares,
            row.dilution_pct,
            row.founder_ownership_pct,
            row.investor_ownership_pct,
            row.founder_payout,
            row.investor_payout,
            row.is_valid,
        ).unwrap();
    }

    println!("\nFull waterfall written to: {}", csv_path);

    // Summary
    let summary = summarize(&rows);
    println!("\nSummary:");
    println!("  Scenarios: {} ({} valid)", summary.total_scenarios, summary.valid_scenarios);
    println!("  Best founder payout: ${:.0}", summary.best_founder_payout);
    println!("  Worst founder payout: ${:.0}", summary.worst_founder_payout);
    println!("  Widest dilution: {:.2}%", summary.widest_dilution_pct);
}
