//! Sweep exit valuations across every raise scenario in a project
//!
//! Outputs one waterfall row per (exit valuation, scenario) pair for
//! sensitivity analysis of founder and investor payouts.

use anyhow::{Context, Result};
use clap::Parser;
use equity_system::{
    scenario::{ScenarioEngine, WaterfallRow},
    terms::{self, load_project},
};
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(about = "Exit-valuation sweep over cap table scenarios")]
struct Args {
    /// Persisted project JSON; uses the standard preset when omitted
    #[arg(long)]
    project: Option<String>,

    /// Lowest exit valuation in the sweep
    #[arg(long, default_value_t = 5_000_000.0)]
    exit_min: f64,

    /// Highest exit valuation in the sweep
    #[arg(long, default_value_t = 100_000_000.0)]
    exit_max: f64,

    /// Number of exit valuations to evaluate
    #[arg(long, default_value_t = 20)]
    steps: usize,

    /// Output CSV path
    #[arg(long, default_value = "scenario_sweep_output.csv")]
    output: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();

    let (baseline, scenarios) = match &args.project {
        Some(path) => {
            let inputs = load_project(path)
                .with_context(|| format!("failed to load project from {}", path))?;
            println!("Loaded {} scenarios from {}", inputs.scenarios.len(), path);
            (inputs.baseline, inputs.scenarios)
        }
        None => {
            let package = terms::templates::yc_standard();
            println!("No project given; using preset: {}", package.label);
            (package.baseline, package.scenarios)
        }
    };

    anyhow::ensure!(args.steps >= 2, "need at least 2 sweep steps");
    anyhow::ensure!(!scenarios.is_empty(), "project has no scenarios to compare");

    let exits: Vec<f64> = (0..args.steps)
        .map(|i| {
            args.exit_min
                + (args.exit_max - args.exit_min) * i as f64 / (args.steps - 1) as f64
        })
        .collect();

    println!("Sweeping {} exit valuations x {} scenarios...", exits.len(), scenarios.len());
    let sweep_start = Instant::now();

    // Each exit valuation is independent; evaluate them in parallel
    let results: Vec<(f64, Vec<WaterfallRow>)> = exits
        .par_iter()
        .map(|&exit_valuation| {
            let engine = ScenarioEngine::new(baseline, exit_valuation);
            let rows = engine.run(&scenarios)?;
            Ok::<_, equity_system::EngineError>((exit_valuation, rows))
        })
        .collect::<Result<_, _>>()?;

    println!("Sweep complete in {:?}", sweep_start.elapsed());

    let mut file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output))?;
    writeln!(
        file,
        "ExitValuation,ScenarioID,Name,AmountRaising,ValuationCap,DilutionPct,FounderOwnershipPct,FounderPayout,InvestorPayout,IsValid"
    )?;

    for (exit_valuation, rows) in &results {
        for row in rows {
            writeln!(
                file,
                "{:.2},{},{},{:.2},{:.2},{:.6},{:.6},{:.2},{:.2},{}",
                exit_valuation,
                row.scenario.id,
                row.scenario.name,
                row.scenario.amount_raising,
                row.scenario.valuation_cap,
                row.dilution_pct,
                row.founder_ownership_pct,
                row.founder_payout,
                row.investor_payout,
                row.is_valid,
            )?;
        }
    }

    println!("Output written to {}", args.output);

    // Per-scenario spread at the sweep endpoints
    println!("\nFounder payout by scenario:");
    if let (Some((lo_exit, lo_rows)), Some((hi_exit, hi_rows))) =
        (results.first(), results.last())
    {
        for (lo, hi) in lo_rows.iter().zip(hi_rows.iter()) {
            if lo.is_valid {
                println!(
                    "  {:<20} ${:>14.0} (exit ${:.0})  ->  ${:>14.0} (exit ${:.0})",
                    lo.scenario.name, lo.founder_payout, lo_exit, hi.founder_payout, hi_exit
                );
            } else {
                println!("  {:<20} invalid (zero valuation cap)", lo.scenario.name);
            }
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
