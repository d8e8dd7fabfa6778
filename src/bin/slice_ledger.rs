//! Compute the slicing-pie equity split from a contribution ledger CSV

use anyhow::{Context, Result};
use clap::Parser;
use equity_system::{slicing, terms::load_ledger};
use std::collections::BTreeSet;

#[derive(Debug, Parser)]
#[command(about = "Contribution-weighted equity split from a ledger CSV")]
struct Args {
    /// Contribution ledger CSV (ID,MemberID,Type,Description,Value,Multiplier,Date)
    ledger: String,

    /// Comma-separated member ids; defaults to every member in the ledger
    #[arg(long)]
    members: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let entries = load_ledger(&args.ledger)
        .with_context(|| format!("failed to load ledger from {}", args.ledger))?;
    println!("Loaded {} contributions from {}", entries.len(), args.ledger);

    let member_ids: Vec<String> = match &args.members {
        Some(list) => list.split(',').map(|s| s.trim().to_string()).collect(),
        None => {
            let distinct: BTreeSet<String> =
                entries.iter().map(|e| e.member_id.clone()).collect();
            distinct.into_iter().collect()
        }
    };

    let result = slicing::allocate(&entries, &member_ids)?;

    if result.all_zero {
        println!("\nLedger totals to zero; no equity to allocate yet.");
        return Ok(());
    }

    // Largest slice first
    let mut split: Vec<(&String, f64)> = result
        .percentages_by_member
        .iter()
        .map(|(id, &pct)| (id, pct))
        .collect();
    split.sort_by(|a, b| b.1.partial_cmp(&a.1).expect("percentages are finite"));

    println!("\nEquity Split (total adjusted value ${:.2}):", result.total_value);
    println!("{:<20} {:>16} {:>10} {:>8}", "Member", "Adjusted Value", "Equity", "Entries");
    println!("{}", "-".repeat(58));
    for (member_id, pct) in &split {
        let entry_count = entries.iter().filter(|e| &e.member_id == *member_id).count();
        let latest = entries
            .iter()
            .filter(|e| &e.member_id == *member_id)
            .filter_map(|e| e.date())
            .max();
        let latest_str = latest
            .map(|d| format!("  (last: {})", d.format("%Y-%m-%d")))
            .unwrap_or_default();
        println!(
            "{:<20} {:>16.2} {:>9.2}% {:>8}{}",
            member_id, result.totals_by_member[*member_id], pct, entry_count, latest_str
        );
    }

    let total_pct: f64 = result.percentages_by_member.values().sum();
    println!("{}", "-".repeat(58));
    println!("{:<20} {:>16.2} {:>9.2}%", "Total", result.total_value, total_pct);

    Ok(())
}
