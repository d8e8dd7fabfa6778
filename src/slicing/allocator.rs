//! Weighted contribution ledger to ownership percentages

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::terms::ContributionEntry;

/// Equity split derived from the contribution ledger.
///
/// Every requested member appears in both maps, including members with no
/// contributions (at zero). When the whole ledger sums to zero the split
/// is all zeros and `all_zero` is set — percentages are never NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlicingResult {
    pub totals_by_member: HashMap<String, f64>,
    pub percentages_by_member: HashMap<String, f64>,
    pub total_value: f64,
    pub all_zero: bool,
}

/// Allocate ownership percentages from risk-adjusted contributions.
///
/// Each entry contributes `value * multiplier` to its member's total;
/// percentages are each member's share of the grand total. Summation is
/// commutative, so reordering the ledger never changes the result.
///
/// Entries referencing members outside `member_ids` are orphans (their
/// member was removed without a ledger cascade) and are skipped.
pub fn allocate(
    entries: &[ContributionEntry],
    member_ids: &[String],
) -> Result<SlicingResult, EngineError> {
    for entry in entries {
        entry.validate()?;
    }

    let mut totals_by_member: HashMap<String, f64> = member_ids
        .iter()
        .map(|id| (id.clone(), 0.0))
        .collect();
    let mut total_value = 0.0;
    let mut orphaned = 0usize;

    for entry in entries {
        match totals_by_member.get_mut(entry.member_id.as_str()) {
            Some(total) => {
                let adjusted = entry.adjusted_value();
                *total += adjusted;
                total_value += adjusted;
            }
            None => orphaned += 1,
        }
    }

    if orphaned > 0 {
        log::debug!("skipped {} orphaned ledger entries", orphaned);
    }

    let all_zero = total_value == 0.0;
    let percentages_by_member = totals_by_member
        .iter()
        .map(|(id, &total)| {
            let pct = if all_zero {
                0.0
            } else {
                total / total_value * 100.0
            };
            (id.clone(), pct)
        })
        .collect();

    Ok(SlicingResult {
        totals_by_member,
        percentages_by_member,
        total_value,
        all_zero,
    })
}

/// Drop ledger entries belonging to removed members.
///
/// The cascade on member deletion is owned by the surrounding system;
/// this is the filter it applies.
pub fn retain_members(
    entries: Vec<ContributionEntry>,
    member_ids: &[String],
) -> Vec<ContributionEntry> {
    let known: HashSet<&str> = member_ids.iter().map(String::as_str).collect();
    entries
        .into_iter()
        .filter(|e| known.contains(e.member_id.as_str()))
        .collect()
}
