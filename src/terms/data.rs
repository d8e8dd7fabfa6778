//! Value records matching the persisted SAFE project format
//!
//! Field names serialize in camelCase to stay compatible with documents
//! written by the form layer.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Option pool reserved alongside founder shares when a project does not
/// configure its own split (1.5M shares against the standard 10M baseline).
pub const DEFAULT_OPTION_POOL_SHARES: f64 = 1_500_000.0;

/// Acceleration policy attached to a vesting grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccelerationPolicy {
    /// No acceleration; the schedule runs to term
    None,
    /// Full vesting on a change of control
    #[serde(rename = "Single Trigger")]
    SingleTrigger,
    /// Full vesting on change of control followed by involuntary
    /// termination within the trigger window
    #[serde(rename = "Double Trigger")]
    #[default]
    DoubleTrigger,
}

/// Category of a slicing-pie contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContributionKind {
    Time,
    Cash,
    #[serde(rename = "IP")]
    Ip,
    Equipment,
    Relationships,
    Other,
}

impl ContributionKind {
    /// Customary risk multiplier for this category. Non-cash contributions
    /// carry a 2x multiplier, cash 4x, under the standard slicing-pie model.
    pub fn default_multiplier(&self) -> f64 {
        match self {
            ContributionKind::Cash => 4.0,
            _ => 2.0,
        }
    }

    /// String form matching the persisted ledger format
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionKind::Time => "Time",
            ContributionKind::Cash => "Cash",
            ContributionKind::Ip => "IP",
            ContributionKind::Equipment => "Equipment",
            ContributionKind::Relationships => "Relationships",
            ContributionKind::Other => "Other",
        }
    }
}

/// Terms of a single SAFE agreement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeTerms {
    /// Amount being raised under this SAFE
    #[serde(default)]
    pub amount_raising: f64,

    /// Valuation cap (post-money valuation when `post_money` is set,
    /// pre-money valuation otherwise)
    #[serde(default)]
    pub valuation_cap: f64,

    /// Discount rate as a percentage (e.g. 20 for a 20% discount).
    /// Recorded on the agreement; it does not enter cap conversion.
    #[serde(default)]
    pub discount_rate: f64,

    /// Post-money SAFE (modern YC standard) vs pre-money SAFE
    #[serde(default)]
    pub post_money: bool,

    /// Whether the investor holds pro-rata participation rights
    #[serde(default)]
    pub pro_rata_rights: bool,

    #[serde(default)]
    pub company_address: String,

    #[serde(default)]
    pub state_of_incorporation: String,

    /// Company representative executing the agreement
    #[serde(default)]
    pub rep_name: String,

    #[serde(default)]
    pub investor_name: String,

    #[serde(default)]
    pub is_signed: bool,

    /// Signature time in epoch milliseconds
    #[serde(default)]
    pub signed_timestamp: Option<i64>,
}

impl Default for SafeTerms {
    fn default() -> Self {
        Self {
            amount_raising: 0.0,
            valuation_cap: 0.0,
            discount_rate: 0.0,
            post_money: true,
            pro_rata_rights: false,
            company_address: String::new(),
            state_of_incorporation: "Delaware".to_string(),
            rep_name: String::new(),
            investor_name: String::new(),
            is_signed: false,
            signed_timestamp: None,
        }
    }
}

impl SafeTerms {
    /// A term set is incomplete until both monetary fields are configured.
    /// Conversion must not be attempted on incomplete terms.
    pub fn is_incomplete(&self) -> bool {
        self.amount_raising == 0.0 || self.valuation_cap == 0.0
    }

    /// Signature time as a UTC datetime, if signed
    pub fn signed_at(&self) -> Option<DateTime<Utc>> {
        self.signed_timestamp
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

/// Share counts outstanding before the SAFE converts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareBaseline {
    /// Fully-diluted pre-money share count (founders + option pool)
    pub total_pre_money_shares: f64,

    /// Shares reserved in the option pool
    pub option_pool_shares: f64,
}

impl ShareBaseline {
    pub fn new(total_pre_money_shares: f64, option_pool_shares: f64) -> Self {
        Self {
            total_pre_money_shares,
            option_pool_shares,
        }
    }

    /// Baseline with the standard reserved option pool
    pub fn standard(total_pre_money_shares: f64) -> Self {
        Self::new(total_pre_money_shares, DEFAULT_OPTION_POOL_SHARES)
    }

    /// Founder shares are whatever the pool does not reserve
    pub fn founder_shares(&self) -> f64 {
        self.total_pre_money_shares - self.option_pool_shares
    }

    /// Reject a pool larger than the company. Never clamped: a negative
    /// founder count means the inputs are wrong, not that founders own zero.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.option_pool_shares > self.total_pre_money_shares {
            return Err(EngineError::InvalidBaseline {
                pool: self.option_pool_shares,
                total: self.total_pre_money_shares,
            });
        }
        Ok(())
    }
}

/// A named what-if raise used for scenario comparison.
///
/// Lightweight variant of `SafeTerms`: identity is `id`, edits replace the
/// record wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapTableScenario {
    pub id: String,
    pub name: String,
    pub amount_raising: f64,
    pub valuation_cap: f64,
}

/// Terms of a time-based vesting grant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestingTerms {
    /// Grant recipient
    #[serde(default)]
    pub recipient: String,

    /// Total shares subject to vesting. Defaults to zero for legacy
    /// documents that stored only the schedule shape.
    #[serde(default)]
    pub total_shares: f64,

    /// Full schedule length in months
    pub vesting_months: u32,

    /// Months before the first (atomic) tranche vests.
    /// Older documents wrote the singular key.
    #[serde(alias = "cliffMonth")]
    pub cliff_months: u32,

    #[serde(default)]
    pub acceleration: AccelerationPolicy,
}

impl VestingTerms {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.vesting_months == 0 || self.cliff_months > self.vesting_months {
            return Err(EngineError::InvalidVestingTerms {
                cliff: self.cliff_months,
                vesting: self.vesting_months,
            });
        }
        Ok(())
    }
}

/// One entry in the slicing-pie contribution ledger.
///
/// Entries belong to the ledger, keyed to a team member by `member_id`.
/// Removing a member must remove (or orphan-filter) their entries — that
/// cascade is owned by the surrounding system; see
/// `slicing::retain_members` for the filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionEntry {
    pub id: String,

    /// Team member this contribution belongs to
    pub member_id: String,

    #[serde(rename = "type")]
    pub kind: ContributionKind,

    #[serde(default)]
    pub description: String,

    /// Fair market value of the contribution
    pub value: f64,

    /// Risk multiplier applied to the value (must be positive)
    pub multiplier: f64,

    /// Contribution date in epoch milliseconds
    #[serde(default, rename = "date")]
    pub timestamp: i64,
}

impl ContributionEntry {
    /// Risk-adjusted value entering the pie
    pub fn adjusted_value(&self) -> f64 {
        self.value * self.multiplier
    }

    /// Contribution date as a UTC datetime
    pub fn date(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.multiplier <= 0.0 {
            return Err(EngineError::InvalidContribution {
                id: self.id.clone(),
                reason: format!("multiplier must be positive, got {}", self.multiplier),
            });
        }
        if self.value < 0.0 {
            return Err(EngineError::InvalidContribution {
                id: self.id.clone(),
                reason: format!("value must be non-negative, got {}", self.value),
            });
        }
        Ok(())
    }
}
