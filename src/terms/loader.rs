//! Deserialization boundary for persisted SAFE projects
//!
//! Persisted documents historically stored some fields as JSON-encoded
//! strings inside the project record (`safeAgreement`,
//! `capTableScenarios`, ...). The boundary accepts both the encoded and
//! the inline form, resolved exactly once here — calculation paths never
//! re-parse JSON.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::data::{
    CapTableScenario, ContributionEntry, ContributionKind, SafeTerms, ShareBaseline, VestingTerms,
    DEFAULT_OPTION_POOL_SHARES,
};
use crate::error::EngineError;

/// Pre-money share count assumed when a project has not configured one
pub const DEFAULT_TOTAL_SHARES: f64 = 10_000_000.0;

/// Exit valuation assumed for waterfall analysis until configured
pub const DEFAULT_EXIT_VALUATION: f64 = 10_000_000.0;

/// A document field that may arrive inline or as a JSON-encoded string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaybeEncoded<T> {
    Inline(T),
    Encoded(String),
}

impl<T: DeserializeOwned> MaybeEncoded<T> {
    /// Resolve to the inner value, decoding the string form if needed
    pub fn resolve(self) -> Result<T, EngineError> {
        match self {
            MaybeEncoded::Inline(value) => Ok(value),
            MaybeEncoded::Encoded(raw) => Ok(serde_json::from_str(&raw)?),
        }
    }
}

/// Persisted project record, as written by the form layer
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeDocument {
    #[serde(default)]
    pub total_shares: Option<f64>,

    #[serde(default)]
    pub option_pool_shares: Option<f64>,

    #[serde(default)]
    pub exit_valuation: Option<f64>,

    #[serde(default)]
    pub safe_agreement: Option<MaybeEncoded<SafeTerms>>,

    #[serde(default)]
    pub cap_table_scenarios: Option<MaybeEncoded<Vec<CapTableScenario>>>,

    #[serde(default)]
    pub vesting_settings: Option<MaybeEncoded<VestingTerms>>,

    #[serde(default)]
    pub equity_contributions: Option<MaybeEncoded<Vec<ContributionEntry>>>,
}

/// Fully resolved engine inputs
#[derive(Debug, Clone)]
pub struct ProjectInputs {
    pub safe: SafeTerms,
    pub baseline: ShareBaseline,
    pub scenarios: Vec<CapTableScenario>,
    pub vesting: Option<VestingTerms>,
    pub contributions: Vec<ContributionEntry>,
    pub exit_valuation: f64,
}

impl SafeDocument {
    /// Resolve every possibly-encoded field and fill defaults.
    ///
    /// Missing terms resolve to the default (incomplete) record rather
    /// than an error; the cap table calculator reports Incomplete for it.
    pub fn resolve(self) -> Result<ProjectInputs, EngineError> {
        let total_shares = self.total_shares.unwrap_or(DEFAULT_TOTAL_SHARES);
        let pool_shares = self.option_pool_shares.unwrap_or(DEFAULT_OPTION_POOL_SHARES);
        let baseline = ShareBaseline::new(total_shares, pool_shares);
        baseline.validate()?;

        let safe = match self.safe_agreement {
            Some(field) => field.resolve()?,
            None => SafeTerms::default(),
        };

        let scenarios = match self.cap_table_scenarios {
            Some(field) => field.resolve()?,
            None => Vec::new(),
        };

        let vesting = match self.vesting_settings {
            Some(field) => {
                let terms = field.resolve()?;
                terms.validate()?;
                Some(terms)
            }
            None => None,
        };

        let contributions = match self.equity_contributions {
            Some(field) => field.resolve()?,
            None => Vec::new(),
        };
        for entry in &contributions {
            entry.validate()?;
        }

        log::debug!(
            "resolved project: {} scenarios, {} ledger entries, terms {}",
            scenarios.len(),
            contributions.len(),
            if safe.is_incomplete() { "incomplete" } else { "complete" },
        );

        Ok(ProjectInputs {
            safe,
            baseline,
            scenarios,
            vesting,
            contributions,
            exit_valuation: self.exit_valuation.unwrap_or(DEFAULT_EXIT_VALUATION),
        })
    }
}

/// Load and resolve a project document from a JSON file
pub fn load_project<P: AsRef<Path>>(path: P) -> Result<ProjectInputs, EngineError> {
    let raw = std::fs::read_to_string(path)?;
    load_project_from_str(&raw)
}

/// Load and resolve a project document from a JSON string
pub fn load_project_from_str(raw: &str) -> Result<ProjectInputs, EngineError> {
    let document: SafeDocument = serde_json::from_str(raw)?;
    document.resolve()
}

/// Raw CSV row matching the exported contribution ledger columns
#[derive(Debug, Deserialize)]
struct LedgerRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "MemberID")]
    member_id: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Value")]
    value: f64,
    #[serde(rename = "Multiplier")]
    multiplier: f64,
    #[serde(rename = "Date")]
    timestamp: i64,
}

impl LedgerRow {
    fn to_entry(self) -> Result<ContributionEntry, EngineError> {
        let kind = match self.kind.as_str() {
            "Time" => ContributionKind::Time,
            "Cash" => ContributionKind::Cash,
            "IP" => ContributionKind::Ip,
            "Equipment" => ContributionKind::Equipment,
            "Relationships" => ContributionKind::Relationships,
            "Other" => ContributionKind::Other,
            other => {
                return Err(EngineError::InvalidContribution {
                    id: self.id,
                    reason: format!("unknown contribution type: {}", other),
                })
            }
        };

        let entry = ContributionEntry {
            id: self.id,
            member_id: self.member_id,
            kind,
            description: self.description,
            value: self.value,
            multiplier: self.multiplier,
            timestamp: self.timestamp,
        };
        entry.validate()?;
        Ok(entry)
    }
}

/// Load a contribution ledger from a CSV file
pub fn load_ledger<P: AsRef<Path>>(path: P) -> Result<Vec<ContributionEntry>, EngineError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut entries = Vec::new();

    for result in reader.deserialize() {
        let row: LedgerRow = result?;
        entries.push(row.to_entry()?);
    }

    Ok(entries)
}

/// Load a contribution ledger from any reader (e.g. string buffer)
pub fn load_ledger_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<ContributionEntry>, EngineError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();

    for result in csv_reader.deserialize() {
        let row: LedgerRow = result?;
        entries.push(row.to_entry()?);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_and_encoded_fields_parse_identically() {
        let inline = r#"{
            "totalShares": 10000000,
            "safeAgreement": {"amountRaising": 500000, "valuationCap": 5000000, "postMoney": true},
            "capTableScenarios": [{"id": "1", "name": "Seed", "amountRaising": 500000, "valuationCap": 7000000}]
        }"#;
        let encoded = r#"{
            "totalShares": 10000000,
            "safeAgreement": "{\"amountRaising\": 500000, \"valuationCap\": 5000000, \"postMoney\": true}",
            "capTableScenarios": "[{\"id\": \"1\", \"name\": \"Seed\", \"amountRaising\": 500000, \"valuationCap\": 7000000}]"
        }"#;

        let a = load_project_from_str(inline).unwrap();
        let b = load_project_from_str(encoded).unwrap();

        assert_eq!(a.safe.amount_raising, b.safe.amount_raising);
        assert_eq!(a.safe.valuation_cap, b.safe.valuation_cap);
        assert_eq!(a.scenarios, b.scenarios);
        assert_eq!(a.scenarios[0].name, "Seed");
    }

    #[test]
    fn test_empty_document_resolves_to_defaults() {
        let inputs = load_project_from_str("{}").unwrap();
        assert!(inputs.safe.is_incomplete());
        assert_eq!(inputs.baseline.total_pre_money_shares, DEFAULT_TOTAL_SHARES);
        assert_eq!(inputs.baseline.option_pool_shares, DEFAULT_OPTION_POOL_SHARES);
        assert!(inputs.scenarios.is_empty());
        assert!(inputs.vesting.is_none());
    }

    #[test]
    fn test_document_rejects_oversized_pool() {
        let raw = r#"{"totalShares": 1000000, "optionPoolShares": 2000000}"#;
        let err = load_project_from_str(raw).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBaseline { .. }));
    }

    #[test]
    fn test_malformed_encoded_field_is_a_parse_error() {
        let raw = r#"{"safeAgreement": "{not json"}"#;
        let err = load_project_from_str(raw).unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
    }

    #[test]
    fn test_load_ledger_from_reader() {
        let csv = "\
ID,MemberID,Type,Description,Value,Multiplier,Date
c1,m1,Time,Engineering sprint,5000,2,1700000000000
c2,m2,Cash,Seed capital,10000,4,1700000000000
c3,m1,IP,Patent assignment,20000,2,1700000000000
";
        let entries = load_ledger_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, ContributionKind::Time);
        assert_eq!(entries[1].adjusted_value(), 40_000.0);
    }

    #[test]
    fn test_ledger_rejects_unknown_type() {
        let csv = "\
ID,MemberID,Type,Description,Value,Multiplier,Date
c1,m1,Goodwill,Vibes,5000,2,0
";
        let err = load_ledger_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidContribution { .. }));
    }
}
