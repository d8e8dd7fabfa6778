//! Input records: SAFE terms, share baselines, scenarios, vesting terms,
//! and the contribution ledger

mod data;
pub mod loader;
pub mod templates;

pub use data::{
    AccelerationPolicy, CapTableScenario, ContributionEntry, ContributionKind, SafeTerms,
    ShareBaseline, VestingTerms, DEFAULT_OPTION_POOL_SHARES,
};
pub use loader::{load_ledger, load_project, ProjectInputs, SafeDocument};
pub use templates::SafePackage;
