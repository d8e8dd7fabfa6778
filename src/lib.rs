//! Equity System - ownership calculation engine for SAFE financing
//!
//! This library provides:
//! - SAFE conversion into post-round cap tables (pre- and post-money)
//! - Multi-scenario dilution and exit waterfall comparison
//! - Cliff + linear monthly vesting with acceleration triggers
//! - Contribution-weighted ("slicing pie") equity allocation
//!
//! Every calculator is a pure function of its inputs: no cached state, no
//! I/O, safe to invoke concurrently. Persistence, document rendering, and
//! narration live outside this crate and consume the plain records
//! returned here.

pub mod captable;
pub mod error;
pub mod scenario;
pub mod sharemath;
pub mod slicing;
pub mod terms;
pub mod vesting;

// Re-export commonly used types
pub use captable::{CapTableCalculator, CapTableOutcome, CapTableResult};
pub use error::EngineError;
pub use scenario::{ScenarioEngine, WaterfallRow, WaterfallSummary};
pub use terms::{CapTableScenario, ContributionEntry, SafeTerms, ShareBaseline, VestingTerms};
pub use vesting::VestedPosition;
