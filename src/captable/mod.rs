//! SAFE conversion into a post-round capitalization table

mod calculator;
mod types;

pub use calculator::CapTableCalculator;
pub use types::{CapTableOutcome, CapTableResult};
