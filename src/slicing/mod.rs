//! Contribution-weighted equity allocation ("slicing pie")

mod allocator;

pub use allocator::{allocate, retain_members, SlicingResult};
