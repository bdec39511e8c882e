//! Analysis modules.
//!
//! This module turns result trees into summaries.

pub mod aggregator;

pub use aggregator::*;
