//! testsummary - tally a test-result tree into outcome counters.
//!
//! A result tree is made of suites and leaf test cases. [`summarize`]
//! walks it once, counts every leaf into exactly one outcome bucket, and
//! reads the overall result from the root's own reported status.
//!
//! ```
//! use testsummary::{summarize, ResultState, TestResult, TestStatus};
//!
//! let run = TestResult::suite(
//!     "All",
//!     TestStatus::Failed,
//!     vec![
//!         TestResult::leaf("adds", ResultState::PASSED),
//!         TestResult::leaf("divides", ResultState::FAILURE),
//!     ],
//! );
//! let summary = summarize(&run);
//! assert_eq!(summary.test_count(), 2);
//! assert_eq!(summary.failure_count(), 1);
//! assert_eq!(summary.overall_result().to_string(), "Failed");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod report;

pub use analysis::{summarize, summarize_root, Bucket, OverallResult, ResultSummary};
pub use error::SummaryError;
pub use models::{ResultState, SubStatus, TestResult, TestStatus};
