//! Result aggregation and statistics.
//!
//! This module walks a test-result tree and tallies every test case into
//! exactly one outcome bucket, then derives the overall status of the run.

use crate::error::SummaryError;
use crate::models::{ResultState, SubStatus, TestResult, TestStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Outcome category a single test case is counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Passed,
    Failure,
    Error,
    Inconclusive,
    Skipped,
    Ignored,
    Explicit,
    Invalid,
}

impl Bucket {
    pub const ALL: [Bucket; 8] = [
        Bucket::Passed,
        Bucket::Failure,
        Bucket::Error,
        Bucket::Inconclusive,
        Bucket::Skipped,
        Bucket::Ignored,
        Bucket::Explicit,
        Bucket::Invalid,
    ];

    /// Classifies a leaf by its reported state.
    ///
    /// The status picks the family; within `Failed` and `Skipped` the
    /// named sub-statuses are checked first and everything else falls back
    /// to `Error` and `Skipped` respectively. The fallback arms are
    /// exhaustive, so a new sub-status has to be placed explicitly.
    pub fn classify(state: ResultState) -> Self {
        match state.status {
            TestStatus::Passed => Bucket::Passed,
            TestStatus::Failed => match state.sub_status {
                SubStatus::Failure => Bucket::Failure,
                SubStatus::NotRunnable => Bucket::Invalid,
                SubStatus::None
                | SubStatus::Error
                | SubStatus::Ignored
                | SubStatus::Explicit => Bucket::Error,
            },
            TestStatus::Skipped => match state.sub_status {
                SubStatus::Ignored => Bucket::Ignored,
                SubStatus::Explicit => Bucket::Explicit,
                SubStatus::None
                | SubStatus::Failure
                | SubStatus::Error
                | SubStatus::NotRunnable => Bucket::Skipped,
            },
            TestStatus::Inconclusive => Bucket::Inconclusive,
        }
    }

    /// Whether tests in this bucket were actually executed.
    pub fn was_run(&self) -> bool {
        matches!(
            self,
            Bucket::Passed | Bucket::Failure | Bucket::Error | Bucket::Inconclusive
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Passed => "Passed",
            Bucket::Failure => "Failures",
            Bucket::Error => "Errors",
            Bucket::Inconclusive => "Inconclusive",
            Bucket::Skipped => "Skipped",
            Bucket::Ignored => "Ignored",
            Bucket::Explicit => "Explicit",
            Bucket::Invalid => "Invalid",
        }
    }
}

/// Overall status of a run as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverallResult {
    Passed,
    Failed,
    /// The root reported `Skipped`.
    Warning,
    Inconclusive,
}

impl From<TestStatus> for OverallResult {
    fn from(status: TestStatus) -> Self {
        match status {
            TestStatus::Passed => OverallResult::Passed,
            TestStatus::Failed => OverallResult::Failed,
            TestStatus::Skipped => OverallResult::Warning,
            TestStatus::Inconclusive => OverallResult::Inconclusive,
        }
    }
}

impl OverallResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallResult::Passed => "Passed",
            OverallResult::Failed => "Failed",
            OverallResult::Warning => "Warning",
            OverallResult::Inconclusive => "Inconclusive",
        }
    }
}

impl fmt::Display for OverallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counters {
    passed: usize,
    failure: usize,
    error: usize,
    inconclusive: usize,
    skipped: usize,
    ignored: usize,
    explicit: usize,
    invalid: usize,
}

impl Counters {
    fn record(mut self, bucket: Bucket) -> Self {
        match bucket {
            Bucket::Passed => self.passed += 1,
            Bucket::Failure => self.failure += 1,
            Bucket::Error => self.error += 1,
            Bucket::Inconclusive => self.inconclusive += 1,
            Bucket::Skipped => self.skipped += 1,
            Bucket::Ignored => self.ignored += 1,
            Bucket::Explicit => self.explicit += 1,
            Bucket::Invalid => self.invalid += 1,
        }
        self
    }

    fn get(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Passed => self.passed,
            Bucket::Failure => self.failure,
            Bucket::Error => self.error,
            Bucket::Inconclusive => self.inconclusive,
            Bucket::Skipped => self.skipped,
            Bucket::Ignored => self.ignored,
            Bucket::Explicit => self.explicit,
            Bucket::Invalid => self.invalid,
        }
    }
}

/// Summary of a test run, built once from the root of a result tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSummary {
    root_name: String,
    test_count: usize,
    counters: Counters,
    overall: OverallResult,
}

impl ResultSummary {
    /// Creates a summary from the root of a result tree.
    pub fn from_result(root: &TestResult) -> Self {
        summarize(root)
    }

    /// Name of the result this summary was created from.
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Number of test cases summarized. Suites are not counted.
    pub fn test_count(&self) -> usize {
        self.test_count
    }

    pub fn pass_count(&self) -> usize {
        self.counters.passed
    }

    /// Failed assertions, excluding errors and invalid tests.
    pub fn failure_count(&self) -> usize {
        self.counters.failure
    }

    pub fn error_count(&self) -> usize {
        self.counters.error
    }

    pub fn inconclusive_count(&self) -> usize {
        self.counters.inconclusive
    }

    /// Skipped tests, excluding ignored and explicit ones.
    pub fn skip_count(&self) -> usize {
        self.counters.skipped
    }

    pub fn ignore_count(&self) -> usize {
        self.counters.ignored
    }

    /// Tests not run because they are explicit.
    pub fn explicit_count(&self) -> usize {
        self.counters.explicit
    }

    /// Tests that could not run because of errors in their signature or setup.
    pub fn invalid_count(&self) -> usize {
        self.counters.invalid
    }

    /// Number of test cases actually run.
    pub fn run_count(&self) -> usize {
        self.pass_count() + self.failure_count() + self.error_count() + self.inconclusive_count()
    }

    /// Number of test cases not run for any reason.
    pub fn not_run_count(&self) -> usize {
        self.ignore_count() + self.explicit_count() + self.invalid_count() + self.skip_count()
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.counters.get(bucket)
    }

    pub fn overall_result(&self) -> OverallResult {
        self.overall
    }
}

/// Summarize a result tree.
///
/// Only leaves are counted. Children are visited in their stored order
/// using an explicit stack, so arbitrarily deep trees are fine. The overall
/// result is taken from the root's own reported status, not recomputed
/// from the counters.
pub fn summarize(root: &TestResult) -> ResultSummary {
    let mut counters = Counters::default();
    let mut test_count = 0;
    let mut pending: Vec<&TestResult> = vec![root];

    while let Some(node) = pending.pop() {
        match node {
            TestResult::Suite { children, .. } => pending.extend(children.iter().rev()),
            TestResult::Leaf { state, .. } => {
                test_count += 1;
                counters = counters.record(Bucket::classify(*state));
            }
        }
    }

    let summary = ResultSummary {
        root_name: root.name().to_string(),
        test_count,
        counters,
        overall: OverallResult::from(root.state().status),
    };

    debug!(
        "Summarized '{}': {} tests, {} run, {} not run, overall {}",
        summary.root_name,
        summary.test_count,
        summary.run_count(),
        summary.not_run_count(),
        summary.overall
    );

    summary
}

/// Summarize an optional root, failing fast when it is absent.
pub fn summarize_root(root: Option<&TestResult>) -> Result<ResultSummary, SummaryError> {
    root.map(summarize)
        .ok_or_else(|| SummaryError::MissingRoot("root result is absent".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUB_STATUSES: [SubStatus; 6] = [
        SubStatus::None,
        SubStatus::Failure,
        SubStatus::Error,
        SubStatus::NotRunnable,
        SubStatus::Ignored,
        SubStatus::Explicit,
    ];

    const STATUSES: [TestStatus; 4] = [
        TestStatus::Passed,
        TestStatus::Failed,
        TestStatus::Skipped,
        TestStatus::Inconclusive,
    ];

    fn bucket_sum(summary: &ResultSummary) -> usize {
        Bucket::ALL.iter().map(|b| summary.count(*b)).sum()
    }

    fn wrap(tree: TestResult, layers: usize) -> TestResult {
        let state = tree.state();
        (0..layers).fold(tree, |inner, i| {
            TestResult::suite(format!("layer{}", i), state, vec![inner])
        })
    }

    fn mixed_tree() -> TestResult {
        TestResult::suite(
            "Run",
            TestStatus::Failed,
            vec![
                TestResult::leaf("p1", ResultState::PASSED),
                TestResult::suite(
                    "Inner",
                    TestStatus::Failed,
                    vec![
                        TestResult::leaf("f1", ResultState::FAILURE),
                        TestResult::leaf("e1", ResultState::ERROR),
                        TestResult::leaf("n1", ResultState::NOT_RUNNABLE),
                    ],
                ),
                TestResult::leaf("s1", ResultState::SKIPPED),
                TestResult::leaf("i1", ResultState::IGNORED),
                TestResult::leaf("x1", ResultState::EXPLICIT),
                TestResult::leaf("q1", ResultState::INCONCLUSIVE),
            ],
        )
    }

    #[test]
    fn test_single_passed_leaf() {
        let summary = summarize(&TestResult::leaf("only", TestStatus::Passed));

        assert_eq!(summary.test_count(), 1);
        assert_eq!(summary.pass_count(), 1);
        assert_eq!(bucket_sum(&summary), 1);
        assert_eq!(summary.run_count(), 1);
        assert_eq!(summary.not_run_count(), 0);
        assert_eq!(summary.overall_result().to_string(), "Passed");
        assert_eq!(summary.root_name(), "only");
    }

    #[test]
    fn test_failure_and_invalid_are_separate() {
        let tree = TestResult::suite(
            "Suite",
            TestStatus::Failed,
            vec![
                TestResult::leaf("a", ResultState::PASSED),
                TestResult::leaf("b", ResultState::FAILURE),
                TestResult::leaf("c", ResultState::NOT_RUNNABLE),
            ],
        );
        let summary = summarize(&tree);

        assert_eq!(summary.test_count(), 3);
        assert_eq!(summary.pass_count(), 1);
        assert_eq!(summary.failure_count(), 1);
        assert_eq!(summary.invalid_count(), 1);
        assert_eq!(summary.error_count(), 0);
        assert_eq!(summary.overall_result(), OverallResult::Failed);
    }

    #[test]
    fn test_failed_without_sub_status_is_an_error() {
        let summary = summarize(&TestResult::leaf("boom", TestStatus::Failed));

        assert_eq!(summary.error_count(), 1);
        assert_eq!(summary.failure_count(), 0);
    }

    #[test]
    fn test_skipped_root_is_reported_as_warning() {
        let tree = TestResult::suite(
            "Explicit only",
            TestStatus::Skipped,
            vec![TestResult::leaf("manual", ResultState::EXPLICIT)],
        );
        let summary = summarize(&tree);

        assert_eq!(summary.explicit_count(), 1);
        assert_eq!(summary.not_run_count(), 1);
        assert_eq!(summary.overall_result(), OverallResult::Warning);
        assert_eq!(summary.overall_result().to_string(), "Warning");
    }

    #[test]
    fn test_nested_inconclusive_suites() {
        let tree = TestResult::suite(
            "L0",
            TestStatus::Inconclusive,
            vec![
                TestResult::leaf("t0", ResultState::INCONCLUSIVE),
                TestResult::suite(
                    "L1",
                    TestStatus::Inconclusive,
                    vec![
                        TestResult::leaf("t1", ResultState::INCONCLUSIVE),
                        TestResult::suite(
                            "L2",
                            TestStatus::Inconclusive,
                            vec![
                                TestResult::leaf("t2", ResultState::INCONCLUSIVE),
                                TestResult::leaf("t3", ResultState::INCONCLUSIVE),
                            ],
                        ),
                    ],
                ),
            ],
        );
        let summary = summarize(&tree);

        assert_eq!(summary.test_count(), 4);
        assert_eq!(summary.inconclusive_count(), 4);
        assert_eq!(summary.run_count(), 4);
        assert_eq!(summary.not_run_count(), 0);
    }

    #[test]
    fn test_classification_table() {
        for status in STATUSES {
            for sub in SUB_STATUSES {
                let expected = match (status, sub) {
                    (TestStatus::Passed, _) => Bucket::Passed,
                    (TestStatus::Failed, SubStatus::Failure) => Bucket::Failure,
                    (TestStatus::Failed, SubStatus::NotRunnable) => Bucket::Invalid,
                    (TestStatus::Failed, _) => Bucket::Error,
                    (TestStatus::Skipped, SubStatus::Ignored) => Bucket::Ignored,
                    (TestStatus::Skipped, SubStatus::Explicit) => Bucket::Explicit,
                    (TestStatus::Skipped, _) => Bucket::Skipped,
                    (TestStatus::Inconclusive, _) => Bucket::Inconclusive,
                };
                let state = ResultState::new(status, sub);
                assert_eq!(Bucket::classify(state), expected, "state {}", state);

                let summary = summarize(&TestResult::leaf("t", state));
                assert_eq!(summary.count(expected), 1);
                assert_eq!(bucket_sum(&summary), 1);
            }
        }
    }

    #[test]
    fn test_sum_law_on_mixed_tree() {
        let summary = summarize(&mixed_tree());

        assert_eq!(summary.test_count(), 8);
        assert_eq!(bucket_sum(&summary), summary.test_count());
        assert_eq!(
            summary.run_count() + summary.not_run_count(),
            summary.test_count()
        );
        for bucket in Bucket::ALL {
            assert_eq!(summary.count(bucket), 1, "bucket {:?}", bucket);
        }
    }

    #[test]
    fn test_suite_wrapping_is_transparent() {
        let tree = mixed_tree();
        let plain = summarize(&tree);

        for layers in [1, 3, 10] {
            let wrapped = summarize(&wrap(tree.clone(), layers));
            assert_eq!(wrapped.counters, plain.counters);
            assert_eq!(wrapped.test_count(), plain.test_count());
            assert_eq!(wrapped.overall_result(), plain.overall_result());
        }
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let tree = mixed_tree();
        let before = tree.clone();

        assert_eq!(summarize(&tree), summarize(&tree));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_empty_suite_counts_nothing() {
        let summary = summarize(&TestResult::suite("Empty", TestStatus::Passed, vec![]));

        assert_eq!(summary.test_count(), 0);
        assert_eq!(summary.run_count(), 0);
        assert_eq!(summary.overall_result(), OverallResult::Passed);
    }

    #[test]
    fn test_overall_ignores_counters() {
        // The root reports Passed even though a child failed.
        let tree = TestResult::suite(
            "Upstream says passed",
            TestStatus::Passed,
            vec![TestResult::leaf("f", ResultState::FAILURE)],
        );

        assert_eq!(summarize(&tree).overall_result(), OverallResult::Passed);
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let tree = wrap(TestResult::leaf("deep", TestStatus::Passed), 50_000);
        let summary = summarize(&tree);

        assert_eq!(summary.test_count(), 1);
        assert_eq!(summary.pass_count(), 1);

        // Tear down one layer at a time; the derived drop recurses.
        let mut node = tree;
        loop {
            let next = match &mut node {
                TestResult::Suite { children, .. } => children.pop(),
                TestResult::Leaf { .. } => None,
            };
            match next {
                Some(child) => node = child,
                None => break,
            }
        }
    }

    #[test]
    fn test_from_result_matches_summarize() {
        let tree = mixed_tree();
        let summary = ResultSummary::from_result(&tree);

        assert_eq!(summary, summarize(&tree));
        assert_eq!(summary.root_name(), "Run");
        assert_eq!(summary.test_count(), 8);
    }

    #[test]
    fn test_summarize_root_requires_root() {
        let err = summarize_root(None).unwrap_err();
        assert!(matches!(err, SummaryError::MissingRoot(_)));

        let leaf = TestResult::leaf("t", TestStatus::Passed);
        assert_eq!(summarize_root(Some(&leaf)).unwrap().test_count(), 1);
    }
}
