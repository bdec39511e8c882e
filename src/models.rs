//! Data models for test-result trees.
//!
//! This module contains the input side of the summarizer: the coarse
//! test status, its refinement, and the suite/leaf tree handed over by
//! the test framework.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse outcome of a test or suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestStatus {
    /// The test ran and its assertions held.
    Passed,
    /// The test ran and failed, errored, or could not be run.
    Failed,
    /// The test was not run.
    Skipped,
    /// The test ran but reached no verdict.
    Inconclusive,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "Passed"),
            TestStatus::Failed => write!(f, "Failed"),
            TestStatus::Skipped => write!(f, "Skipped"),
            TestStatus::Inconclusive => write!(f, "Inconclusive"),
        }
    }
}

/// Refinement of a [`TestStatus`] that separates categories sharing
/// the same coarse status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubStatus {
    #[default]
    None,
    /// An assertion failed.
    Failure,
    /// An unexpected exception escaped the test.
    Error,
    /// The test has an invalid signature or setup and cannot run.
    NotRunnable,
    /// The test was ignored on purpose.
    Ignored,
    /// The test only runs when selected explicitly.
    Explicit,
}

impl fmt::Display for SubStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubStatus::None => write!(f, "None"),
            SubStatus::Failure => write!(f, "Failure"),
            SubStatus::Error => write!(f, "Error"),
            SubStatus::NotRunnable => write!(f, "NotRunnable"),
            SubStatus::Ignored => write!(f, "Ignored"),
            SubStatus::Explicit => write!(f, "Explicit"),
        }
    }
}

/// The reported outcome of a node: a status plus its refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultState {
    pub status: TestStatus,
    #[serde(default)]
    pub sub_status: SubStatus,
}

impl ResultState {
    pub const PASSED: Self = Self::new(TestStatus::Passed, SubStatus::None);
    pub const FAILURE: Self = Self::new(TestStatus::Failed, SubStatus::Failure);
    pub const ERROR: Self = Self::new(TestStatus::Failed, SubStatus::Error);
    pub const NOT_RUNNABLE: Self = Self::new(TestStatus::Failed, SubStatus::NotRunnable);
    pub const SKIPPED: Self = Self::new(TestStatus::Skipped, SubStatus::None);
    pub const IGNORED: Self = Self::new(TestStatus::Skipped, SubStatus::Ignored);
    pub const EXPLICIT: Self = Self::new(TestStatus::Skipped, SubStatus::Explicit);
    pub const INCONCLUSIVE: Self = Self::new(TestStatus::Inconclusive, SubStatus::None);

    pub const fn new(status: TestStatus, sub_status: SubStatus) -> Self {
        Self { status, sub_status }
    }
}

impl From<TestStatus> for ResultState {
    fn from(status: TestStatus) -> Self {
        Self::new(status, SubStatus::None)
    }
}

impl fmt::Display for ResultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_status {
            SubStatus::None => write!(f, "{}", self.status),
            sub => write!(f, "{}:{}", self.status, sub),
        }
    }
}

/// A node of a test-result tree.
///
/// Suites group child results and are never counted themselves; leaves
/// are individual test cases. Both carry the state reported by the test
/// framework, which for a suite is usually an aggregate of its children.
///
/// The JSON form rejects unknown fields and leaves that carry children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum TestResult {
    Suite {
        name: String,
        state: ResultState,
        children: Vec<TestResult>,
    },
    Leaf {
        name: String,
        state: ResultState,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NodeKind {
    Suite,
    Leaf,
}

/// Wire shape of a [`TestResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    kind: NodeKind,
    name: String,
    status: TestStatus,
    #[serde(default)]
    sub_status: SubStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<TestResult>>,
}

impl TryFrom<RawNode> for TestResult {
    type Error = String;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let state = ResultState::new(raw.status, raw.sub_status);
        match (raw.kind, raw.children) {
            (NodeKind::Suite, children) => Ok(TestResult::Suite {
                name: raw.name,
                state,
                children: children.unwrap_or_default(),
            }),
            (NodeKind::Leaf, None) => Ok(TestResult::Leaf {
                name: raw.name,
                state,
            }),
            (NodeKind::Leaf, Some(_)) => {
                Err(format!("leaf '{}' cannot have children", raw.name))
            }
        }
    }
}

impl From<TestResult> for RawNode {
    fn from(node: TestResult) -> Self {
        match node {
            TestResult::Suite {
                name,
                state,
                children,
            } => RawNode {
                kind: NodeKind::Suite,
                name,
                status: state.status,
                sub_status: state.sub_status,
                children: Some(children),
            },
            TestResult::Leaf { name, state } => RawNode {
                kind: NodeKind::Leaf,
                name,
                status: state.status,
                sub_status: state.sub_status,
                children: None,
            },
        }
    }
}

impl TestResult {
    /// Creates a suite node with the given children, kept in order.
    pub fn suite(
        name: impl Into<String>,
        state: impl Into<ResultState>,
        children: Vec<TestResult>,
    ) -> Self {
        TestResult::Suite {
            name: name.into(),
            state: state.into(),
            children,
        }
    }

    /// Creates a leaf test case.
    pub fn leaf(name: impl Into<String>, state: impl Into<ResultState>) -> Self {
        TestResult::Leaf {
            name: name.into(),
            state: state.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TestResult::Suite { name, .. } | TestResult::Leaf { name, .. } => name,
        }
    }

    pub fn state(&self) -> ResultState {
        match self {
            TestResult::Suite { state, .. } | TestResult::Leaf { state, .. } => *state,
        }
    }

    pub fn is_suite(&self) -> bool {
        matches!(self, TestResult::Suite { .. })
    }

    /// Child results in execution order. Leaves have none.
    pub fn children(&self) -> &[TestResult] {
        match self {
            TestResult::Suite { children, .. } => children,
            TestResult::Leaf { .. } => &[],
        }
    }
}
