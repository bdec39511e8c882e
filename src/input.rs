//! Loading result trees from JSON documents.

use crate::error::SummaryError;
use crate::models::TestResult;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Load a result tree from a file, or from stdin when `path` is `-`.
pub fn load_result_tree(path: &Path) -> Result<TestResult, SummaryError> {
    let name = source_name(path);

    let tree = if path == Path::new(STDIN_PATH) {
        debug!("Reading result tree from stdin");
        read_result_tree(std::io::stdin().lock(), path, &name)?
    } else {
        debug!("Reading result tree from {}", path.display());
        let file = File::open(path).map_err(|source| SummaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        read_result_tree(file, path, &name)?
    };

    info!(
        "Loaded result tree '{}' ({} top-level children)",
        tree.name(),
        tree.children().len()
    );
    Ok(tree)
}

/// Read a whole document from `reader` and parse it as a result tree.
pub fn read_result_tree<R: Read>(
    mut reader: R,
    path: &Path,
    source_name: &str,
) -> Result<TestResult, SummaryError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| SummaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    parse_result_tree(&content, source_name)
}

/// Parse a result tree from a JSON string.
///
/// Blank input has no root and is rejected rather than summarized as zero.
pub fn parse_result_tree(content: &str, source_name: &str) -> Result<TestResult, SummaryError> {
    if content.trim().is_empty() {
        return Err(SummaryError::MissingRoot(format!(
            "{} is empty",
            source_name
        )));
    }

    serde_json::from_str(content).map_err(|source| SummaryError::Parse {
        source_name: source_name.to_string(),
        source,
    })
}

/// Display name of an input path for messages and reports.
pub fn source_name(path: &Path) -> String {
    if path == Path::new(STDIN_PATH) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

/// Resolve the input path argument, defaulting to stdin.
pub fn input_path(arg: Option<&Path>) -> PathBuf {
    arg.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(STDIN_PATH))
}
