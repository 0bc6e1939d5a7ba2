//! Style-sheet load errors.

use std::path::PathBuf;

use crate::peer::PeerError;

/// Error returned when a style sheet fails to load.
///
/// Any error invalidates the whole load.
#[derive(Debug, thiserror::Error)]
pub enum StyleSheetError {
    #[error("line {line}{}: {message}", in_selector(.selector))]
    Syntax {
        line: usize,
        selector: Option<String>,
        message: String,
    },
    #[error("line {line}: {selector} extends {reference}, which is not defined earlier")]
    ForwardReference {
        line: usize,
        selector: String,
        reference: String,
    },
    #[error("cycle detected in extends: {}", .path.join(" -> "))]
    CyclicExtends { path: Vec<String> },
    #[error("line {line} in {selector}: property '{property}': {source}")]
    Value {
        line: usize,
        selector: String,
        property: String,
        #[source]
        source: PeerError,
    },
    #[error("failed to read style sheet {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn in_selector(selector: &Option<String>) -> String {
    selector
        .as_ref()
        .map(|s| format!(" in {s}"))
        .unwrap_or_default()
}
