use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Loader errors
// ---------------------------------------------------------------------------

/// Why a log file could not be turned into a [`LogTable`](super::model::LogTable).
///
/// Any of these aborts the whole load; no partial table is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line is not valid JSON.
    #[error("line {line}: invalid JSON: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A line is valid JSON but not an object, so it has no columns.
    #[error("line {line}: expected a JSON object, found {found}")]
    NotAnObject { line: usize, found: &'static str },
}

// ---------------------------------------------------------------------------
// Adapter errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// A row or column index outside the wrapped table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{axis} {index} out of range [0, {len})")]
pub struct IndexOutOfRange {
    pub axis: Axis,
    pub index: usize,
    pub len: usize,
}

impl IndexOutOfRange {
    /// Return `index` unchanged if it is below `len`.
    pub fn check(axis: Axis, index: usize, len: usize) -> Result<usize, Self> {
        if index < len {
            Ok(index)
        } else {
            Err(IndexOutOfRange { axis, index, len })
        }
    }
}
