use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a path could not be used as the source of a document.
#[derive(Debug, Error)]
pub enum SourceProblem {
    #[error("path does not exist")]
    Missing,

    #[error("path is not a regular file")]
    NotAFile,

    #[error("file could not be read as UTF-8 text: {0}")]
    Unreadable(#[source] io::Error),
}

/// Every way an operation on a [`Document`](crate::Document) can fail.
///
/// Validation errors are raised before anything is snapshotted, so a failed
/// call never changes the document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("can't open {}: {problem}", .path.display())]
    InvalidSource { path: PathBuf, problem: SourceProblem },

    #[error("You can't access the line №0. The number of the line must be greater than 0.")]
    ZeroLineNumber,

    #[error("You can't access the column №0. The number of the column must be greater than 0.")]
    ZeroColumnNumber,

    #[error("You can't access the line №{0}. The number of the line exceeds total number of lines.")]
    LineOutOfRange(usize),

    #[error("You can't access the column №{0}. The number of the column exceeds total number of columns in the line.")]
    ColumnOutOfRange(usize),

    #[error("You can't swap the line with itself.")]
    SwapWithSelf,

    #[error("All unsaved changes will be lost.")]
    UnsavedChanges,

    #[error("failed to access {}: {source}", .path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DocumentError {
    /// True for rejected arguments: zero or out-of-range positions and a
    /// line swapped with itself.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::ZeroLineNumber
                | Self::ZeroColumnNumber
                | Self::LineOutOfRange(_)
                | Self::ColumnOutOfRange(_)
                | Self::SwapWithSelf
        )
    }
}

pub type Result<T> = std::result::Result<T, DocumentError>;
