use anyhow::Result;
use linecore::Document;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Program name plus the file to edit.
const EXPECTED_ARGS: usize = 2;
const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Error! Expected number of command-line arguments: {expected}, but got {actual}.")]
    WrongArgumentCount { expected: usize, actual: usize },

    #[error("Error! Following path doesn't exist: {}", .0.display())]
    PathDoesNotExist(PathBuf),

    #[error("Error! Following path isn't a filepath: {}", .0.display())]
    PathIsNotFile(PathBuf),
}

/// Pick the file to edit out of the full argument list, program name included.
///
/// Arguments are taken as `OsString` so paths that are not valid UTF-8 still
/// get a proper error instead of a panic.
pub fn resolve_path(args: &[OsString]) -> Result<PathBuf, LaunchError> {
    if args.len() != EXPECTED_ARGS {
        return Err(LaunchError::WrongArgumentCount {
            expected: EXPECTED_ARGS,
            actual: args.len(),
        });
    }

    let path = PathBuf::from(&args[1]);
    if !path.exists() {
        return Err(LaunchError::PathDoesNotExist(path));
    }
    if !path.is_file() {
        return Err(LaunchError::PathIsNotFile(path));
    }
    Ok(path)
}

pub async fn open_document(path: &Path) -> Result<Document> {
    match fs::metadata(path).await {
        Ok(metadata) => {
            if metadata.permissions().readonly() {
                log::warn!("{} is read-only, saving will fail", path.display());
            }
            if metadata.len() > LARGE_FILE_THRESHOLD {
                log::warn!(
                    "Large file detected ({} bytes): {}",
                    metadata.len(),
                    path.display()
                );
            }
        }
        Err(e) => {
            log::warn!("Failed to get file metadata: {}", e);
        }
    }

    let document = Document::open(path)?;
    Ok(document)
}
