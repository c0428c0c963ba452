//! The buffer engine: an in-memory copy of one text file, split into lines.
//!
//! Every line keeps its own `\n` terminator, so concatenating the lines gives
//! back the file byte for byte. Positions at the public interface are 1-based.
//! Mutations take a full snapshot of the lines first, which `undo` restores.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocumentError, Result, SourceProblem};

const NEWLINE: char = '\n';

/// Where [`Document::insert`] puts its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    /// Append as a new final line.
    End,
    /// Append to the end of the content of the given line.
    LineEnd(usize),
    /// Splice into the given line before the given character column.
    Column { line: usize, column: usize },
}

#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
    backup: Vec<String>,
}

impl Document {
    /// Load the file at `path`.
    ///
    /// The path must name an existing regular file holding UTF-8 text.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Err(DocumentError::InvalidSource {
                path,
                problem: SourceProblem::Missing,
            });
        }
        if !path.is_file() {
            return Err(DocumentError::InvalidSource {
                path,
                problem: SourceProblem::NotAFile,
            });
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                return Err(DocumentError::InvalidSource {
                    path,
                    problem: SourceProblem::Unreadable(e),
                })
            }
        };

        let document = Self::from_content(path, &content);
        log::info!(
            "Opened {} ({} lines)",
            document.path.display(),
            document.line_count()
        );
        Ok(document)
    }

    pub(crate) fn from_content(path: PathBuf, content: &str) -> Self {
        let lines = split_lines(content);
        Self {
            path,
            backup: lines.clone(),
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The snapshot taken before the most recent mutation.
    pub fn backup(&self) -> &[String] {
        &self.backup
    }

    /// The whole document as it would be written by [`save`](Self::save).
    pub fn content(&self) -> String {
        self.lines.concat()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn insert(&mut self, text: &str, at: InsertAt) -> Result<()> {
        match at {
            InsertAt::End => {
                self.back_up();
                if let Some(last) = self.lines.last_mut() {
                    if !last.ends_with(NEWLINE) {
                        last.push(NEWLINE);
                    }
                }
                self.lines.push(text.to_string());
            }
            InsertAt::LineEnd(line) => {
                if self.is_empty() && line == 1 {
                    self.push_first_line(text);
                } else {
                    let index = self.line_index(line)?;
                    self.back_up();
                    let target = &mut self.lines[index];
                    if target.ends_with(NEWLINE) {
                        target.pop();
                    }
                    target.push_str(text);
                    target.push(NEWLINE);
                }
            }
            InsertAt::Column { line, column } => {
                if self.is_empty() && line == 1 && column == 1 {
                    self.push_first_line(text);
                } else {
                    let index = self.line_index(line)?;
                    if column == 0 {
                        return Err(DocumentError::ZeroColumnNumber);
                    }
                    let target = &self.lines[index];
                    if column > target.chars().count() {
                        return Err(DocumentError::ColumnOutOfRange(column));
                    }
                    let offset = target
                        .char_indices()
                        .nth(column - 1)
                        .map_or(target.len(), |(offset, _)| offset);

                    self.back_up();
                    self.lines[index].insert_str(offset, text);
                }
            }
        }

        log::debug!("Inserted {:?} at {:?}", text, at);
        Ok(())
    }

    pub fn delete(&mut self, line: usize) -> Result<()> {
        let index = self.line_index(line)?;
        self.back_up();
        self.lines.remove(index);
        log::debug!("Deleted line {}", line);
        Ok(())
    }

    pub fn swap(&mut self, line1: usize, line2: usize) -> Result<()> {
        if line1 == 0 || line2 == 0 {
            return Err(DocumentError::ZeroLineNumber);
        }
        let first = self.line_index(line1)?;
        let second = self.line_index(line2)?;
        if first == second {
            return Err(DocumentError::SwapWithSelf);
        }

        self.back_up();
        for index in [first, second] {
            if !self.lines[index].ends_with(NEWLINE) {
                self.lines[index].push(NEWLINE);
            }
        }
        self.lines.swap(first, second);
        log::debug!("Swapped lines {} and {}", line1, line2);
        Ok(())
    }

    /// Restore the snapshot taken before the last mutation.
    ///
    /// The snapshot itself is left alone, so a second `undo` is a no-op.
    pub fn undo(&mut self) {
        self.lines = self.backup.clone();
        log::debug!("Restored {} lines from backup", self.lines.len());
    }

    pub fn clear(&mut self) {
        self.back_up();
        self.lines.clear();
        log::debug!("Cleared document");
    }

    /// Overwrite the file with the current lines.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.content()).map_err(|source| {
            DocumentError::PersistenceFailure {
                path: self.path.clone(),
                source,
            }
        })?;
        log::info!(
            "Saved {} lines to {}",
            self.line_count(),
            self.path.display()
        );
        Ok(())
    }

    /// Compare the current lines with what is on disk.
    ///
    /// The file must hold exactly the bytes [`save`](Self::save) would write,
    /// otherwise this fails with [`DocumentError::UnsavedChanges`].
    pub fn close_check(&self) -> Result<()> {
        let on_disk = fs::read_to_string(&self.path).map_err(|source| {
            DocumentError::PersistenceFailure {
                path: self.path.clone(),
                source,
            }
        })?;

        if on_disk != self.content() {
            log::debug!("{} differs from the buffer", self.path.display());
            return Err(DocumentError::UnsavedChanges);
        }
        Ok(())
    }

    fn back_up(&mut self) {
        self.backup.clone_from(&self.lines);
    }

    fn push_first_line(&mut self, text: &str) {
        self.back_up();
        self.lines.push(format!("{text}{NEWLINE}"));
    }

    /// Validate a 1-based line number and turn it into a storage index.
    fn line_index(&self, line: usize) -> Result<usize> {
        if line == 0 {
            return Err(DocumentError::ZeroLineNumber);
        }
        if line > self.line_count() {
            return Err(DocumentError::LineOutOfRange(line));
        }
        Ok(line - 1)
    }
}

/// Split text after every `\n`, keeping the terminators.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive(NEWLINE).map(str::to_string).collect()
}
