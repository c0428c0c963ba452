pub mod document;
pub mod error;

pub use document::{Document, InsertAt};
pub use error::{DocumentError, Result, SourceProblem};
