/*!

The error taxonomy the `saturate` binary reports through (spec §7): syntax errors during parsing
carry a file/line/column; semantic errors surface signature/ordering problems from `sat-core`;
resource errors are the core's own [`sat_core::error::TerminationReason`] passed through unchanged.
Each variant maps to a distinct process exit code in [`crate::cli`].

*/

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaturateError {
  #[error("{file}:{line}:{column}: {message}")]
  Syntax { file: String, line: usize, column: usize, message: String },

  #[error("semantic error: {0}")]
  Semantic(String),

  #[error(transparent)]
  Core(#[from] sat_core::error::CoreError),

  #[error("resource limit: {0}")]
  ResourceOut(#[from] sat_core::error::TerminationReason),

  #[error("I/O error reading {path}: {source}")]
  Io { path: String, #[source] source: std::io::Error },
}

pub type SaturateResult<T> = Result<T, SaturateError>;
