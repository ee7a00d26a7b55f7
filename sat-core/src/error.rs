/*!

The typed error taxonomy for the saturation core (spec §7). Internal invariant violations are
never represented here — those are bugs, and are reported with `assert!`/`debug_assert!` exactly
as the rest of the core does, not recovered from.

*/

use thiserror::Error;

use crate::core::signature::SymbolId;

#[derive(Debug, Error)]
pub enum CoreError {
  #[error("symbol {symbol:?} has arity {expected}, but {got} arguments were given")]
  SymbolArityMismatch { symbol: SymbolId, expected: u32, got: u32 },

  #[error("term bank garbage collection found a term reachable only from a deregistered set")]
  LiveReferenceLeak,

  #[error("unknown symbol `{0}`")]
  UnknownSymbol(String),

  #[error("ordering parameters are illegal: {0}")]
  IllegalOrderingParameters(String),

  #[error("resource limit exceeded: {0}")]
  ResourceOut(#[from] TerminationReason),
}

/// Why the main loop stopped. Mapped to SZS status strings at the output boundary and to process
/// exit codes in the `saturate` binary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum TerminationReason {
  #[error("the empty clause was derived")]
  Unsatisfiable,
  #[error("the unprocessed set was exhausted without deriving the empty clause")]
  Satisfiable,
  #[error("a resource limit (CPU, wall-clock, or memory) was hit")]
  ResourceOut,
  #[error("the search gave up without a definite answer")]
  GaveUp,
  #[error("an unrecoverable error occurred")]
  Error,
}

pub type CoreResult<T> = Result<T, CoreError>;
