#![allow(dead_code)]
/*!

The saturation engine proper: term bank, signature, orderings, substitution/unification, the
clause/literal model, indices, simplification, generating inferences, heuristic clause selection,
the given-clause main loop, and the proof object.

Everything in this crate is single-threaded and cooperative (see [`saturation::main_loop`]):
there is exactly one logical thread of control, and the only suspension points are the loop-top
interrupt check and the post-inference-batch resource check.

*/

pub mod error;

pub mod core {
  pub mod clause;
  pub mod format;
  pub mod literal;
  pub mod ordering;
  pub mod signature;
  pub mod substitution;
  pub mod term_bank;
  pub mod unify;
}

pub mod index {
  pub mod feature_vector;
  pub mod fingerprint;
  pub mod overlap;
  pub mod subterm;
}

pub mod simplify {
  pub mod rewrite;
  pub mod simplify_reflect;
  pub mod subsumption;
  pub mod tautology;
}

pub mod inference {
  pub mod eq_factoring;
  pub mod eq_resolution;
  pub mod superposition;
}

pub mod heuristic {
  pub mod hcb;
  pub mod wfcb;
  pub mod weights;
}

pub mod saturation {
  pub mod main_loop;
  pub mod proof_state;
}

pub mod proof;

pub use error::CoreError;

// Convenient re-exports of the types most call sites need.
pub use crate::core::{
  clause::{Clause, ClauseId, ClauseSet},
  literal::Literal,
  ordering::{ComparisonResult, Ordering as TermOrdering},
  signature::{Signature, SortId, Symbol, SymbolId},
  substitution::{Substitution, VariableIndex},
  term_bank::{Term, TermBank, TermPtr},
};
