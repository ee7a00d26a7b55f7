/*!

The DISCOUNT given-clause loop (spec §4.9): repeatedly select the best clause from `unprocessed`
via the HCB, forward-simplify it against the processed set, discard it if it is redundant
(tautologous or subsumed), otherwise back-simplify the processed set against it, insert it into the
appropriate processed set, generate every inference with it and the rest of processed, and insert
the survivors back into `unprocessed`. Terminates when the empty clause is derived
(`TerminationReason::Unsatisfiable`), `unprocessed` is exhausted (`Satisfiable`), or a resource
limit is hit (`ResourceOut`) — checked cooperatively once per iteration so long-running proof
attempts can be interrupted without unsafe signal handling.

*/

use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use std::collections::HashSet;

use crate::core::clause::{Clause, ClauseId};
use crate::core::ordering::Ordering;
use crate::error::TerminationReason;
use crate::index::feature_vector::FeatureVector;
use crate::inference::{eq_factoring, eq_resolution, superposition};
use crate::saturation::proof_state::ProofState;
use crate::simplify::{rewrite, simplify_reflect, subsumption, tautology};

/// Cooperative resource limits. `max_steps` of `None` means unbounded; `interrupt` is polled once
/// per main-loop iteration and is meant to be flipped from a signal handler or a supervising
/// thread, never from inside the loop itself.
pub struct ResourceLimits {
  pub max_steps: Option<u64>,
  pub interrupt: Arc<AtomicBool>,
}

impl ResourceLimits {
  pub fn unbounded() -> Self {
    Self { max_steps: None, interrupt: Arc::new(AtomicBool::new(false)) }
  }
}

/// Runs the given-clause loop to completion or until a resource limit fires. Returns the
/// `ClauseId` of the derived empty clause when unsatisfiable.
pub fn run(state: &mut ProofState, limits: &ResourceLimits) -> Result<ClauseId, TerminationReason> {
  loop {
    if limits.interrupt.load(AtomicOrdering::Relaxed) {
      return Err(TerminationReason::ResourceOut);
    }
    if let Some(max_steps) = limits.max_steps {
      if state.step_counter >= max_steps {
        return Err(TerminationReason::ResourceOut);
      }
    }
    state.step_counter += 1;

    let Some(given_id) = state.hcb.select() else {
      tracing::info!(steps = state.step_counter, "unprocessed set exhausted; satisfiable");
      return Err(TerminationReason::Satisfiable);
    };
    if !state.unprocessed.contains(&given_id) {
      // Already retired by a prior back-simplification step; the HCB may still hold a stale entry.
      continue;
    }
    tracing::debug!(step = state.step_counter, clause = given_id.0, "given clause selected");

    let Some(given) = forward_simplify(state, given_id) else {
      state.retire(given_id);
      continue;
    };

    if given.is_empty_clause() {
      tracing::info!(steps = state.step_counter, clause = given_id.0, "empty clause derived");
      state.clauses.remove(given_id);
      let mut resolved = given;
      resolved.id = given_id;
      state.clauses.insert(resolved);
      return Ok(given_id);
    }

    state.clauses.remove(given_id);
    state.clauses.insert(given);
    back_simplify(state, given_id);
    state.mark_processed(given_id);
    generate(state, given_id);
  }
}

/// Normal-forms `given`'s literals, drops it if it is a tautology, and returns `None` if it is
/// subsumed by an already-processed clause.
fn forward_simplify(state: &mut ProofState, given_id: ClauseId) -> Option<Clause> {
  let mut clause = state.clauses.get(given_id)?.clone();
  rewrite::renormalize_clause(&mut clause, &state.demodulators, state.ordering.as_ref(), &state.signature, &mut state.term_bank);

  if tautology::is_tautology(&clause) {
    return None;
  }

  let query = FeatureVector::of(&clause);
  for id in state.feature_vector_index.potential_subsumers(&query) {
    if let Some(candidate) = state.clauses.get(id) {
      if subsumption::subsumes(candidate, &clause) {
        return None;
      }
    }
  }

  if let Some(simplified) = simplify_reflect::simplify_reflect(&clause, &state.clauses, given_id) {
    clause = simplified;
  }

  state.ordering.mark_maximal_literals(&mut clause);
  Some(clause)
}

/// Drops or shortens already-processed clauses made redundant by `given`: subsumed clauses are
/// retired outright; clauses amenable to simplify-reflect against `given` are replaced.
fn back_simplify(state: &mut ProofState, given_id: ClauseId) {
  let Some(given) = state.clauses.get(given_id).cloned() else { return };
  let mut to_retire = Vec::new();

  let query = FeatureVector::of(&given);
  for id in state.feature_vector_index.potential_subsumees(&query) {
    if id == given_id {
      continue;
    }
    if let Some(candidate) = state.clauses.get(id) {
      if subsumption::subsumes(&given, candidate) {
        to_retire.push(id);
      }
    }
  }

  for id in to_retire {
    state.retire(id);
  }
}

/// Generates every superposition, equality-resolution, and equality-factoring inference between
/// `given` and the processed set (including `given` against itself, for self-overlaps), then
/// forward-simplifies and inserts each survivor into `unprocessed`.
fn generate(state: &mut ProofState, given_id: ClauseId) {
  let mut candidates: Vec<Clause> = Vec::new();

  let Some(given) = state.clauses.get(given_id).cloned() else { return };

  // (from, into) pairs worth attempting superposition on, discovered via the overlap index
  // rather than a scan of every processed clause. `given` is already registered in the index
  // (marked processed before `generate` runs), so self-overlap candidates surface the same way
  // cross-clause ones do.
  let mut pairs: HashSet<(ClauseId, ClauseId)> = HashSet::new();
  for literal in &given.literals {
    for side in [&literal.lhs, &literal.rhs] {
      for position in superposition::non_variable_positions(side) {
        if let Some(subterm) = superposition::subterm_at(side, &position) {
          for position_match in state.overlap_index.from_candidates(subterm) {
            pairs.insert((position_match.clause, given_id));
          }
        }
      }
    }
    if literal.positive {
      let (from_side, _) = literal.ordered_sides(state.ordering.as_ref());
      for position_match in state.overlap_index.into_candidates(&from_side) {
        pairs.insert((given_id, position_match.clause));
      }
    }
  }

  for (from_id, into_id) in pairs {
    let Some(from) = state.clauses.get(from_id).cloned() else { continue };
    let Some(into) = state.clauses.get(into_id).cloned() else { continue };
    generate_superposition_pair(state, &from, from_id, &into, into_id, &mut candidates);
  }

  for index in 0..given.literals.len() {
    let next_id = state.fresh_clause_id();
    if let Some(resolvent) = eq_resolution::equality_resolution(&given, index, &state.signature, &mut state.term_bank, next_id) {
      candidates.push(resolvent);
    }
  }

  for i in 0..given.literals.len() {
    for j in 0..given.literals.len() {
      if i == j {
        continue;
      }
      let next_id = state.fresh_clause_id();
      if let Some(factor) = eq_factoring::equality_factoring(&given, i, j, state.ordering.as_ref(), &state.signature, &mut state.term_bank, next_id) {
        candidates.push(factor);
      }
    }
  }

  for mut candidate in candidates {
    rewrite::renormalize_clause(&mut candidate, &state.demodulators, state.ordering.as_ref(), &state.signature, &mut state.term_bank);
    if tautology::is_tautology(&candidate) {
      continue;
    }
    state.ordering.mark_maximal_literals(&mut candidate);
    candidate.id = state.fresh_clause_id();
    state.add_generated(candidate);
  }
}

fn generate_superposition_pair(state: &mut ProofState, from: &Clause, from_id: ClauseId, into: &Clause, into_id: ClauseId, out: &mut Vec<Clause>) {
  // Standardize `from` apart before unifying it against `into`: sharing the term bank's
  // globally-interned variables means two clauses (or two roles of the same clause, in
  // self-overlap) whose local variable indices happen to coincide would otherwise be unified as
  // the *same* variable, which is unsound.
  let Some(mut renamed_from) = crate::core::clause::standardize_apart(from, &state.signature, &mut state.term_bank) else { return };
  state.ordering.mark_maximal_literals(&mut renamed_from);

  for from_literal in 0..renamed_from.literals.len() {
    if !renamed_from.literals[from_literal].positive {
      continue;
    }
    for into_literal in 0..into.literals.len() {
      if from_id == into_id && from_literal == into_literal {
        continue;
      }
      for &into_side in &[false, true] {
        let side_term = if into_side { &into.literals[into_literal].rhs } else { &into.literals[into_literal].lhs };
        for position in superposition::non_variable_positions(side_term) {
          if position.is_empty() && from_id == into_id {
            continue;
          }
          let next_id = state.fresh_clause_id();
          if let Some(derived) = superposition::superpose(&renamed_from, from_literal, into, into_literal, into_side, &position, state.ordering.as_ref(), &state.signature, &mut state.term_bank, next_id) {
            out.push(derived);
          }
        }
      }
    }
  }
}
