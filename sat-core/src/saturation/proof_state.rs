/*!

The proof state is the saturation loop's complete mutable world: the term bank, signature, and
ordering it interprets clauses against; the clause sets the DISCOUNT algorithm distinguishes
(`axioms`, `unprocessed`, `processed_pos`, `processed_neg_non_units`); an optional watchlist of
clauses the run is specifically trying to connect to (spec §4.9's "watched clauses" feature, used
for axiom-relevance pruning); the simplification indices; and the step counter that resource limits
are checked against.

*/

use std::collections::HashSet;

use crate::core::clause::{Clause, ClauseId, ClauseSet};
use crate::core::ordering::Ordering;
use crate::core::signature::Signature;
use crate::core::term_bank::TermBank;
use crate::heuristic::hcb::Hcb;
use crate::index::feature_vector::FeatureVectorIndex;
use crate::index::overlap::OverlapIndex;
use crate::index::subterm::SubtermIndex;
use crate::simplify::rewrite::Demodulator;

/// The complete mutable state of one saturation run.
pub struct ProofState {
  pub signature: Signature,
  pub term_bank: TermBank,
  pub ordering: Box<dyn Ordering>,
  pub hcb: Hcb,

  /// Clauses present in the problem as given, never generated.
  pub axioms: HashSet<ClauseId>,
  /// Clauses that have been generated/retained but not yet selected as the given clause.
  pub unprocessed: HashSet<ClauseId>,
  /// Processed positive unit clauses — the demodulator candidates.
  pub processed_pos: HashSet<ClauseId>,
  /// Processed clauses that are negative, or positive but not units.
  pub processed_neg_non_units: HashSet<ClauseId>,
  /// Clauses the run is specifically trying to reach a connection with (spec §4.9).
  pub watchlist: HashSet<ClauseId>,

  pub clauses: ClauseSet,
  pub subterm_index: SubtermIndex,
  pub overlap_index: OverlapIndex,
  pub feature_vector_index: FeatureVectorIndex,
  pub demodulators: Vec<Demodulator>,

  next_clause_id: u64,
  pub step_counter: u64,
}

impl ProofState {
  pub fn new(signature: Signature, term_bank: TermBank, ordering: Box<dyn Ordering>, hcb: Hcb) -> Self {
    Self {
      signature,
      term_bank,
      ordering,
      hcb,
      axioms: HashSet::new(),
      unprocessed: HashSet::new(),
      processed_pos: HashSet::new(),
      processed_neg_non_units: HashSet::new(),
      watchlist: HashSet::new(),
      clauses: ClauseSet::new(),
      subterm_index: SubtermIndex::new(),
      overlap_index: OverlapIndex::new(),
      feature_vector_index: FeatureVectorIndex::new(),
      demodulators: Vec::new(),
      next_clause_id: 0,
      step_counter: 0,
    }
  }

  pub fn fresh_clause_id(&mut self) -> ClauseId {
    let id = ClauseId(self.next_clause_id);
    self.next_clause_id += 1;
    id
  }

  /// Registers `clause` as an input axiom and places it in `unprocessed`.
  pub fn add_axiom(&mut self, mut clause: Clause) -> ClauseId {
    self.ordering.mark_maximal_literals(&mut clause);
    let id = clause.id;
    self.axioms.insert(id);
    self.unprocessed.insert(id);
    self.hcb.insert(&clause);
    self.clauses.insert(clause);
    id
  }

  /// Moves a freshly generated, already-simplified clause into `unprocessed`.
  pub fn add_generated(&mut self, mut clause: Clause) -> ClauseId {
    self.ordering.mark_maximal_literals(&mut clause);
    let id = clause.id;
    self.unprocessed.insert(id);
    self.hcb.insert(&clause);
    self.clauses.insert(clause);
    id
  }

  /// Moves `id` from `unprocessed` into the appropriate processed set, updating the simplification
  /// indices so future inferences can see it.
  pub fn mark_processed(&mut self, id: ClauseId) {
    self.unprocessed.remove(&id);
    let Some(clause) = self.clauses.get(id) else { return };

    if clause.positive_literal_count() == 1 && clause.literals.len() == 1 {
      self.processed_pos.insert(id);
      let literal = &clause.literals[0];
      if literal.positive {
        // Orient by the ordering, not by the literal's stored side order: a parsed `X = f(X)`
        // stores `lhs` first, but the rewrite rule has to point from the ordering-larger side.
        let (lhs, rhs) = literal.ordered_sides(self.ordering.as_ref());
        self.demodulators.push(Demodulator { lhs, rhs, source_clause: id });
      }
    } else {
      self.processed_neg_non_units.insert(id);
    }

    self.subterm_index.insert_clause(clause);
    self.feature_vector_index.insert(clause);
    let true_term = self.term_bank.true_term();
    if let Some(clause) = self.clauses.get(id) {
      self.overlap_index.insert_clause(clause, &true_term, self.ordering.as_ref());
    }
    if let Some(clause) = self.clauses.get_mut(id) {
      clause.properties.insert(crate::core::clause::ClauseProperty::Processed);
    }
  }

  /// Removes `id` from every bookkeeping structure (used when a clause is deleted by
  /// forward/back-simplification).
  pub fn retire(&mut self, id: ClauseId) {
    self.axioms.remove(&id);
    self.unprocessed.remove(&id);
    self.processed_pos.remove(&id);
    self.processed_neg_non_units.remove(&id);
    self.demodulators.retain(|d| d.source_clause != id);
    self.feature_vector_index.remove(id);
    self.overlap_index.remove_clause(id);
    if let Some(clause) = self.clauses.get(id) {
      self.subterm_index.remove_clause(clause);
    }
    self.clauses.remove(id);
  }

  pub fn processed_ids(&self) -> impl Iterator<Item = ClauseId> + '_ {
    self.processed_pos.iter().chain(self.processed_neg_non_units.iter()).copied()
  }
}
