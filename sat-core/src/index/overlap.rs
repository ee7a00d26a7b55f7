/*!

Overlap indices support paramodulation: a *from*-index over oriented equations' maximal sides
(candidates to paramodulate *from*), and an *into*-index over non-variable subterms of all literals
(candidates to paramodulate *into*). Distinguished because only the former needs an equation's
larger side, while the latter needs every rewritable subterm (spec §4.5.3).

Both sides are backed by a [`FingerprintIndex`]: unlike a pointer-identity lookup, fingerprint
compatibility is a sound over-approximation of unifiability, so candidates retrieved here are never
missing a term that genuinely could have overlapped.

*/

use sat_abs::HashMap;

use crate::core::clause::{Clause, ClauseId};
use crate::core::literal::Literal;
use crate::core::ordering::Ordering;
use crate::core::term_bank::{Head, TermPtr};
use crate::index::fingerprint::FingerprintIndex;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OverlapPosition {
  pub clause: ClauseId,
  pub literal: usize,
}

fn non_variable_subterms(term: &TermPtr, out: &mut Vec<TermPtr>) {
  if let Head::Variable(..) = term.head {
    return;
  }
  out.push(term.clone());
  for arg in &term.args {
    non_variable_subterms(arg, out);
  }
}

#[derive(Default)]
pub struct OverlapIndex {
  from_index: FingerprintIndex,
  into_index: FingerprintIndex,
  /// What was inserted for each clause, so `remove_clause` can undo precisely without rescanning
  /// every bucket in either trie.
  by_clause: HashMap<ClauseId, Vec<(TermPtr, usize, bool)>>,
}

impl OverlapIndex {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert_from(&mut self, term: &TermPtr, position: OverlapPosition) {
    self.from_index.insert(term, position.clause, position.literal);
    self.by_clause.entry(position.clause).or_default().push((term.clone(), position.literal, true));
  }

  pub fn insert_into(&mut self, term: &TermPtr, position: OverlapPosition) {
    self.into_index.insert(term, position.clause, position.literal);
    self.by_clause.entry(position.clause).or_default().push((term.clone(), position.literal, false));
  }

  /// Registers every candidate position of `clause`: the ordering-larger side of each maximal
  /// positive equation as a *from* term, and every non-variable subterm of every literal as an
  /// *into* term.
  pub fn insert_clause(&mut self, clause: &Clause, true_term: &TermPtr, ordering: &dyn Ordering) {
    for (literal_index, literal) in clause.literals.iter().enumerate() {
      if literal.positive && literal.is_equational(true_term) && literal.is_maximal() {
        let (from_term, _) = literal.ordered_sides(ordering);
        self.insert_from(&from_term, OverlapPosition { clause: clause.id, literal: literal_index });
      }
      for side in [&literal.lhs, &literal.rhs] {
        let mut subterms = Vec::new();
        non_variable_subterms(side, &mut subterms);
        for subterm in subterms {
          self.insert_into(&subterm, OverlapPosition { clause: clause.id, literal: literal_index });
        }
      }
    }
  }

  pub fn remove_clause(&mut self, clause: ClauseId) {
    if let Some(entries) = self.by_clause.remove(&clause) {
      for (term, literal, is_from) in entries {
        if is_from {
          self.from_index.remove(&term, clause, literal);
        } else {
          self.into_index.remove(&term, clause, literal);
        }
      }
    }
  }

  /// Candidates that might be paramodulated *from* into `term`.
  pub fn from_candidates(&self, term: &TermPtr) -> Vec<OverlapPosition> {
    self.from_index.find_unifiable(term).into_iter().map(|(clause, literal)| OverlapPosition { clause, literal }).collect()
  }

  /// Candidates `term` might be paramodulated *into*.
  pub fn into_candidates(&self, term: &TermPtr) -> Vec<OverlapPosition> {
    self.into_index.find_unifiable(term).into_iter().map(|(clause, literal)| OverlapPosition { clause, literal }).collect()
  }
}

// Kept for callers that still only have a raw `Literal` at hand (e.g. unit tests).
#[allow(dead_code)]
fn literal_sides(literal: &Literal) -> (&TermPtr, &TermPtr) {
  (&literal.lhs, &literal.rhs)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::ordering::{Lpo, Precedence};
  use crate::core::signature::Signature;
  use crate::core::term_bank::{term_ptr_eq, TermBank};
  use enumflags2::BitFlags;

  #[test]
  fn from_and_into_sides_are_tracked_independently() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let individual = signature.sorts.individual();
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let ta = bank.intern_term(&a_sym, sat_abs::SmallVec::new()).unwrap();

    let mut index = OverlapIndex::new();
    index.insert_from(&ta, OverlapPosition { clause: ClauseId(1), literal: 0 });
    assert_eq!(index.from_candidates(&ta).len(), 1);
    assert!(index.into_candidates(&ta).is_empty());

    index.remove_clause(ClauseId(1));
    assert!(index.from_candidates(&ta).is_empty());
  }

  #[test]
  fn insert_clause_indexes_maximal_equation_and_every_subterm() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let individual = signature.sorts.individual();
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let b = signature.declare("b", 0, individual, BitFlags::empty());
    let f = signature.declare("f", 1, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let b_sym = signature.symbol(b).clone();
    let f_sym = signature.symbol(f).clone();

    let ta = bank.intern_term(&a_sym, sat_abs::SmallVec::new()).unwrap();
    let tb = bank.intern_term(&b_sym, sat_abs::SmallVec::new()).unwrap();
    let fa = bank.intern_term(&f_sym, sat_abs::SmallVec::from_vec(vec![ta.clone()])).unwrap();

    let precedence = Precedence::from_order([b, a, f]);
    let lpo = Lpo::new(precedence);
    let true_term = bank.true_term();

    let mut clause = Clause::new(ClauseId(7), vec![Literal::new(fa.clone(), tb.clone(), true)], None);
    lpo.mark_maximal_literals(&mut clause);

    let mut index = OverlapIndex::new();
    index.insert_clause(&clause, &true_term, &lpo);

    let from_hits = index.from_candidates(&fa);
    assert!(from_hits.iter().any(|p| p.clause == ClauseId(7)));

    let into_hits = index.into_candidates(&ta);
    assert!(into_hits.iter().any(|p| p.clause == ClauseId(7)));
    let _ = term_ptr_eq(&ta, &ta);
  }
}
