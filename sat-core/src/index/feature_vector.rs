/*!

A feature vector is a tuple of integer features computed for a clause: literal counts by sign,
per-symbol occurrence counts weighted by sign, and the like. Clause `C` can subsume `D` only if
every feature of `C` is `<=` the corresponding feature of `D` (a necessary, not sufficient,
condition — spec §4.5.2). Grounded in `original_source/CLAUSES/ccl_findex.c`.

*/

use sat_abs::HashMap;

use crate::core::clause::{Clause, ClauseId};
use crate::core::signature::SymbolId;
use crate::core::term_bank::Head;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FeatureVector {
  pub positive_literals: u32,
  pub negative_literals: u32,
  /// Per-symbol `(positive occurrences, negative occurrences)`, sorted by symbol for a stable,
  /// comparable representation.
  pub symbol_counts: Vec<(SymbolId, u32, u32)>,
}

impl FeatureVector {
  pub fn of(clause: &Clause) -> Self {
    let mut positive_literals = 0;
    let mut negative_literals = 0;
    let mut counts: HashMap<SymbolId, (u32, u32)> = HashMap::new();

    for literal in &clause.literals {
      if literal.positive {
        positive_literals += 1;
      } else {
        negative_literals += 1;
      }
      count_symbols(&literal.lhs, literal.positive, &mut counts);
      count_symbols(&literal.rhs, literal.positive, &mut counts);
    }

    let mut symbol_counts: Vec<(SymbolId, u32, u32)> = counts.into_iter().map(|(s, (p, n))| (s, p, n)).collect();
    symbol_counts.sort_by_key(|&(s, _, _)| s.0);

    Self { positive_literals, negative_literals, symbol_counts }
  }

  /// `self <= other` pointwise, the necessary condition for `self`'s clause to possibly subsume
  /// `other`'s clause.
  pub fn dominated_by(&self, other: &FeatureVector) -> bool {
    if self.positive_literals > other.positive_literals || self.negative_literals > other.negative_literals {
      return false;
    }
    for &(symbol, p, n) in &self.symbol_counts {
      let (op, on) = other.symbol_counts.iter().find(|&&(s, _, _)| s == symbol).map(|&(_, p, n)| (p, n)).unwrap_or((0, 0));
      if p > op || n > on {
        return false;
      }
    }
    true
  }
}

fn count_symbols(term: &crate::core::term_bank::TermPtr, positive: bool, counts: &mut HashMap<SymbolId, (u32, u32)>) {
  if let Head::Symbol(symbol) = term.head {
    let entry = counts.entry(symbol).or_insert((0, 0));
    if positive {
      entry.0 += 1;
    } else {
      entry.1 += 1;
    }
  }
  for arg in &term.args {
    count_symbols(arg, positive, counts);
  }
}

/// A flat list of `(clause, feature vector)` pairs. A true implementation indexes this as a trie
/// for fast downward/upward traversal; the list representation here preserves the "necessity"
/// contract (spec §8's "feature-vector necessity" property) and is adequate at the scale this
/// engine targets without the extra trie machinery.
#[derive(Default)]
pub struct FeatureVectorIndex {
  entries: Vec<(ClauseId, FeatureVector)>,
}

impl FeatureVectorIndex {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, clause: &Clause) {
    self.entries.push((clause.id, FeatureVector::of(clause)));
  }

  pub fn remove(&mut self, id: ClauseId) {
    self.entries.retain(|(existing, _)| *existing != id);
  }

  /// Clauses whose feature vector is dominated by `query`'s — i.e. candidates that `query`'s
  /// clause might subsume.
  pub fn potential_subsumees(&self, query: &FeatureVector) -> Vec<ClauseId> {
    self.entries.iter().filter(|(_, fv)| query.dominated_by(fv)).map(|(id, _)| *id).collect()
  }

  /// Clauses whose feature vector dominates `query`'s — i.e. candidates that might subsume
  /// `query`'s clause.
  pub fn potential_subsumers(&self, query: &FeatureVector) -> Vec<ClauseId> {
    self.entries.iter().filter(|(_, fv)| fv.dominated_by(query)).map(|(id, _)| *id).collect()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::clause::ClauseId;
  use crate::core::literal::Literal;
  use crate::core::signature::Signature;
  use crate::core::term_bank::TermBank;
  use enumflags2::BitFlags;
  use sat_abs::SmallVec;

  #[test]
  fn feature_vector_necessity_excludes_non_candidates() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let individual = signature.sorts.individual();
    let p = signature.declare("p", 1, signature.sorts.boolean(), BitFlags::empty());
    let q = signature.declare("q", 1, signature.sorts.boolean(), BitFlags::empty());
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let p_sym = signature.symbol(p).clone();
    let q_sym = signature.symbol(q).clone();
    let a_sym = signature.symbol(a).clone();
    let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
    let pa = bank.intern_term(&p_sym, SmallVec::from_vec(vec![ta.clone()])).unwrap();
    let qa = bank.intern_term(&q_sym, SmallVec::from_vec(vec![ta.clone()])).unwrap();
    let true_term = bank.true_term();

    let c_lits = vec![Literal::new(pa.clone(), true_term.clone(), true)];
    let c = crate::core::clause::Clause::new(ClauseId(1), c_lits, None);
    let d_lits = vec![Literal::new(pa, true_term.clone(), true), Literal::new(qa, true_term, true)];
    let d = crate::core::clause::Clause::new(ClauseId(2), d_lits, None);

    let mut index = FeatureVectorIndex::new();
    index.insert(&d);

    let query = FeatureVector::of(&c);
    let candidates = index.potential_subsumees(&query);
    assert!(candidates.contains(&ClauseId(2)));
  }
}
