/*!

Weight functions score a clause for a priority queue: lower weight means "pick me sooner". Several
named weight functions are provided, matching spec §4.8's menu — standard symbol-count weight,
FIFO (creation order), a FIFO/weight blend, a conjecture-symbol-favouring weight that discounts
symbols appearing in the negated conjecture, and a seeded pseudo-random weight used to diversify a
multi-queue schedule so that queues don't all converge on the same clause order.

*/

use sat_abs::HashMap;

use crate::core::clause::Clause;
use crate::core::signature::SymbolId;
use crate::core::term_bank::{Head, TermPtr};

pub trait WeightFunction {
  fn weight(&self, clause: &Clause) -> f64;
}

/// The clause's precomputed standard weight (sum of symbol-count term weights).
pub struct StandardWeight;

impl WeightFunction for StandardWeight {
  fn weight(&self, clause: &Clause) -> f64 {
    clause.standard_weight as f64
  }
}

/// Pure creation order: earliest-created clauses first.
pub struct Fifo;

impl WeightFunction for Fifo {
  fn weight(&self, clause: &Clause) -> f64 {
    clause.creation_date as f64
  }
}

/// A blend of standard weight and creation order, `weight + alpha * creation_date`, so that among
/// clauses of similar weight older ones are preferred.
pub struct FifoWeightBlend {
  pub alpha: f64,
}

impl WeightFunction for FifoWeightBlend {
  fn weight(&self, clause: &Clause) -> f64 {
    clause.standard_weight as f64 + self.alpha * clause.creation_date as f64
  }
}

/// Counts function symbols occurring in both sides of an equational literal, as a rough measure of
/// how "balanced" an equation is; more balanced equations (candidates for being already close to
/// their normal form) are favoured.
pub struct SimilarityOfSides;

impl WeightFunction for SimilarityOfSides {
  fn weight(&self, clause: &Clause) -> f64 {
    let mut total = 0.0;
    for literal in &clause.literals {
      let lhs = symbol_multiset(&literal.lhs);
      let rhs = symbol_multiset(&literal.rhs);
      let mut difference = 0u32;
      let mut all: HashMap<SymbolId, (u32, u32)> = HashMap::new();
      for (symbol, count) in lhs {
        all.entry(symbol).or_insert((0, 0)).0 += count;
      }
      for (symbol, count) in rhs {
        all.entry(symbol).or_insert((0, 0)).1 += count;
      }
      for (l, r) in all.values() {
        difference += l.abs_diff(*r);
      }
      total += difference as f64;
    }
    total
  }
}

fn symbol_multiset(term: &TermPtr) -> Vec<(SymbolId, u32)> {
  let mut counts: HashMap<SymbolId, u32> = HashMap::new();
  collect(term, &mut counts);
  counts.into_iter().collect()
}

fn collect(term: &TermPtr, counts: &mut HashMap<SymbolId, u32>) {
  if let Head::Symbol(symbol) = term.head {
    *counts.entry(symbol).or_insert(0) += 1;
  }
  for arg in &term.args {
    collect(arg, counts);
  }
}

/// Discounts the weight of symbols that occur in a distinguished "conjecture" set, nudging the
/// search toward clauses that talk about the goal.
pub struct ConjectureSymbolWeight {
  pub conjecture_symbols: std::collections::HashSet<SymbolId>,
  pub discount: f64,
}

impl WeightFunction for ConjectureSymbolWeight {
  fn weight(&self, clause: &Clause) -> f64 {
    let mut weight = clause.standard_weight as f64;
    for literal in &clause.literals {
      weight -= self.discount * (occurrences_of_conjecture_symbols(&literal.lhs, &self.conjecture_symbols) + occurrences_of_conjecture_symbols(&literal.rhs, &self.conjecture_symbols)) as f64;
    }
    weight.max(0.0)
  }
}

fn occurrences_of_conjecture_symbols(term: &TermPtr, conjecture_symbols: &std::collections::HashSet<SymbolId>) -> u32 {
  let mut count = 0;
  if let Head::Symbol(symbol) = term.head {
    if conjecture_symbols.contains(&symbol) {
      count += 1;
    }
  }
  for arg in &term.args {
    count += occurrences_of_conjecture_symbols(arg, conjecture_symbols);
  }
  count
}

/// A deterministic, seeded pseudo-random weight (xorshift64), used only to break symmetry between
/// otherwise-tied clauses across multiple queues in the same run; reseeding with the same seed
/// always reproduces the same sequence (spec §9's determinism requirement).
pub struct SeededRandomWeight {
  state: std::cell::Cell<u64>,
}

impl SeededRandomWeight {
  pub fn new(seed: u64) -> Self {
    Self { state: std::cell::Cell::new(seed.max(1)) }
  }

  fn next(&self) -> u64 {
    let mut x = self.state.get();
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    self.state.set(x);
    x
  }
}

impl WeightFunction for SeededRandomWeight {
  fn weight(&self, clause: &Clause) -> f64 {
    let _ = clause;
    (self.next() % 1_000_000) as f64
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

  #[test]
  fn fifo_blend_prefers_earlier_clauses_at_equal_weight() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let individual = signature.sorts.individual();
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let ta = bank.intern_term(&a_sym, sat_abs::SmallVec::new()).unwrap();
    let true_term = bank.true_term();

    let early = Clause::new(ClauseId(1), vec![Literal::new(ta.clone(), true_term.clone(), true)], None);
    let late = Clause::new(ClauseId(9), vec![Literal::new(ta, true_term, true)], None);

    let blend = FifoWeightBlend { alpha: 0.01 };
    assert!(blend.weight(&early) < blend.weight(&late));
  }

  #[test]
  fn seeded_random_weight_is_deterministic_for_a_fixed_seed() {
    let a = SeededRandomWeight::new(42);
    let b = SeededRandomWeight::new(42);
    let clause = Clause::new(ClauseId(1), Vec::new(), None);
    assert_eq!(a.weight(&clause), b.weight(&clause));
    assert_eq!(a.weight(&clause), b.weight(&clause));
  }
}
