/*!

Knuth–Bendix ordering: every symbol gets a non-negative weight (variables all share one fixed
weight), terms compare first by total weight, ties broken by precedence and then left-to-right by
the first argument position whose weights differ, recursing into that position.

*/

use std::cmp::Ordering as StdOrdering;

use sat_abs::HashMap;

use crate::core::ordering::{ComparisonResult, Ordering, Precedence};
use crate::core::signature::SymbolId;
use crate::core::term_bank::{term_ptr_eq, Head, TermPtr};

pub struct Kbo {
  precedence: Precedence,
  symbol_weight: HashMap<SymbolId, u32>,
  default_weight: u32,
  variable_weight: u32,
}

impl Kbo {
  pub fn new(precedence: Precedence) -> Self {
    Self { precedence, symbol_weight: HashMap::new(), default_weight: 1, variable_weight: 1 }
  }

  pub fn with_weight(mut self, symbol: SymbolId, weight: u32) -> Self {
    self.symbol_weight.insert(symbol, weight);
    self
  }

  fn weight_of(&self, symbol: SymbolId) -> u32 {
    self.symbol_weight.get(&symbol).copied().unwrap_or(self.default_weight)
  }

  /// The KBO weight of `term`: a weighted node count, using the fixed `variable_weight` for
  /// variable occurrences.
  fn weight(&self, term: &TermPtr) -> u32 {
    match &term.head {
      Head::Variable(..) => self.variable_weight,
      Head::Symbol(symbol) => {
        let mut total = self.weight_of(*symbol);
        for arg in &term.args {
          total += self.weight(arg);
        }
        total
      }
    }
  }

  /// Variable-occurrence multiset comparison: KBO requires that every variable occurs in `t` at
  /// least as often as in `s` before `s` can be declared greater (this is what makes KBO total on
  /// ground terms but only a partial, substitution-stable order in general).
  fn variable_counts_permit(&self, s: &TermPtr, t: &TermPtr) -> bool {
    let mut counts: HashMap<u32, i64> = HashMap::new();
    count_variables(s, 1, &mut counts);
    count_variables(t, -1, &mut counts);
    counts.values().all(|&c| c >= 0)
  }
}

fn count_variables(term: &TermPtr, sign: i64, counts: &mut HashMap<u32, i64>) {
  match &term.head {
    Head::Variable(index, _) => {
      *counts.entry(index.0).or_insert(0) += sign;
    }
    Head::Symbol(_) => {
      for arg in &term.args {
        count_variables(arg, sign, counts);
      }
    }
  }
}

impl Ordering for Kbo {
  fn compare_uncached(&self, s: &TermPtr, t: &TermPtr) -> ComparisonResult {
    if term_ptr_eq(s, t) {
      return ComparisonResult::Equal;
    }

    let ws = self.weight(s);
    let wt = self.weight(t);

    if !self.variable_counts_permit(s, t) {
      return if self.variable_counts_permit(t, s) && wt <= ws {
        ComparisonResult::Less
      } else {
        ComparisonResult::Uncomparable
      };
    }

    match ws.cmp(&wt) {
      StdOrdering::Greater => ComparisonResult::Greater,
      StdOrdering::Less => ComparisonResult::Less,
      StdOrdering::Equal => self.compare_same_weight(s, t),
    }
  }
}

impl Kbo {
  fn compare_same_weight(&self, s: &TermPtr, t: &TermPtr) -> ComparisonResult {
    match (&s.head, &t.head) {
      (Head::Variable(..), Head::Variable(..)) => ComparisonResult::Equal,
      (Head::Variable(..), Head::Symbol(_)) => ComparisonResult::Uncomparable,
      (Head::Symbol(_), Head::Variable(..)) => ComparisonResult::Uncomparable,
      (Head::Symbol(f), Head::Symbol(g)) => {
        if f == g {
          for (si, ti) in s.args.iter().zip(t.args.iter()) {
            if term_ptr_eq(si, ti) {
              continue;
            }
            return self.compare_uncached(si, ti);
          }
          ComparisonResult::Equal
        } else {
          match self.precedence.compare(*f, *g) {
            StdOrdering::Greater => ComparisonResult::Greater,
            StdOrdering::Less => ComparisonResult::Less,
            StdOrdering::Equal => ComparisonResult::Uncomparable,
          }
        }
      }
    }
  }
}
