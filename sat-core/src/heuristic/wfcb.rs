/*!

A weight-function combinator block (WFCB) composes primitive weight functions into the one used by
a priority queue: scale, add a constant, take a minimum/maximum of several, or gate one weight
function behind a predicate on the clause (e.g. "only apply the conjecture-symbol discount to
clauses with at most 3 literals"). This mirrors spec §4.8's combinator layer sitting above the named
weight functions in `super::weights`.

*/

use crate::core::clause::Clause;
use crate::heuristic::weights::WeightFunction;

/// Scales an inner weight function's output by a constant factor.
pub struct Scale<W> {
  pub inner: W,
  pub factor: f64,
}

impl<W: WeightFunction> WeightFunction for Scale<W> {
  fn weight(&self, clause: &Clause) -> f64 {
    self.inner.weight(clause) * self.factor
  }
}

/// Adds a constant offset to an inner weight function's output.
pub struct AddConstant<W> {
  pub inner: W,
  pub constant: f64,
}

impl<W: WeightFunction> WeightFunction for AddConstant<W> {
  fn weight(&self, clause: &Clause) -> f64 {
    self.inner.weight(clause) + self.constant
  }
}

/// The pointwise minimum of a set of weight functions — picks whichever function is most
/// optimistic about a given clause.
pub struct Min {
  pub functions: Vec<Box<dyn WeightFunction>>,
}

impl WeightFunction for Min {
  fn weight(&self, clause: &Clause) -> f64 {
    self.functions.iter().map(|f| f.weight(clause)).fold(f64::INFINITY, f64::min)
  }
}

/// The pointwise maximum of a set of weight functions.
pub struct Max {
  pub functions: Vec<Box<dyn WeightFunction>>,
}

impl WeightFunction for Max {
  fn weight(&self, clause: &Clause) -> f64 {
    self.functions.iter().map(|f| f.weight(clause)).fold(f64::NEG_INFINITY, f64::max)
  }
}

/// Applies `then` when `predicate(clause)` holds, `otherwise` when it does not.
pub struct Conditional<P, W1, W2> {
  pub predicate: P,
  pub then: W1,
  pub otherwise: W2,
}

impl<P, W1, W2> WeightFunction for Conditional<P, W1, W2>
where
  P: Fn(&Clause) -> bool,
  W1: WeightFunction,
  W2: WeightFunction,
{
  fn weight(&self, clause: &Clause) -> f64 {
    if (self.predicate)(clause) {
      self.then.weight(clause)
    } else {
      self.otherwise.weight(clause)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::clause::ClauseId;
  use crate::heuristic::weights::StandardWeight;

  fn clause(weight: u32) -> Clause {
    let mut c = Clause::new(ClauseId(1), Vec::new(), None);
    c.standard_weight = weight;
    c
  }

  #[test]
  fn scale_multiplies_inner_weight() {
    let scaled = Scale { inner: StandardWeight, factor: 2.0 };
    assert_eq!(scaled.weight(&clause(5)), 10.0);
  }

  #[test]
  fn min_picks_the_smaller_branch() {
    let min = Min { functions: vec![Box::new(StandardWeight), Box::new(AddConstant { inner: StandardWeight, constant: -100.0 })] };
    assert_eq!(min.weight(&clause(5)), -95.0);
  }

  #[test]
  fn conditional_dispatches_on_predicate() {
    let conditional = Conditional { predicate: |c: &Clause| c.literals.is_empty(), then: AddConstant { inner: StandardWeight, constant: 0.0 }, otherwise: Scale { inner: StandardWeight, factor: 10.0 } };
    assert_eq!(conditional.weight(&clause(3)), 30.0);
  }
}
