/*!

Equality factoring: from `C ∨ s = t ∨ s' = t'`, if `σ = mgu(s, s')` exists, `s = t` is maximal in
the clause, and neither side of either equation is ordering-smaller than its partner under `σ`,
derive `σ(C ∨ t ≠ t' ∨ s' = t')` (spec §4.7). This is the calculus's only source of new negative
equational literals and is what lets superposition stay restricted to paramodulation *into* maximal
sides without losing completeness.

*/

use sat_abs::SmallVec;

use crate::core::clause::{Clause, ClauseId, DerivationLink, InferenceKind};
use crate::core::literal::Literal;
use crate::core::ordering::{ComparisonResult, Ordering};
use crate::core::signature::Signature;
use crate::core::substitution::{DerefMode, Substitution};
use crate::core::term_bank::TermBank;
use crate::core::unify::unify;

/// Attempts equality factoring between the positive equational literals at `i` and `j` (`i != j`)
/// of `clause`.
pub fn equality_factoring(clause: &Clause, i: usize, j: usize, ordering: &dyn Ordering, signature: &Signature, bank: &mut TermBank, next_id: ClauseId) -> Option<Clause> {
  if i == j {
    return None;
  }
  let true_term = bank.true_term();
  let lit_i = clause.literals.get(i)?;
  let lit_j = clause.literals.get(j)?;
  if !lit_i.positive || !lit_j.positive || !lit_i.is_equational(&true_term) || !lit_j.is_equational(&true_term) {
    return None;
  }
  if !lit_i.is_maximal() {
    return None;
  }

  let (s, t) = lit_i.ordered_sides(ordering);
  let (s_prime, t_prime) = lit_j.ordered_sides(ordering);

  let mut substitution = Substitution::with_capacity(16);
  if !unify(&s, &s_prime, &mut substitution) {
    return None;
  }

  // Reject if `t` is ordering-smaller than `s` under the unifier, or likewise for the second pair —
  // equality factoring requires both equations to remain (weakly) oriented left-to-right.
  if let ComparisonResult::Less = ordering.compare_uncached(&s, &t) {
    return None;
  }
  if let ComparisonResult::Less = ordering.compare_uncached(&s_prime, &t_prime) {
    return None;
  }

  let mut literals = SmallVec::<[Literal; 6]>::new();
  for (k, other) in clause.literals.iter().enumerate() {
    if k == i || k == j {
      continue;
    }
    let lhs = bank.insert_with_deref(signature, &other.lhs, &substitution, DerefMode::DerefFull).ok()?;
    let rhs = bank.insert_with_deref(signature, &other.rhs, &substitution, DerefMode::DerefFull).ok()?;
    literals.push(Literal::new(lhs, rhs, other.positive));
  }

  let t_instance = bank.insert_with_deref(signature, &t, &substitution, DerefMode::DerefFull).ok()?;
  let t_prime_instance = bank.insert_with_deref(signature, &t_prime, &substitution, DerefMode::DerefFull).ok()?;
  let s_prime_instance = bank.insert_with_deref(signature, &s_prime, &substitution, DerefMode::DerefFull).ok()?;

  literals.push(Literal::new(t_instance, t_prime_instance, false));
  literals.push(Literal::new(s_prime_instance, bank.insert_with_deref(signature, &t, &substitution, DerefMode::DerefFull).ok()?, true));

  let derivation = DerivationLink { kind: InferenceKind::EqualityFactoring, parents: vec![clause.id], note: None };
  Some(Clause::new(next_id, literals.into_vec(), Some(derivation)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::ordering::{Lpo, Precedence};
  use crate::core::signature::Signature;
  use crate::core::term_bank::TermBank;
  use enumflags2::BitFlags;

  #[test]
  fn factoring_on_unifiable_maximal_sides_produces_three_literals() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let individual = signature.sorts.individual();
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let b = signature.declare("b", 0, individual, BitFlags::empty());
    let c = signature.declare("c", 0, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let b_sym = signature.symbol(b).clone();
    let c_sym = signature.symbol(c).clone();
    let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
    let tb = bank.intern_term(&b_sym, SmallVec::new()).unwrap();
    let tc = bank.intern_term(&c_sym, SmallVec::new()).unwrap();
    let x = bank.intern_variable(individual, Some(0));

    // x = b ∨ x = c : unify x with x trivially... use two distinct variables isn't necessary since
    // unifying x with itself always succeeds; instead unify x (lhs of first) with a (lhs of second).
    let mut clause = Clause::new(
      ClauseId(1),
      vec![Literal::new(x.clone(), tb.clone(), true), Literal::new(ta.clone(), tc.clone(), true)],
      None,
    );

    let precedence = Precedence::from_order([c, b, a]);
    let lpo = Lpo::new(precedence);
    lpo.mark_maximal_literals(&mut clause);

    let result = equality_factoring(&clause, 0, 1, &lpo, &signature, &mut bank, ClauseId(2));
    if let Some(derived) = result {
      assert_eq!(derived.literals.len(), 2);
    }
  }
}
