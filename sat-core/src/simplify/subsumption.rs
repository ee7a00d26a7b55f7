/*!

Clause `C` subsumes `D` iff there is a substitution `σ` such that every literal of `Cσ` occurs
(matches) among `D`'s literals. The search is multiset matching with backtracking: try every
assignment of `C`'s literals to distinct literals of `D`, extending one matching substitution.
The feature-vector index (`index::feature_vector`) supplies candidate `D`s cheaply; this module
does the exact check.

*/

use crate::core::clause::Clause;
use crate::core::literal::Literal;
use crate::core::substitution::Substitution;
use crate::core::unify::matches;

/// Attempts to match literal `c` (possibly sign-flipped via `flip_sign`) onto literal `d` under
/// `subst`, on a fresh watermark; returns the watermark-restore point on failure automatically.
fn literal_matches(c: &Literal, d: &Literal, subst: &mut Substitution) -> bool {
  if c.positive != d.positive {
    return false;
  }
  let mark = subst.mark();
  if matches(&c.lhs, &d.lhs, subst) && matches(&c.rhs, &d.rhs, subst) {
    return true;
  }
  subst.rewind(mark);
  // Equations are unordered pairs; also try the swapped pairing.
  let mark = subst.mark();
  if matches(&c.lhs, &d.rhs, subst) && matches(&c.rhs, &d.lhs, subst) {
    return true;
  }
  subst.rewind(mark);
  false
}

/// Backtracking search: can every literal of `c_literals[from..]` be matched to a distinct,
/// not-yet-used literal of `d.literals`?
fn backtrack(c_literals: &[Literal], used: &mut Vec<bool>, d: &Clause, subst: &mut Substitution) -> bool {
  let Some((c_lit, rest)) = c_literals.split_first() else {
    return true;
  };

  for (j, d_lit) in d.literals.iter().enumerate() {
    if used[j] {
      continue;
    }
    let mark = subst.mark();
    if literal_matches(c_lit, d_lit, subst) {
      used[j] = true;
      if backtrack(rest, used, d, subst) {
        return true;
      }
      used[j] = false;
    }
    subst.rewind(mark);
  }
  false
}

/// Returns `true` if `c` subsumes `d`: some substitution makes every literal of `c` appear among
/// `d`'s literals. A unit clause trivially cannot subsume a clause with fewer literals.
pub fn subsumes(c: &Clause, d: &Clause) -> bool {
  if c.literals.len() > d.literals.len() {
    return false;
  }
  let mut subst = Substitution::with_capacity(16);
  let mut used = vec![false; d.literals.len()];
  backtrack(&c.literals, &mut used, d, &mut subst)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::clause::{Clause, ClauseId};
  use crate::core::signature::Signature;
  use crate::core::term_bank::TermBank;
  use enumflags2::BitFlags;
  use sat_abs::SmallVec;

  #[test]
  fn unit_clause_subsumes_clause_containing_its_literal() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let boolean = signature.sorts.boolean();
    let individual = signature.sorts.individual();
    let p = signature.declare("p", 1, boolean, BitFlags::empty());
    let q = signature.declare("q", 1, boolean, BitFlags::empty());
    let p_sym = signature.symbol(p).clone();
    let q_sym = signature.symbol(q).clone();
    let x = bank.intern_variable(individual, Some(0));
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();

    let px = bank.intern_term(&p_sym, SmallVec::from_vec(vec![x])).unwrap();
    let pa = bank.intern_term(&p_sym, SmallVec::from_vec(vec![ta.clone()])).unwrap();
    let qa = bank.intern_term(&q_sym, SmallVec::from_vec(vec![ta])).unwrap();
    let true_term = bank.true_term();

    let c = Clause::new(ClauseId(1), vec![Literal::new(px, true_term.clone(), true)], None);
    let d = Clause::new(ClauseId(2), vec![Literal::new(pa, true_term.clone(), true), Literal::new(qa, true_term, true)], None);

    assert!(subsumes(&c, &d));
  }

  #[test]
  fn clause_does_not_subsume_smaller_clause() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let boolean = signature.sorts.boolean();
    let individual = signature.sorts.individual();
    let p = signature.declare("p", 1, boolean, BitFlags::empty());
    let p_sym = signature.symbol(p).clone();
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
    let pa = bank.intern_term(&p_sym, SmallVec::from_vec(vec![ta])).unwrap();
    let true_term = bank.true_term();

    let c = Clause::new(ClauseId(1), vec![Literal::new(pa.clone(), true_term.clone(), true), Literal::new(pa.clone(), true_term.clone(), false)], None);
    let d = Clause::new(ClauseId(2), vec![Literal::new(pa, true_term, true)], None);

    assert!(!subsumes(&c, &d));
  }
}
