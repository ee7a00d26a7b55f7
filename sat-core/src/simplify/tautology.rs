/*!

Tautology deletion (spec §4.6): a clause is a tautology, and can be discarded outright, if it is
trivially valid. Two syntactic cases are checked: a positive unit equality `t = t` (reflexivity),
and a complementary pair of literals `L` and `¬L` occurring syntactically identically in the same
clause. The reflexivity check also covers unit-equality tautologies modulo demodulation, since
callers normalise clauses before testing.

*/

use crate::core::clause::Clause;
use crate::core::literal::Literal;
use crate::core::term_bank::term_ptr_eq;

fn literal_eq(a: &Literal, b: &Literal) -> bool {
  (term_ptr_eq(&a.lhs, &b.lhs) && term_ptr_eq(&a.rhs, &b.rhs)) || (term_ptr_eq(&a.lhs, &b.rhs) && term_ptr_eq(&a.rhs, &b.lhs))
}

/// Returns `true` if `clause` is a tautology and may be discarded without loss of completeness.
pub fn is_tautology(clause: &Clause) -> bool {
  for literal in &clause.literals {
    if literal.positive && term_ptr_eq(&literal.lhs, &literal.rhs) {
      return true;
    }
  }

  for (i, a) in clause.literals.iter().enumerate() {
    for b in &clause.literals[i + 1..] {
      if a.positive != b.positive && literal_eq(a, b) {
        return true;
      }
    }
  }

  false
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::clause::ClauseId;
  use crate::core::signature::Signature;
  use crate::core::term_bank::TermBank;
  use enumflags2::BitFlags;
  use sat_abs::SmallVec;

  #[test]
  fn reflexive_positive_equation_is_a_tautology() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let individual = signature.sorts.individual();
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();

    let clause = Clause::new(ClauseId(1), vec![Literal::new(ta.clone(), ta, true)], None);
    assert!(is_tautology(&clause));
  }

  #[test]
  fn complementary_literal_pair_is_a_tautology() {
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

    let clause = Clause::new(ClauseId(1), vec![Literal::new(pa.clone(), true_term.clone(), true), Literal::new(pa, true_term, false)], None);
    assert!(is_tautology(&clause));
  }

  #[test]
  fn non_tautologous_clause_is_not_flagged() {
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

    let clause = Clause::new(ClauseId(1), vec![Literal::new(pa, true_term, true)], None);
    assert!(!is_tautology(&clause));
  }
}
