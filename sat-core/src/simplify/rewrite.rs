/*!

Normal-form computation (demodulation): given a clause and an indexed set of oriented positive
unit equalities, rewrite each subterm to normal form by repeatedly finding `l = r` with `lσ`
matching the subterm and `lσ > rσ`, replacing by `rσ`. Rewriting terminates because the ordering
does (spec §4.6's first invariant).

A subterm flagged "restricted" may only be rewritten by a demodulator whose left-hand side is
strictly more general, or whose right-hand side is strictly smaller under the ordering — this is
what keeps the calculus complete when positive unit equalities double as their own rewrite rules.

*/

use sat_abs::SmallVec;

use crate::core::clause::Clause;
use crate::core::ordering::{ComparisonResult, Ordering};
use crate::core::signature::Signature;
use crate::core::substitution::{DerefMode, Substitution};
use crate::core::term_bank::{term_ptr_eq, Head, TermBank, TermPtr};
use crate::core::unify::matches;

/// One oriented rewrite rule `lhs -> rhs`, `lhs > rhs` under the ordering.
#[derive(Clone)]
pub struct Demodulator {
  pub lhs: TermPtr,
  pub rhs: TermPtr,
  pub source_clause: crate::core::clause::ClauseId,
}

/// Rewrites `term` to normal form against `demodulators`, returning the normal form (identical to
/// `term`, by pointer, if already normal). `restricted` positions only accept demodulators whose
/// left-hand side properly generalises the subterm or whose right-hand side is ordering-smaller.
pub fn rewrite_to_normal_form(
  term: &TermPtr,
  demodulators: &[Demodulator],
  ordering: &dyn Ordering,
  signature: &Signature,
  bank: &mut TermBank,
  restricted: bool,
) -> TermPtr {
  let mut current = term.clone();
  loop {
    match try_rewrite_step(&current, demodulators, ordering, signature, bank, restricted) {
      Some(next) => current = next,
      None => return current,
    }
  }
}

fn try_rewrite_step(term: &TermPtr, demodulators: &[Demodulator], ordering: &dyn Ordering, signature: &Signature, bank: &mut TermBank, restricted: bool) -> Option<TermPtr> {
  // Try to rewrite at the root first.
  for demod in demodulators {
    let mut subst = Substitution::with_capacity(demod.lhs.variable_count.max(1) as usize + 8);
    if matches(&demod.lhs, term, &mut subst) {
      let rhs_instance = bank.insert_with_deref(signature, &demod.rhs, &subst, DerefMode::DerefFull).ok()?;
      if restricted && !demodulator_permitted_on_restricted(demod, &rhs_instance, ordering) {
        continue;
      }
      if let ComparisonResult::Greater = ordering.compare_uncached(term, &rhs_instance) {
        return Some(rhs_instance);
      }
    }
  }

  // Otherwise recurse into arguments, left to right, taking the first subterm that rewrites.
  if let Head::Symbol(symbol_id) = term.head {
    for (i, arg) in term.args.iter().enumerate() {
      if let Some(rewritten_arg) = try_rewrite_step(arg, demodulators, ordering, signature, bank, restricted) {
        let symbol = signature.symbol(symbol_id).clone();
        let mut new_args: SmallVec<[TermPtr; 4]> = term.args.clone();
        new_args[i] = rewritten_arg;
        return bank.intern_term(&symbol, new_args).ok();
      }
    }
  }
  None
}

fn demodulator_permitted_on_restricted(demod: &Demodulator, rhs_instance: &TermPtr, ordering: &dyn Ordering) -> bool {
  // A positive unit equality used as its own rewrite rule is permitted on a restricted position
  // only when its right-hand side instance is strictly smaller than its left-hand side instance,
  // which `try_rewrite_step`'s ordering check already guarantees; here we additionally require
  // that the rule not be a trivial identity-shaped self-application.
  !term_ptr_eq(&demod.lhs, rhs_instance)
}

/// Recomputes a clause's standard weight after normal-form rewriting replaces its literals.
pub fn renormalize_clause(clause: &mut Clause, demodulators: &[Demodulator], ordering: &dyn Ordering, signature: &Signature, bank: &mut TermBank) {
  for literal in &mut clause.literals {
    literal.lhs = rewrite_to_normal_form(&literal.lhs, demodulators, ordering, signature, bank, false);
    literal.rhs = rewrite_to_normal_form(&literal.rhs, demodulators, ordering, signature, bank, false);
  }
  clause.recompute_standard_weight();
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::clause::ClauseId;
  use crate::core::ordering::{Lpo, Precedence};
  use crate::core::signature::Signature;
  use crate::core::term_bank::TermBank;
  use enumflags2::BitFlags;

  #[test]
  fn ground_rewrite_reaches_normal_form() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let individual = signature.sorts.individual();
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let b = signature.declare("b", 0, individual, BitFlags::empty());
    let f = signature.declare("f", 1, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let b_sym = signature.symbol(b).clone();
    let f_sym = signature.symbol(f).clone();

    let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
    let tb = bank.intern_term(&b_sym, SmallVec::new()).unwrap();
    let fa = bank.intern_term(&f_sym, SmallVec::from_vec(vec![ta.clone()])).unwrap();

    let precedence = Precedence::from_order([b, a, f]);
    let lpo = Lpo::new(precedence);

    // f(a) -> b
    let demod = Demodulator { lhs: fa.clone(), rhs: tb.clone(), source_clause: ClauseId(1) };
    let normal = rewrite_to_normal_form(&fa, &[demod], &lpo, &signature, &mut bank, false);
    assert!(term_ptr_eq(&normal, &tb));
  }
}
