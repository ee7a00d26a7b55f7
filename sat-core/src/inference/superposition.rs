/*!

Superposition (paramodulation restricted by the ordering, spec §4.7): from `C1 ∨ s = t` (the *from*
clause, with `s = t` maximal and `s` not smaller than `t`) and `C2 ∨ L[u]` (the *into* clause, `u` a
non-variable subterm of one of `L`'s sides at a maximal position), if `σ = mgu(s, u)` exists and
`σs` is not smaller than `σt`, derive `σ(C1 ∨ C2 ∨ L[t])`, replacing `u` by `t` at that position.

Self-superposition (the from and into clause being the same clause) is permitted as long as the two
literal indices differ; the position restriction and ordering checks are what keep the inference
finite and refutationally complete without an explicit "don't overlap with yourself" rule.

*/

use sat_abs::SmallVec;

use crate::core::clause::{Clause, ClauseId, DerivationLink, InferenceKind};
use crate::core::literal::Literal;
use crate::core::ordering::{ComparisonResult, Ordering};
use crate::core::signature::Signature;
use crate::core::substitution::{DerefMode, Substitution};
use crate::core::term_bank::{Head, TermBank, TermPtr};
use crate::core::unify::unify;

/// A position within a term, the sequence of argument indices to follow from the root.
pub type Position = Vec<usize>;

pub(crate) fn subterm_at<'a>(term: &'a TermPtr, position: &[usize]) -> Option<&'a TermPtr> {
  match position.split_first() {
    None => Some(term),
    Some((&head, rest)) => subterm_at(term.args.get(head)?, rest),
  }
}

/// Rebuilds `term` with the subterm at `position` replaced by `replacement`, applying `substitution`
/// (fully dereferenced) to every other part of the tree.
fn replace_at(term: &TermPtr, position: &[usize], replacement: &TermPtr, signature: &Signature, substitution: &Substitution, bank: &mut TermBank) -> Option<TermPtr> {
  match position.split_first() {
    None => Some(replacement.clone()),
    Some((&head, rest)) => {
      if let Head::Symbol(symbol_id) = term.head {
        let symbol = signature.symbol(symbol_id).clone();
        let mut new_args: SmallVec<[TermPtr; 4]> = SmallVec::with_capacity(term.args.len());
        for (i, arg) in term.args.iter().enumerate() {
          if i == head {
            new_args.push(replace_at(arg, rest, replacement, signature, substitution, bank)?);
          } else {
            new_args.push(bank.insert_with_deref(signature, arg, substitution, DerefMode::DerefFull).ok()?);
          }
        }
        bank.intern_term(&symbol, new_args).ok()
      } else {
        None
      }
    }
  }
}

/// Lists every position of a non-variable subterm in `term`, root included.
pub fn non_variable_positions(term: &TermPtr) -> Vec<Position> {
  let mut out = Vec::new();
  walk(term, &mut Vec::new(), &mut out);
  out
}

fn walk(term: &TermPtr, current: &mut Position, out: &mut Vec<Position>) {
  if term.is_variable() {
    return;
  }
  out.push(current.clone());
  for (i, arg) in term.args.iter().enumerate() {
    current.push(i);
    walk(arg, current, out);
    current.pop();
  }
}

/// Performs one superposition inference. `from_literal` must name a positive equational literal of
/// `from`; `into_literal`/`into_side`/`position` name the literal, side (`false` = lhs, `true` =
/// rhs), and subterm position of `into` being rewritten into.
pub fn superpose(
  from: &Clause,
  from_literal: usize,
  into: &Clause,
  into_literal: usize,
  into_side: bool,
  position: &[usize],
  ordering: &dyn Ordering,
  signature: &Signature,
  bank: &mut TermBank,
  next_id: ClauseId,
) -> Option<Clause> {
  let true_term = bank.true_term();
  let from_lit = from.literals.get(from_literal)?;
  if !from_lit.positive || !from_lit.is_equational(&true_term) || !from_lit.is_maximal() {
    return None;
  }

  let into_lit = into.literals.get(into_literal)?;
  let target_side = if into_side { &into_lit.rhs } else { &into_lit.lhs };
  let u = subterm_at(target_side, position)?;
  if u.is_variable() {
    return None;
  }

  let (s, t) = from_lit.ordered_sides(ordering);

  let mut substitution = Substitution::with_capacity(32);
  if !unify(&s, u, &mut substitution) {
    return None;
  }
  if let ComparisonResult::Less = ordering.compare_uncached(&s, &t) {
    return None;
  }

  let mut literals = SmallVec::<[Literal; 8]>::new();
  for (k, other) in from.literals.iter().enumerate() {
    if k == from_literal {
      continue;
    }
    let lhs = bank.insert_with_deref(signature, &other.lhs, &substitution, DerefMode::DerefFull).ok()?;
    let rhs = bank.insert_with_deref(signature, &other.rhs, &substitution, DerefMode::DerefFull).ok()?;
    literals.push(Literal::new(lhs, rhs, other.positive));
  }

  for (k, other) in into.literals.iter().enumerate() {
    if k == into_literal {
      let t_instance = bank.insert_with_deref(signature, &t, &substitution, DerefMode::DerefFull).ok()?;
      let rewritten = replace_at(target_side, position, &t_instance, signature, &substitution, bank)?;
      let unchanged_side = if into_side { &other.lhs } else { &other.rhs };
      let unchanged_instance = bank.insert_with_deref(signature, unchanged_side, &substitution, DerefMode::DerefFull).ok()?;
      let (lhs, rhs) = if into_side { (unchanged_instance, rewritten) } else { (rewritten, unchanged_instance) };
      literals.push(Literal::new(lhs, rhs, other.positive));
    } else {
      let lhs = bank.insert_with_deref(signature, &other.lhs, &substitution, DerefMode::DerefFull).ok()?;
      let rhs = bank.insert_with_deref(signature, &other.rhs, &substitution, DerefMode::DerefFull).ok()?;
      literals.push(Literal::new(lhs, rhs, other.positive));
    }
  }

  let derivation = DerivationLink { kind: InferenceKind::Superposition, parents: vec![from.id, into.id], note: None };
  Some(Clause::new(next_id, literals.into_vec(), Some(derivation)))
}
