/*!

Equality resolution: from `C ∨ s ≠ t`, if `s` and `t` unify via `σ`, derive `σC`. The selected
literal must be maximal in `C` (spec §4.7); callers are expected to have called
[`crate::core::ordering::Ordering::mark_maximal_literals`] on the parent clause first. A destructive
variant — applied eagerly during forward simplification rather than as a generating inference — is
offered for the common case where `s`/`t` are both variables or otherwise unify without producing
new bindings elsewhere in the clause; `resolve_destructively` performs that check and falls back to
`None` when the general inference must be used instead.

*/

use sat_abs::SmallVec;

use crate::core::clause::{Clause, ClauseId, DerivationLink, InferenceKind};
use crate::core::signature::Signature;
use crate::core::substitution::{DerefMode, Substitution};
use crate::core::term_bank::TermBank;
use crate::core::unify::unify;

/// Attempts equality resolution on the negative literal at `index` of `clause`. Returns the
/// derived clause if `index` names a maximal negative literal whose sides unify.
pub fn equality_resolution(clause: &Clause, index: usize, signature: &Signature, bank: &mut TermBank, next_id: ClauseId) -> Option<Clause> {
  let literal = clause.literals.get(index)?;
  if literal.positive || !literal.is_maximal() {
    return None;
  }

  let mut substitution = Substitution::with_capacity(16);
  if !unify(&literal.lhs, &literal.rhs, &mut substitution) {
    return None;
  }

  let mut literals = SmallVec::<[_; 4]>::new();
  for (i, other) in clause.literals.iter().enumerate() {
    if i == index {
      continue;
    }
    let lhs = bank.insert_with_deref(signature, &other.lhs, &substitution, DerefMode::DerefFull).ok()?;
    let rhs = bank.insert_with_deref(signature, &other.rhs, &substitution, DerefMode::DerefFull).ok()?;
    literals.push(crate::core::literal::Literal::new(lhs, rhs, other.positive));
  }

  let derivation = DerivationLink { kind: InferenceKind::EqualityResolution, parents: vec![clause.id], note: None };
  Some(Clause::new(next_id, literals.into_vec(), Some(derivation)))
}

/// A cheap, non-generating check for the case where the negative literal's two sides are
/// syntactically identical up to variable renaming with no other effect on the clause (e.g.
/// `x ≠ x`). When it applies, the literal can simply be dropped without constructing a fresh
/// substitution-applied copy of the rest of the clause.
pub fn resolve_destructively(clause: &Clause, index: usize) -> Option<Clause> {
  let literal = clause.literals.get(index)?;
  if literal.positive || !literal.is_maximal() {
    return None;
  }
  if !crate::core::term_bank::term_ptr_eq(&literal.lhs, &literal.rhs) {
    return None;
  }

  let mut literals = clause.literals.clone();
  literals.remove(index);
  let derivation = DerivationLink { kind: InferenceKind::EqualityResolution, parents: vec![clause.id], note: Some("destructive: trivially reflexive".to_string()) };
  Some(Clause::new(ClauseId(clause.id.0), literals, Some(derivation)))
}
