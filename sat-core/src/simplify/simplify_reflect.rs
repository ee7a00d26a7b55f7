/*!

Contextual simplify-reflect (spec §4.6): given a clause `C ∨ L`, if the clause formed by negating
`L` — `C ∨ ¬L` — is subsumed by some other clause `D` in the active set, then `L` is redundant and
can be dropped, yielding `C`. This is a cheap generalisation of equality resolution/resolution
against unit clauses that catches a wider class of redundant literals; it is applied during
forward and backward simplification alongside demodulation and subsumption.

*/

use crate::core::clause::{Clause, ClauseId, ClauseSet, DerivationLink, InferenceKind};
use crate::simplify::subsumption::subsumes;

/// Tries to eliminate literals of `clause` via simplify-reflect against `active`. Returns a new,
/// shortened clause if at least one literal was eliminated, or `None` if the clause is unchanged.
pub fn simplify_reflect(clause: &Clause, active: &ClauseSet, next_id: ClauseId) -> Option<Clause> {
  let mut literals = clause.literals.clone();
  let mut eliminated_from: Vec<ClauseId> = Vec::new();
  let mut changed = false;
  let mut i = 0;

  while i < literals.len() {
    let mut probe_literals: Vec<_> = literals.clone();
    let negated = probe_literals.remove(i);
    probe_literals.insert(i, negated.negate());
    let probe = Clause::new(ClauseId(u64::MAX), probe_literals, None);

    if let Some(subsumer) = active.iter().find(|d| d.id != clause.id && subsumes(d, &probe)) {
      literals.remove(i);
      eliminated_from.push(subsumer.id);
      changed = true;
    } else {
      i += 1;
    }
  }

  if !changed {
    return None;
  }

  let derivation = DerivationLink {
    kind: InferenceKind::SimplifyReflect,
    parents: {
      let mut parents = vec![clause.id];
      parents.extend(eliminated_from);
      parents
    },
    note: None,
  };
  Some(Clause::new(next_id, literals, Some(derivation)))
}
