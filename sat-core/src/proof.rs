/*!

Proof reconstruction: given the empty clause's id, walk [`crate::core::clause::DerivationLink`]s
backward to build the proof DAG, and separately collect the set of input axioms actually used
(spec §6, the "axioms used" output mode which TPTP's SZS reporting and PCL2 traces both need).

*/

use std::collections::HashSet;

use crate::core::clause::{ClauseId, ClauseSet, InferenceKind};

/// One step of a reconstructed proof: the clause it derives, and how.
#[derive(Clone, Debug)]
pub struct ProofStep {
  pub clause: ClauseId,
  pub kind: Option<InferenceKind>,
  pub parents: Vec<ClauseId>,
}

/// A reconstructed proof: steps in an order where every step's parents precede it, ending with the
/// empty clause.
#[derive(Clone, Debug)]
pub struct Proof {
  pub steps: Vec<ProofStep>,
  pub empty_clause: ClauseId,
}

/// Walks derivation links backward from `empty_clause_id`, collecting every ancestor clause
/// exactly once, then topologically orders them so dependencies come first.
pub fn reconstruct(clauses: &ClauseSet, empty_clause_id: ClauseId) -> Option<Proof> {
  let mut visited: HashSet<ClauseId> = HashSet::new();
  let mut order: Vec<ClauseId> = Vec::new();

  // Post-order DFS over the derivation DAG: push a clause's id only after all its parents have
  // been pushed, giving a valid topological order directly.
  fn visit(id: ClauseId, clauses: &ClauseSet, visited: &mut HashSet<ClauseId>, order: &mut Vec<ClauseId>) {
    if visited.contains(&id) {
      return;
    }
    visited.insert(id);
    if let Some(clause) = clauses.get(id) {
      if let Some(derivation) = &clause.derivation {
        for &parent in &derivation.parents {
          visit(parent, clauses, visited, order);
        }
      }
    }
    order.push(id);
  }

  visit(empty_clause_id, clauses, &mut visited, &mut order);

  let mut steps = Vec::with_capacity(order.len());
  for id in order {
    let clause = clauses.get(id)?;
    steps.push(ProofStep { clause: id, kind: clause.derivation.as_ref().map(|d| d.kind), parents: clause.derivation.as_ref().map(|d| d.parents.clone()).unwrap_or_default() });
  }

  Some(Proof { steps, empty_clause: empty_clause_id })
}

/// The subset of the proof's ancestors that are input axioms (clauses with no derivation), i.e.
/// the "axioms used" set.
pub fn axioms_used(proof: &Proof, clauses: &ClauseSet) -> Vec<ClauseId> {
  let mut used: Vec<ClauseId> = proof
    .steps
    .iter()
    .filter(|step| step.kind.is_none())
    .map(|step| step.clause)
    .collect();
  used.retain(|id| clauses.get(*id).is_some());
  used
}
