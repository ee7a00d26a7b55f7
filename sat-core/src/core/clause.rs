/*!

A clause is a finite multiset of literals, canonically ordered by the simplification ordering and
by literal weight. Clauses additionally carry a derivation link, a heuristic evaluation vector, and
enough bookkeeping ([`ClauseId`], `split_level`/`creation_date`) to break exact-equality evaluation
ties deterministically (spec §3, §9(c) — ties break by ascending clause ident).

A [`ClauseSet`] is the owning container: a doubly linked structure in the source, represented here
as an ordered `Vec` plus a side index by [`ClauseId`], which gives the same "iterate in a fixed
order, look up by id in O(1)" contract without unsafe intrusive links.

*/

use enumflags2::{bitflags, BitFlags};
use sat_abs::HashMap;

use crate::core::literal::Literal;
use crate::core::signature::Signature;
use crate::core::substitution::{DerefMode, Substitution};
use crate::core::term_bank::{Head, TermBank, TermPtr};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClauseId(pub u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InferenceKind {
  Initial,
  Superposition,
  EqualityResolution,
  EqualityFactoring,
  Subsumption,
  SimplifyReflect,
  Rewrite,
}

#[derive(Clone, Debug)]
pub struct DerivationLink {
  pub kind: InferenceKind,
  pub parents: Vec<ClauseId>,
  pub note: Option<String>,
}

#[bitflags]
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClauseProperty {
  Initial,
  ConjectureDescendant,
  Processed,
  InSos,
  LimitedRewriting,
  ChosenWatched,
  ProofStep,
}

#[derive(Clone)]
pub struct Clause {
  pub id: ClauseId,
  pub literals: Vec<Literal>,
  pub derivation: Option<DerivationLink>,
  /// `(priority, weight)` pairs, one per HCB priority queue (spec §4.8). Populated by the
  /// heuristic module before the clause enters `unprocessed`.
  pub evaluation: Vec<(i64, f64)>,
  pub properties: BitFlags<ClauseProperty>,
  pub standard_weight: u32,
  /// Split level / creation-date pair used only to break exact `(priority, weight)` ties: lower
  /// creation order wins, matching §9(c)'s "ties break by ascending clause ident" rule (ident
  /// already increases monotonically with creation order, so `creation_date` mirrors `id`).
  pub split_level: u32,
  pub creation_date: u64,
}

impl Clause {
  pub fn new(id: ClauseId, literals: Vec<Literal>, derivation: Option<DerivationLink>) -> Self {
    let standard_weight = literals.iter().map(|l| l.lhs.weight + l.rhs.weight).sum();
    let properties = if derivation.is_none() { ClauseProperty::Initial.into() } else { BitFlags::empty() };
    Self { id, literals, derivation, evaluation: Vec::new(), properties, standard_weight, split_level: 0, creation_date: id.0 }
  }

  pub fn is_empty_clause(&self) -> bool {
    self.literals.is_empty()
  }

  pub fn positive_literal_count(&self) -> usize {
    self.literals.iter().filter(|l| l.positive).count()
  }

  pub fn negative_literal_count(&self) -> usize {
    self.literals.iter().filter(|l| !l.positive).count()
  }

  pub fn recompute_standard_weight(&mut self) {
    self.standard_weight = self.literals.iter().map(|l| l.lhs.weight + l.rhs.weight).sum();
  }

  pub fn has_property(&self, property: ClauseProperty) -> bool {
    self.properties.contains(property)
  }
}

fn collect_renaming(term: &TermPtr, bank: &mut TermBank, substitution: &mut Substitution) {
  if let Head::Variable(index, sort) = term.head {
    if substitution.get(index).is_none() {
      let fresh = bank.intern_variable(sort, None);
      substitution.bind(index, fresh);
    }
    return;
  }
  for arg in &term.args {
    collect_renaming(arg, bank, substitution);
  }
}

/// Copies `clause` with every variable replaced by one fresh to `bank`, preserving structure but
/// guaranteeing no variable index is shared with any other clause. Generating inferences between
/// two clauses — or between two roles of the same clause, as in self-superposition — must
/// standardize one side apart first, or structurally distinct variable occurrences that happen to
/// carry the same index get silently identified during unification.
pub fn standardize_apart(clause: &Clause, signature: &Signature, bank: &mut TermBank) -> Option<Clause> {
  let mut substitution = Substitution::new();
  for literal in &clause.literals {
    collect_renaming(&literal.lhs, bank, &mut substitution);
    collect_renaming(&literal.rhs, bank, &mut substitution);
  }

  let mut literals = Vec::with_capacity(clause.literals.len());
  for literal in &clause.literals {
    let lhs = bank.insert_with_deref(signature, &literal.lhs, &substitution, DerefMode::DerefOnce).ok()?;
    let rhs = bank.insert_with_deref(signature, &literal.rhs, &substitution, DerefMode::DerefOnce).ok()?;
    literals.push(Literal::new(lhs, rhs, literal.positive));
  }

  Some(Clause::new(clause.id, literals, clause.derivation.clone()))
}

/// Compares two clauses' `(priority, weight)` evaluation vectors for a given queue index, breaking
/// exact ties by ascending clause ident (spec §9(c)).
pub fn evaluation_cmp(a: &Clause, b: &Clause, queue: usize) -> std::cmp::Ordering {
  let (pa, wa) = a.evaluation.get(queue).copied().unwrap_or((i64::MAX, f64::INFINITY));
  let (pb, wb) = b.evaluation.get(queue).copied().unwrap_or((i64::MAX, f64::INFINITY));
  pa.cmp(&pb).then_with(|| wa.partial_cmp(&wb).unwrap_or(std::cmp::Ordering::Equal)).then_with(|| a.id.cmp(&b.id))
}

/// An ordered, indexed collection of clauses (spec §4.4). Insertion/removal are the only sanctioned
/// mutators once auxiliary indices are attached elsewhere (`sat_core::index::*`); those indices are
/// updated by the caller in lockstep, not by `ClauseSet` itself.
#[derive(Default)]
pub struct ClauseSet {
  order: Vec<ClauseId>,
  by_id: HashMap<ClauseId, Clause>,
  literal_count: usize,
  weight_total: u64,
}

impl ClauseSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, clause: Clause) {
    debug_assert!(!self.by_id.contains_key(&clause.id), "duplicate clause id {:?}", clause.id);
    self.literal_count += clause.literals.len();
    self.weight_total += clause.standard_weight as u64;
    self.order.push(clause.id);
    self.by_id.insert(clause.id, clause);
  }

  pub fn remove(&mut self, id: ClauseId) -> Option<Clause> {
    let clause = self.by_id.remove(&id)?;
    self.literal_count -= clause.literals.len();
    self.weight_total -= clause.standard_weight as u64;
    self.order.retain(|&existing| existing != id);
    Some(clause)
  }

  pub fn get(&self, id: ClauseId) -> Option<&Clause> {
    self.by_id.get(&id)
  }

  pub fn get_mut(&mut self, id: ClauseId) -> Option<&mut Clause> {
    self.by_id.get_mut(&id)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Clause> {
    self.order.iter().filter_map(move |id| self.by_id.get(id))
  }

  pub fn cardinality(&self) -> usize {
    self.order.len()
  }

  pub fn literal_count(&self) -> usize {
    self.literal_count
  }

  pub fn weight_total(&self) -> u64 {
    self.weight_total
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn empty_clause(id: u64) -> Clause {
    Clause::new(ClauseId(id), Vec::new(), None)
  }

  #[test]
  fn insert_and_remove_maintain_aggregate_counters() {
    let mut set = ClauseSet::new();
    set.insert(empty_clause(1));
    set.insert(empty_clause(2));
    assert_eq!(set.cardinality(), 2);
    set.remove(ClauseId(1));
    assert_eq!(set.cardinality(), 1);
    assert!(set.get(ClauseId(1)).is_none());
    assert!(set.get(ClauseId(2)).is_some());
  }

  #[test]
  fn standardize_apart_renames_without_changing_structure() {
    use crate::core::term_bank::term_ptr_eq;
    use enumflags2::BitFlags;

    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let individual = signature.sorts.individual();
    let f = signature.declare("f", 1, individual, BitFlags::empty());
    let f_sym = signature.symbol(f).clone();
    let x = bank.intern_variable(individual, Some(0));
    let fx = bank.intern_term(&f_sym, sat_abs::SmallVec::from_vec(vec![x.clone()])).unwrap();
    let true_term = bank.true_term();

    let clause = Clause::new(ClauseId(1), vec![Literal::new(fx, true_term, true)], None);
    let renamed = standardize_apart(&clause, &signature, &mut bank).expect("renaming is infallible here");

    assert_eq!(renamed.literals.len(), 1);
    assert!(!term_ptr_eq(&renamed.literals[0].lhs, &clause.literals[0].lhs));
    assert_eq!(renamed.literals[0].lhs.variable_count, 1);
  }

  #[test]
  fn evaluation_ties_break_by_ascending_ident() {
    let mut a = empty_clause(5);
    let mut b = empty_clause(3);
    a.evaluation.push((1, 2.0));
    b.evaluation.push((1, 2.0));
    assert_eq!(evaluation_cmp(&a, &b, 0), std::cmp::Ordering::Greater);
    assert_eq!(evaluation_cmp(&b, &a, 0), std::cmp::Ordering::Less);
  }
}
