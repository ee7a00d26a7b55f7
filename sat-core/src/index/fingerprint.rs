/*!

A fingerprint is a fixed-length vector of symbol samples taken at prescribed term positions (root,
first argument, first-of-first, …). The index is a trie over fingerprint vectors; each leaf stores
the set of `(clause, position)` payloads that produced it. Grounded in
`original_source/TERMS/cte_fp_index.c`'s compatibility tables.

*/

use sat_abs::HashMap;

use crate::core::clause::ClauseId;
use crate::core::signature::SymbolId;
use crate::core::term_bank::{Head, TermPtr};

/// A sample at one fingerprint position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FingerprintEntry {
  Symbol(SymbolId),
  Variable,
  /// The path was cut off because it passed through a variable.
  BelowVariable,
  /// The position does not exist in this term (term too shallow).
  NotInTerm,
}

/// A path from the root: a sequence of argument indices.
pub type Position = Vec<u32>;

/// The fixed set of positions sampled for every term. Five samples (root and its first two
/// "generations" of children) is a typical small fingerprint depth.
pub fn sample_positions() -> Vec<Position> {
  vec![vec![], vec![0], vec![0, 0], vec![1], vec![1, 0]]
}

pub type Fingerprint = Vec<FingerprintEntry>;

pub fn sample_at(term: &TermPtr, position: &[u32]) -> FingerprintEntry {
  let mut current = term.clone();
  for &index in position {
    if current.is_variable() {
      return FingerprintEntry::BelowVariable;
    }
    match current.args.get(index as usize) {
      Some(arg) => current = arg.clone(),
      None => return FingerprintEntry::NotInTerm,
    }
  }
  match &current.head {
    Head::Symbol(symbol) => FingerprintEntry::Symbol(*symbol),
    Head::Variable(..) => FingerprintEntry::Variable,
  }
}

pub fn fingerprint_of(term: &TermPtr, positions: &[Position]) -> Fingerprint {
  positions.iter().map(|position| sample_at(term, position)).collect()
}

/// `query` compatible with `indexed` for unification purposes: a concrete symbol in `indexed`
/// unifies only with the same symbol, `Variable`, or `BelowVariable` in `query` (and vice versa);
/// `NotInTerm` only matches `NotInTerm`.
fn compatible_for_unify(query: FingerprintEntry, indexed: FingerprintEntry) -> bool {
  use FingerprintEntry::*;
  match (query, indexed) {
    (NotInTerm, NotInTerm) => true,
    (NotInTerm, _) | (_, NotInTerm) => false,
    (BelowVariable, _) | (_, BelowVariable) => true,
    (Variable, _) | (_, Variable) => true,
    (Symbol(a), Symbol(b)) => a == b,
  }
}

/// One-sided compatibility for matching `pattern` into `instance`: the pattern side may be a
/// variable (matches anything), but the instance side being a variable only matches if the
/// pattern position was already cut off by a variable, or is itself a pattern variable.
fn compatible_for_match(pattern: FingerprintEntry, instance: FingerprintEntry) -> bool {
  use FingerprintEntry::*;
  match (pattern, instance) {
    (NotInTerm, NotInTerm) => true,
    (NotInTerm, _) | (_, NotInTerm) => false,
    (BelowVariable, _) => true,
    (Variable, _) => true,
    (_, BelowVariable) => true,
    (_, Variable) => false,
    (Symbol(a), Symbol(b)) => a == b,
  }
}

#[derive(Default)]
struct TrieNode {
  children: HashMap<FingerprintEntry, TrieNode>,
  payload: Vec<(ClauseId, usize)>,
}

pub struct FingerprintIndex {
  positions: Vec<Position>,
  root: TrieNode,
}

impl Default for FingerprintIndex {
  fn default() -> Self {
    Self::new()
  }
}

impl FingerprintIndex {
  pub fn new() -> Self {
    Self { positions: sample_positions(), root: TrieNode::default() }
  }

  pub fn insert(&mut self, term: &TermPtr, clause: ClauseId, literal_index: usize) {
    let fp = fingerprint_of(term, &self.positions);
    let mut node = &mut self.root;
    for entry in fp {
      node = node.children.entry(entry).or_default();
    }
    node.payload.push((clause, literal_index));
  }

  pub fn remove(&mut self, term: &TermPtr, clause: ClauseId, literal_index: usize) {
    let fp = fingerprint_of(term, &self.positions);
    let mut node = &mut self.root;
    for entry in fp {
      match node.children.get_mut(&entry) {
        Some(child) => node = child,
        None => return,
      }
    }
    node.payload.retain(|&(c, l)| c != clause || l != literal_index);
  }

  fn traverse(&self, node: &TrieNode, fp: &[FingerprintEntry], depth: usize, compatible: fn(FingerprintEntry, FingerprintEntry) -> bool, out: &mut Vec<(ClauseId, usize)>) {
    if depth == fp.len() {
      out.extend_from_slice(&node.payload);
      return;
    }
    for (&entry, child) in &node.children {
      if compatible(fp[depth], entry) {
        self.traverse(child, fp, depth + 1, compatible, out);
      }
    }
  }

  /// Candidates whose indexed term might unify with `term`. Sound in the sense required by spec
  /// §8: if a term `u` is omitted, `u` is not unifiable with `term`.
  pub fn find_unifiable(&self, term: &TermPtr) -> Vec<(ClauseId, usize)> {
    let fp = fingerprint_of(term, &self.positions);
    let mut out = Vec::new();
    self.traverse(&self.root, &fp, 0, compatible_for_unify, &mut out);
    out
  }

  /// One-sided version: candidates whose indexed term `term` could match as a pattern (i.e. the
  /// indexed term is `term`'s would-be instance).
  pub fn find_matchable(&self, pattern: &TermPtr) -> Vec<(ClauseId, usize)> {
    let fp = fingerprint_of(pattern, &self.positions);
    let mut out = Vec::new();
    self.traverse(&self.root, &fp, 0, compatible_for_match, &mut out);
    out
  }

  pub fn len(&self) -> usize {
    fn count(node: &TrieNode) -> usize {
      node.payload.len() + node.children.values().map(count).sum::<usize>()
    }
    count(&self.root)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
