/*!

A simplification ordering is determined by a total precedence on symbols plus, for KBO, a weight
function and per-symbol status (lexicographic or multiset). Orderings must be stable under
substitution (`s > t ⇒ σs > σt`) — the core depends on this for superposition completeness and for
rewriting termination.

*/

pub mod cache;
pub mod kbo;
pub mod lpo;

use std::cmp::Ordering as StdOrdering;

use sat_abs::HashMap;

use crate::core::signature::SymbolId;
use crate::core::term_bank::TermPtr;

pub use cache::ComparisonCache;
pub use kbo::Kbo;
pub use lpo::Lpo;

/// The result of comparing two terms under a simplification ordering. `NotGreaterEqual` and
/// `NotLessEqual` are *negative* results: they can be produced before completing a full
/// comparison and are still cacheable, since a later definitive result only ever strengthens them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonResult {
  Greater,
  Less,
  Equal,
  Uncomparable,
  NotGreaterEqual,
  NotLessEqual,
}

impl ComparisonResult {
  pub fn flip(self) -> Self {
    match self {
      ComparisonResult::Greater => ComparisonResult::Less,
      ComparisonResult::Less => ComparisonResult::Greater,
      ComparisonResult::Equal => ComparisonResult::Equal,
      ComparisonResult::Uncomparable => ComparisonResult::Uncomparable,
      ComparisonResult::NotGreaterEqual => ComparisonResult::NotLessEqual,
      ComparisonResult::NotLessEqual => ComparisonResult::NotGreaterEqual,
    }
  }

  /// Whether `other` is at least as informative as `self` (definitive results are more
  /// informative than the corresponding negative result; a result is always at least as
  /// informative as itself).
  pub fn strengthens(self, other: Self) -> bool {
    use ComparisonResult::*;
    match (self, other) {
      (a, b) if a == b => true,
      (NotGreaterEqual, Less) | (NotGreaterEqual, Equal) | (NotGreaterEqual, Uncomparable) => true,
      (NotLessEqual, Greater) | (NotLessEqual, Equal) | (NotLessEqual, Uncomparable) => true,
      _ => false,
    }
  }
}

/// Precedence on symbols: a total order used by both LPO and KBO's tie-break rule.
#[derive(Clone, Default)]
pub struct Precedence {
  rank: HashMap<SymbolId, i32>,
}

impl Precedence {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_order(symbols: impl IntoIterator<Item = SymbolId>) -> Self {
    let mut rank = HashMap::new();
    for (i, symbol) in symbols.into_iter().enumerate() {
      rank.insert(symbol, i as i32);
    }
    Self { rank }
  }

  pub fn compare(&self, a: SymbolId, b: SymbolId) -> StdOrdering {
    let ra = self.rank.get(&a).copied().unwrap_or(0);
    let rb = self.rank.get(&b).copied().unwrap_or(0);
    ra.cmp(&rb)
  }
}

/// Derives a total precedence over every symbol `signature` currently declares, so that setup never
/// hands the ordering an empty `Precedence` (every symbol defaulting to rank 0 collapses LPO/KBO's
/// precedence comparison to `Equal` for any two distinct symbols). Symbols are ranked by arity, then
/// by declaration order among ties — deeper function symbols outrank the constants and predicates
/// that demodulators and the superposition ordering restriction most often compare them against.
pub fn derive_precedence(signature: &crate::core::signature::Signature) -> Precedence {
  let mut symbols: Vec<SymbolId> = signature.symbols().map(|symbol| symbol.id).collect();
  symbols.sort_by_key(|&id| (signature.symbol(id).arity, id.0));
  Precedence::from_order(symbols)
}

/// Per-symbol argument comparison status (used by LPO).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Status {
  #[default]
  Lexicographic,
  Multiset,
}

pub trait Ordering {
  /// Compares two terms, without consulting a cache.
  fn compare_uncached(&self, s: &TermPtr, t: &TermPtr) -> ComparisonResult;

  fn mark_maximal_literals(&self, clause: &mut crate::core::clause::Clause) {
    crate::core::ordering::mark_maximal_default(self, clause);
  }
}

/// Shared default implementation of maximal-literal marking: a literal is maximal iff no other
/// literal in the clause compares strictly greater under the equation-as-multiset reading
/// `{s, t}` of a literal `s [=|!=] t`. Idempotent and intended to be cached by the caller.
pub fn mark_maximal_default<O: Ordering + ?Sized>(ordering: &O, clause: &mut crate::core::clause::Clause) {
  let n = clause.literals.len();
  let mut maximal = vec![true; n];
  let mut strictly_maximal = vec![true; n];

  for i in 0..n {
    for j in 0..n {
      if i == j {
        continue;
      }
      let cmp = compare_literals(ordering, &clause.literals[i], &clause.literals[j]);
      match cmp {
        ComparisonResult::Less => {
          maximal[i] = false;
          strictly_maximal[i] = false;
        }
        ComparisonResult::Equal => {
          strictly_maximal[i] = false;
        }
        _ => {}
      }
    }
  }

  for (i, literal) in clause.literals.iter_mut().enumerate() {
    literal.set_maximal(maximal[i]);
    literal.set_strictly_maximal(strictly_maximal[i]);
  }
}

fn compare_literals<O: Ordering + ?Sized>(ordering: &O, a: &crate::core::literal::Literal, b: &crate::core::literal::Literal) -> ComparisonResult {
  // Multiset extension over {max(lhs,rhs), min(lhs,rhs)} of each literal, compared lexicographically.
  let (a_big, a_small) = a.ordered_sides(ordering);
  let (b_big, b_small) = b.ordered_sides(ordering);

  match ordering.compare_uncached(&a_big, &b_big) {
    ComparisonResult::Equal => ordering.compare_uncached(&a_small, &b_small),
    other => other,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strengthening_rules_hold() {
    assert!(ComparisonResult::NotGreaterEqual.strengthens(ComparisonResult::Less));
    assert!(ComparisonResult::NotGreaterEqual.strengthens(ComparisonResult::Equal));
    assert!(!ComparisonResult::NotGreaterEqual.strengthens(ComparisonResult::Greater));
    assert!(ComparisonResult::Greater.strengthens(ComparisonResult::Greater));
  }

  #[test]
  fn flip_is_involutive() {
    for r in [ComparisonResult::Greater, ComparisonResult::Less, ComparisonResult::Equal, ComparisonResult::Uncomparable, ComparisonResult::NotGreaterEqual, ComparisonResult::NotLessEqual] {
      assert_eq!(r.flip().flip(), r);
    }
  }

  #[test]
  fn derived_precedence_never_leaves_two_declared_symbols_tied() {
    use crate::core::signature::Signature;
    use enumflags2::BitFlags;

    let mut signature = Signature::new();
    let individual = signature.sorts.individual();
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let b = signature.declare("b", 0, individual, BitFlags::empty());
    let f = signature.declare("f", 1, individual, BitFlags::empty());

    let precedence = derive_precedence(&signature);
    assert_ne!(precedence.compare(a, b), StdOrdering::Equal);
    assert_ne!(precedence.compare(a, f), StdOrdering::Equal);
  }
}
