/*!

A comparison cache keyed by the unordered pair of term identities, storing the best result known
so far *as oriented against the canonical (lower-address-first) member of the pair*. Grounded in
`original_source/ORDERINGS/cto_cmpcache.c`'s `CMPCacheGetOldResult`/`CMPCacheInsertResult`: inserting
a negative result over an existing stronger negative-or-equal result strengthens the cache entry in
place; the cache never regresses a definitive result back to a weaker one, and a contradictory
insertion (e.g. `Greater` over a cached `Less`) is an implementation bug, not a recoverable event.

*/

use sat_abs::HashMap;

use crate::core::ordering::ComparisonResult;
use crate::core::term_bank::TermPtr;

fn key_of(t: &TermPtr) -> usize {
  std::rc::Rc::as_ptr(t) as usize
}

#[derive(Default)]
pub struct ComparisonCache {
  /// Keyed by `(min(addr), max(addr))`; the stored result is oriented so that it describes
  /// `min_addr_term` relative to `max_addr_term`.
  table: HashMap<(usize, usize), ComparisonResult>,
}

impl ComparisonCache {
  pub fn new() -> Self {
    Self::default()
  }

  fn canonical_key(s: &TermPtr, t: &TermPtr) -> ((usize, usize), bool) {
    let (ks, kt) = (key_of(s), key_of(t));
    if ks <= kt {
      ((ks, kt), false)
    } else {
      ((kt, ks), true)
    }
  }

  /// Returns the previously cached result for `(s, t)`, oriented for the caller's query order.
  pub fn get(&self, s: &TermPtr, t: &TermPtr) -> Option<ComparisonResult> {
    let (key, flipped) = Self::canonical_key(s, t);
    self.table.get(&key).map(|&result| if flipped { result.flip() } else { result })
  }

  /// Inserts `result` for the query order `(s, t)`, strengthening any existing entry. Panics if
  /// `result` contradicts a stronger cached result — that indicates a bug in the ordering
  /// implementation, not a legitimate runtime condition.
  pub fn insert(&mut self, s: &TermPtr, t: &TermPtr, result: ComparisonResult) {
    let (key, flipped) = Self::canonical_key(s, t);
    let canonical_result = if flipped { result.flip() } else { result };

    match self.table.get(&key).copied() {
      None => {
        self.table.insert(key, canonical_result);
      }
      Some(existing) => {
        if existing == canonical_result {
          return;
        }
        assert!(
          canonical_result.strengthens(existing) || existing.strengthens(canonical_result),
          "contradictory ordering comparison cache insertion: {:?} vs {:?}",
          existing,
          canonical_result
        );
        // Keep whichever of the two is more informative.
        if canonical_result.strengthens(existing) {
          self.table.insert(key, canonical_result);
        }
      }
    }
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }
}
