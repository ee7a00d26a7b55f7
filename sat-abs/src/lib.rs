#![allow(dead_code)]
/*!

Types/type aliases that abstract over the implementing backing type, plus the small,
domain-independent containers (`NatSet`, `IndexSet`, size-bucketed free lists) used throughout
`sat-core`.

# Background and Motivation

A motivating example is the `IString` type, an interned string type. A number of external crates
could provide this functionality. This module redirects to whatever chosen implementation we want.
To use the [`string_cache` crate](https://crates.io/crates/string_cache):

```ignore
pub use string_cache::DefaultAtom as IString;
```

For types or infrastructure with very different possible backing implementations, we define an
abstraction layer over the implementation rather than re-exporting directly, e.g. `NatSet` could be
a `bit-set::BitSet`, a `HashSet<usize>`, or a sorted `Vec<usize>` depending on expected density;
callers only ever see the `nat_set` module's public API.

*/

mod any;
mod index_set;
mod memory;
mod nat_set;
mod numeric_ext;
mod optimizable_int_ext;
mod partial_ordering;
mod small_arena;
mod special_index_impl;
mod unsafe_ptr;

// Generic memory utilities
pub use memory::{as_bytes, as_bytes_mut};

// Aliases and utility
pub use partial_ordering::*;

// Arbitrary precision arithmetic
pub mod numeric {
  pub use crate::numeric_ext::*;
}

// Nonnegative integer types for which `Option<T>` is the same size as `T`.
pub mod optimizable_int {
  pub use crate::optimizable_int_ext::*;
}

pub mod special_index {
  pub use crate::special_index_impl::*;
}

// region Hashing data structures
pub use std::collections::{HashMap, HashSet};

// For vectors that are expected to have few or zero elements.
pub use smallvec::{smallvec, SmallVec};

pub type Set<T> = HashSet<T>;
// endregion

// Logging
pub use tracing;

pub use unsafe_ptr::UnsafePtr;

/// Interned string. `DefaultAtom` caches globally across threads.
pub use string_cache::DefaultAtom as IString;

// region Items meant to be used only internally

pub use index_set::IndexSet;

/// A set of (small) natural numbers, used for variable-occurrence sets on terms and literals.
pub use nat_set::NatSet;

/// Size-bucketed free lists and small growable containers (arena/allocator component).
pub mod arena {
  pub use crate::small_arena::*;
}

pub use any::{decl_as_any_ptr_fns, impl_as_any_ptr_fns};

// endregion

/// Join an iterator of displayable items with a separator produced from the item's index.
pub fn join_iter<I>(iter: I, sep: &str) -> String
where
  I: Iterator,
  I::Item: ToString,
{
  iter.map(|item| item.to_string()).collect::<Vec<_>>().join(sep)
}

pub fn join_string<I: IntoIterator<Item = String>>(iter: I, sep: &str) -> String {
  iter.into_iter().collect::<Vec<_>>().join(sep)
}

/// Converts a nonnegative integer to a string of Unicode subscript digits, used when rendering
/// symbol arities (`f2`, `g3`, ...).
pub fn int_to_subscript(mut n: u32) -> String {
  const DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
  if n == 0 {
    return DIGITS[0].to_string();
  }
  let mut digits = Vec::new();
  while n > 0 {
    digits.push(DIGITS[(n % 10) as usize]);
    n /= 10;
  }
  digits.iter().rev().collect()
}

pub mod hash {
  use std::collections::hash_map::DefaultHasher;
  use std::hash::{Hash, Hasher};

  /// Combines two hashable values into a single `u64`, used for structural hashing of
  /// `(head, argument_hashes)` term signatures during hash-consing.
  pub fn hash2<A: Hash, B: Hash>(a: &A, b: &B) -> u64 {
    let mut hasher = DefaultHasher::new();
    a.hash(&mut hasher);
    b.hash(&mut hasher);
    hasher.finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn subscript_digits() {
    assert_eq!(int_to_subscript(0), "₀");
    assert_eq!(int_to_subscript(23), "₂₃");
  }

  #[test]
  fn join_iter_separates() {
    assert_eq!(join_iter(vec![1, 2, 3].into_iter(), ", "), "1, 2, 3");
  }
}
