/*!

An `IndexSet` swaps a value for an index (a `usize`) using some key value. We have two use cases:
1. When the value and key are the same, namely a pointer
2. When the key is provided by the client code, typically a structural_hash of the value.

In the first case, we provide the `IndexSet::insert` and `IndexSet::value_to_index` methods. In the second case,
we provide the `IndexSet::insert_with_hash` method.

In the first case, the hash value is an implementation detail that need not be exposed to the user. In the second
case, the hash value is a structural_hash, and we are associating both a canonical object and an index to this hash.
Both cases share a single container rather than two parallel implementations.

*/

use std::collections::hash_map::Entry;
use std::hash::Hash;
use crate::{HashMap, UnsafePtr};

pub struct IndexSet<Key, Value>
    where Key  : Hash + Clone + Eq, Value : PartialEq
{
  /// Maps an index to a key of the hash map below
  keys: Vec<Key>,
  // ToDo: Use a faster hasher
  /// Maps a key to an object and index. Sometimes the key is the hash value, and sometimes it is the pointer itself.
  indices: HashMap<Key, (usize, Value)>,
}

impl<Key, Value> Default for IndexSet<Key, Value>
    where Key  : Hash + Clone + Eq, Value : PartialEq
{
  fn default() -> Self {
    Self {
      keys: Vec::new(),
      indices: HashMap::new(),
    }
  }
}

// When the `Key` is the hash of `Value`
impl<Value> IndexSet<Value, Value>
where Value  : Hash + Clone + Eq
{

  /// Use the value's own hash to insert the pointer, returning the index
  pub fn insert(&mut self, value: Value) -> usize {
    let index = self.indices.len();

    match self.indices.entry(value.clone()) {

      Entry::Occupied(entry) => {
        // return just the index
        (*entry.get()).0
      }

      Entry::Vacant(entry) => {
        entry.insert((index, value.clone()));
        self.keys.push(value);
        index
      }

    }
  }

  /// Use the value's own hash to get the index.
  pub fn value_to_index(&self, value: Value) -> Option<usize> {
    self.indices.get(&value).map(| (index, _) | *index )
  }

}

// The more general case where the user provides the key. This subsumes the above case.
impl<Key, Value> IndexSet<Key, Value>
where Key  : Hash + Clone + Eq,
     Value : PartialEq
{
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert the pointer with the given key
  pub fn insert_with_key(&mut self, key: Key, value: Value) -> usize {
    // We snatch this length here to avoid borrowing `self` twice.
    let index = self.indices.len();

    match self.indices.entry(key.clone()) {

      Entry::Occupied(entry) => {
        let (index, _) = *entry.get();
        index
      }

      Entry::Vacant(entry) => {
        entry.insert((index, value));
        self.keys.push(key);
        index
      }
    }
  }

  /// Use the given key to get the index. If the value found for the key is not equal to the given value, or if the key
  /// does not exist, returns `None`.
  pub fn key_to_index(&self, key: Key, value: Value) -> Option<usize> {
    self.indices
        .get(&key)
        .filter(|(_, v)| *v == value)
        .map(|(idx, _)| *idx)
  }


  /// Use the index to get the key
  pub fn index_to_key(&self, index: usize) -> Option<Key> {
    self.keys.get(index).cloned()
  }

  /// Use the index to get the value
  pub fn index_to_value(&self, index: usize) -> Option<&Value> {
    self.keys.get(index).map(
      // Guaranteed to exist, since the key is in the keys vector
      | key | &self.indices.get(key).unwrap().1
    )
  }


  pub fn len(&self) -> usize {
    self.keys.len()
  }

  pub fn clear(&mut self) {
    self.keys.clear();
    self.indices.clear();
  }
}
