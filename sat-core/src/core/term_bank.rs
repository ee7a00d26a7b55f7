/*!

The term bank owns a perfectly shared term DAG: hash-consed nodes such that structural identity
implies pointer identity. The source system implements this sharing with a raw-pointer bump arena
and a separate mark/sweep collector; per the open design question in spec §9 ("model the term
store as an arena of immutable nodes with a separate binding environment"), this reimplementation
uses `Rc<TermNode>` as the shared handle. Terms form a DAG (no cycles), so reference counting alone
is enough to reclaim structure once the bank drops its own strong references during
[`TermBank::collect_garbage`] — there is no need for a tracing collector.

*/

use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use enumflags2::{bitflags, BitFlags};
use sat_abs::{hash::hash2, HashMap, SmallVec};

use crate::core::signature::{SortId, Symbol, SymbolId};
use crate::core::substitution::{DerefMode, Substitution, VariableIndex};
use crate::error::{CoreError, CoreResult};

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TermProperty {
  Rewritten,
  RestrictedRewritable,
  Maximal,
  StrictlyMaximal,
  InSos,
  /// The term is (a subterm of) a pattern usable as a left-hand side of a rewrite rule.
  Pattern,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Head {
  Symbol(SymbolId),
  Variable(VariableIndex, SortId),
}

pub struct Term {
  pub head: Head,
  pub args: SmallVec<[TermPtr; 4]>,
  pub weight: u32,
  pub variable_count: u32,
  pub function_symbol_count: u32,
  structural_hash: u64,
  properties: RefCell<BitFlags<TermProperty>>,
}

impl Term {
  #[inline(always)]
  pub fn is_variable(&self) -> bool {
    matches!(self.head, Head::Variable(..))
  }

  #[inline(always)]
  pub fn symbol(&self) -> Option<SymbolId> {
    match self.head {
      Head::Symbol(id) => Some(id),
      Head::Variable(..) => None,
    }
  }

  #[inline(always)]
  pub fn variable_index(&self) -> Option<VariableIndex> {
    match self.head {
      Head::Variable(index, _) => Some(index),
      Head::Symbol(_) => None,
    }
  }

  pub fn has_property(&self, property: TermProperty) -> bool {
    self.properties.borrow().contains(property)
  }

  pub fn set_property(&self, property: TermProperty) {
    self.properties.borrow_mut().insert(property);
  }

  pub fn clear_property(&self, property: TermProperty) {
    self.properties.borrow_mut().remove(property);
  }
}

impl PartialEq for Term {
  fn eq(&self, other: &Self) -> bool {
    std::ptr::eq(self, other)
  }
}
impl Eq for Term {}

impl Hash for Term {
  fn hash<H: Hasher>(&self, state: &mut H) {
    (self as *const Term).hash(state);
  }
}

/// A shared, reference-counted handle to a term node. Structural identity within a single bank
/// implies pointer identity, so `Rc::ptr_eq` is the fast path for term equality.
pub type TermPtr = Rc<Term>;

#[inline(always)]
pub fn term_ptr_eq(a: &TermPtr, b: &TermPtr) -> bool {
  Rc::ptr_eq(a, b)
}

fn term_key(ptr: &TermPtr) -> usize {
  Rc::as_ptr(ptr) as usize
}

fn structural_hash(head: &Head, args: &[TermPtr]) -> u64 {
  let mut acc = hash2(&std::any::type_name::<Head>(), head);
  for arg in args {
    acc = hash2(&acc, &term_key(arg));
  }
  acc
}

#[derive(Clone, Debug)]
pub struct RewriteLink {
  pub replacement: TermPtr,
  /// The demodulator clause ident that justified this rewrite.
  pub witness_clause: u64,
  pub in_sos: bool,
}

/// Owns every term created through it. Two structurally equal `(head, args)` pairs always produce
/// the same `TermPtr` (invariant (b) of the term bank, spec §3).
pub struct TermBank {
  buckets: HashMap<u64, Vec<TermPtr>>,
  variables: HashMap<(SortId, u32), TermPtr>,
  next_variable_index: u32,
  rewrite_links: RefCell<HashMap<usize, RewriteLink>>,
  true_term: TermPtr,
}

impl TermBank {
  pub fn new(true_symbol: SymbolId) -> Self {
    let head = Head::Symbol(true_symbol);
    let hash = structural_hash(&head, &[]);
    let true_term = Rc::new(Term {
      head,
      args: SmallVec::new(),
      weight: 1,
      variable_count: 0,
      function_symbol_count: 1,
      structural_hash: hash,
      properties: RefCell::new(BitFlags::empty()),
    });
    let mut buckets = HashMap::new();
    buckets.insert(hash, vec![true_term.clone()]);
    Self { buckets, variables: HashMap::new(), next_variable_index: 0, rewrite_links: RefCell::new(HashMap::new()), true_term }
  }

  pub fn true_term(&self) -> TermPtr {
    self.true_term.clone()
  }

  /// Returns the unique node for the variable at `(sort, index)`, interning a fresh one if
  /// `index` is `None` (the bank records the smallest unused index).
  pub fn intern_variable(&mut self, sort: SortId, index: Option<u32>) -> TermPtr {
    let index = index.unwrap_or_else(|| {
      let fresh = self.next_variable_index;
      self.next_variable_index += 1;
      fresh
    });
    self.next_variable_index = self.next_variable_index.max(index + 1);

    if let Some(existing) = self.variables.get(&(sort, index)) {
      return existing.clone();
    }
    let head = Head::Variable(VariableIndex(index), sort);
    let hash = structural_hash(&head, &[]);
    let term = Rc::new(Term {
      head,
      args: SmallVec::new(),
      weight: 1,
      variable_count: 1,
      function_symbol_count: 0,
      structural_hash: hash,
      properties: RefCell::new(BitFlags::empty()),
    });
    self.variables.insert((sort, index), term.clone());
    term
  }

  /// Interns `head` applied to `args`, computing weight and counts once on first insertion.
  /// Requires every argument to already live in this bank (invariant (a)), which is automatically
  /// true for `TermPtr`s obtained from this bank's own methods.
  pub fn intern_term(&mut self, symbol: &Symbol, args: SmallVec<[TermPtr; 4]>) -> CoreResult<TermPtr> {
    if args.len() != symbol.arity as usize {
      return Err(CoreError::SymbolArityMismatch { symbol: symbol.id, expected: symbol.arity, got: args.len() as u32 });
    }
    let head = Head::Symbol(symbol.id);
    let hash = structural_hash(&head, &args);

    if let Some(bucket) = self.buckets.get(&hash) {
      if let Some(existing) = bucket.iter().find(|candidate| shape_eq(&candidate.head, &head) && args_identical(&candidate.args, &args)) {
        return Ok(existing.clone());
      }
    }

    let mut weight = 1u32;
    let mut variable_count = 0u32;
    let mut function_symbol_count = 1u32;
    for arg in &args {
      weight += arg.weight;
      variable_count += arg.variable_count;
      function_symbol_count += arg.function_symbol_count;
    }

    let term = Rc::new(Term { head, args, weight, variable_count, function_symbol_count, structural_hash: hash, properties: RefCell::new(BitFlags::empty()) });
    self.buckets.entry(hash).or_default().push(term.clone());
    Ok(term)
  }

  /// If `term` is a variable with a current binding in `substitution`, returns the bound term;
  /// otherwise returns `term` unchanged. Does not chase further if the binding is itself a bound
  /// variable — use [`TermBank::deref_follow`] for that.
  pub fn deref_once(term: &TermPtr, substitution: &Substitution) -> TermPtr {
    match term.variable_index() {
      Some(index) => substitution.get(index).unwrap_or_else(|| term.clone()),
      None => term.clone(),
    }
  }

  /// Follows a chain of variable bindings to its end.
  pub fn deref_follow(term: &TermPtr, substitution: &Substitution) -> TermPtr {
    let mut current = term.clone();
    loop {
      match current.variable_index() {
        Some(index) => match substitution.get(index) {
          Some(next) => current = next,
          None => return current,
        },
        None => return current,
      }
    }
  }

  /// Copies `term` into this bank, applying `substitution` per `mode`, reusing shared structure
  /// wherever no binding applies.
  pub fn insert_with_deref(&mut self, signature: &crate::core::signature::Signature, term: &TermPtr, substitution: &Substitution, mode: DerefMode) -> CoreResult<TermPtr> {
    let start = match mode {
      DerefMode::NoDeref => term.clone(),
      DerefMode::DerefOnce => Self::deref_once(term, substitution),
      DerefMode::DerefFull => Self::deref_follow(term, substitution),
    };

    match &start.head {
      Head::Variable(index, sort) => {
        if mode == DerefMode::NoDeref {
          Ok(self.intern_variable(*sort, Some(index.0)))
        } else {
          Ok(start)
        }
      }
      Head::Symbol(symbol_id) => {
        let symbol = signature.symbol(*symbol_id).clone();
        let mut new_args = SmallVec::with_capacity(start.args.len());
        for arg in &start.args {
          new_args.push(self.insert_with_deref(signature, arg, substitution, mode)?);
        }
        self.intern_term(&symbol, new_args)
      }
    }
  }

  /// Caches that `term` rewrites to `replacement`. This is a memoisation table, not a structural
  /// mutation: it must be invalidated whenever the demodulator set that justified it changes.
  pub fn set_rewrite_link(&self, term: &TermPtr, link: RewriteLink) {
    term.set_property(TermProperty::Rewritten);
    self.rewrite_links.borrow_mut().insert(term_key(term), link);
  }

  pub fn rewrite_link(&self, term: &TermPtr) -> Option<RewriteLink> {
    self.rewrite_links.borrow().get(&term_key(term)).cloned()
  }

  /// Follows a chain of rewrite links to its end.
  pub fn follow_rewrite_chain(&self, term: &TermPtr) -> TermPtr {
    let mut current = term.clone();
    while let Some(link) = self.rewrite_link(&current) {
      current = link.replacement;
    }
    current
  }

  pub fn invalidate_rewrite_links(&self) {
    self.rewrite_links.borrow_mut().clear();
  }

  /// Marks every term reachable from `roots` and drops the bank's own strong references to
  /// everything else, shrinking the hash buckets in place. Because terms form a DAG, this is
  /// exactly equivalent to the source's mark/sweep pass, just expressed as an `Rc` strong-count
  /// drop instead of a moving collector.
  pub fn collect_garbage<'a>(&mut self, roots: impl Iterator<Item = &'a TermPtr>) {
    let mut reachable: HashMap<usize, TermPtr> = HashMap::new();
    let mut stack: Vec<TermPtr> = roots.cloned().collect();
    stack.push(self.true_term.clone());
    while let Some(term) = stack.pop() {
      let key = term_key(&term);
      if reachable.contains_key(&key) {
        continue;
      }
      for arg in &term.args {
        stack.push(arg.clone());
      }
      reachable.insert(key, term);
    }

    for bucket in self.buckets.values_mut() {
      bucket.retain(|term| reachable.contains_key(&term_key(term)));
    }
    self.buckets.retain(|_, bucket| !bucket.is_empty());
    self.variables.retain(|_, term| reachable.contains_key(&term_key(term)));

    self.rewrite_links.borrow_mut().retain(|key, _| reachable.contains_key(key));
  }

  pub fn len(&self) -> usize {
    self.buckets.values().map(Vec::len).sum::<usize>() + self.variables.len()
  }
}

fn shape_eq(a: &Head, b: &Head) -> bool {
  a == b
}

fn args_identical(a: &[TermPtr], b: &[TermPtr]) -> bool {
  a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| term_ptr_eq(x, y))
}
