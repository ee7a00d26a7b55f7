/*!

The signature is the symbol table: every function/predicate symbol gets an interned [`SymbolId`],
an external name, an arity, a declared sort, and a set of property flags. A handful of codes are
reserved for logical connectives and the Boolean constant `true`, exactly as the source system
reserves low function codes for its built-in symbols.

Sorts are interned separately in a [`SortBank`]; sort equality is always by [`SortId`], never by
structural comparison, matching the "types are interned; equality is pointer equality" invariant
of the data model.

*/

use std::fmt;

use enumflags2::{bitflags, BitFlags};
use sat_abs::{HashMap, IString};

use crate::error::{CoreError, CoreResult};

/// An interned sort. `Kind` is the top sort of a connected component (the "kind of sorts").
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SortId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SortKind {
  Boolean,
  Individual,
  Integer,
  Rational,
  Real,
  /// A user-declared sort, or an arrow type's domain/range component.
  User(IString),
  /// The top sort of a connected component.
  Kind,
}

#[derive(Clone, Debug)]
pub enum SortNode {
  Base(SortKind),
  /// An arrow type: `(domain...) -> range`.
  Arrow { domain: Vec<SortId>, range: SortId },
}

#[derive(Default)]
pub struct SortBank {
  nodes: Vec<SortNode>,
  base_index: HashMap<SortKind, SortId>,
  arrow_index: HashMap<(Vec<SortId>, SortId), SortId>,
}

impl SortBank {
  pub fn new() -> Self {
    let mut bank = Self::default();
    for kind in [SortKind::Kind, SortKind::Boolean, SortKind::Individual, SortKind::Integer, SortKind::Rational, SortKind::Real] {
      bank.intern_base(kind);
    }
    bank
  }

  pub fn intern_base(&mut self, kind: SortKind) -> SortId {
    if let Some(&id) = self.base_index.get(&kind) {
      return id;
    }
    let id = SortId(self.nodes.len() as u32);
    self.nodes.push(SortNode::Base(kind.clone()));
    self.base_index.insert(kind, id);
    id
  }

  pub fn intern_arrow(&mut self, domain: Vec<SortId>, range: SortId) -> SortId {
    let key = (domain.clone(), range);
    if let Some(&id) = self.arrow_index.get(&key) {
      return id;
    }
    let id = SortId(self.nodes.len() as u32);
    self.nodes.push(SortNode::Arrow { domain, range });
    self.arrow_index.insert(key, id);
    id
  }

  pub fn node(&self, id: SortId) -> &SortNode {
    &self.nodes[id.0 as usize]
  }

  pub fn kind(&self) -> SortId {
    SortId(0)
  }

  pub fn boolean(&self) -> SortId {
    self.base_index[&SortKind::Boolean]
  }

  pub fn individual(&self) -> SortId {
    self.base_index[&SortKind::Individual]
  }
}

#[bitflags]
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SymbolAttribute {
  Associative,
  Commutative,
  Skolem,
  DefinitionPredicate,
  Interpreted,
  Arithmetic,
  /// A special system symbol such as equality or the logical connectives.
  SpecialSystemSymbol,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// Reserved low symbol codes, mirroring the source's reservation of low function codes for
/// built-in symbols.
pub mod reserved {
  use super::SymbolId;

  pub const EQUALITY: SymbolId = SymbolId(0);
  pub const TRUE: SymbolId = SymbolId(1);
  pub const NOT: SymbolId = SymbolId(2);
  pub const AND: SymbolId = SymbolId(3);
  pub const OR: SymbolId = SymbolId(4);
  pub const FIRST_USER_SYMBOL: u32 = 5;
}

#[derive(Clone, Debug)]
pub struct Symbol {
  pub id: SymbolId,
  pub name: IString,
  pub arity: u32,
  pub sort: SortId,
  pub attributes: BitFlags<SymbolAttribute>,
}

impl Symbol {
  pub fn is_predicate(&self, signature: &Signature) -> bool {
    self.sort == signature.sorts.boolean()
  }
}

/// Symbol interning and lookup. Function symbols are distinguished from predicates purely by
/// declared sort (predicates have sort `Boolean`); this mirrors "arity of the head" being the
/// only shape distinction the term bank cares about.
pub struct Signature {
  symbols: Vec<Symbol>,
  /// `(name, arity)` uniquely identifies an overload.
  by_name_arity: HashMap<(IString, u32), SymbolId>,
  pub sorts: SortBank,
}

impl Default for Signature {
  fn default() -> Self {
    Self::new()
  }
}

impl Signature {
  pub fn new() -> Self {
    let mut sorts = SortBank::new();
    let boolean = sorts.boolean();
    let individual = sorts.individual();

    let mut signature = Self { symbols: Vec::new(), by_name_arity: HashMap::new(), sorts };

    let equality_sort = signature.sorts.intern_arrow(vec![individual, individual], boolean);
    signature.declare_reserved(reserved::EQUALITY, "=", 2, equality_sort);
    signature.declare_reserved(reserved::TRUE, "$true", 0, boolean);
    let unary_bool = signature.sorts.intern_arrow(vec![boolean], boolean);
    signature.declare_reserved(reserved::NOT, "~", 1, unary_bool);
    let binary_bool = signature.sorts.intern_arrow(vec![boolean, boolean], boolean);
    signature.declare_reserved(reserved::AND, "&", 2, binary_bool);
    signature.declare_reserved(reserved::OR, "|", 2, binary_bool);

    signature
  }

  fn declare_reserved(&mut self, id: SymbolId, name: &str, arity: u32, sort: SortId) {
    let name: IString = name.into();
    let symbol = Symbol { id, name: name.clone(), arity, sort, attributes: SymbolAttribute::SpecialSystemSymbol.into() };
    debug_assert_eq!(id.0 as usize, self.symbols.len());
    self.symbols.push(symbol);
    self.by_name_arity.insert((name, arity), id);
  }

  /// Declares a new symbol, or returns the existing id if `(name, arity)` was already declared
  /// with the same sort.
  pub fn declare(&mut self, name: &str, arity: u32, sort: SortId, attributes: BitFlags<SymbolAttribute>) -> SymbolId {
    let name: IString = name.into();
    if let Some(&id) = self.by_name_arity.get(&(name.clone(), arity)) {
      return id;
    }
    let id = SymbolId(self.symbols.len() as u32);
    self.symbols.push(Symbol { id, name: name.clone(), arity, sort, attributes });
    self.by_name_arity.insert((name, arity), id);
    id
  }

  pub fn lookup(&self, name: &str, arity: u32) -> Option<SymbolId> {
    self.by_name_arity.get(&(name.into(), arity)).copied()
  }

  pub fn resolve_or_err(&self, name: &str, arity: u32) -> CoreResult<SymbolId> {
    self.lookup(name, arity).ok_or_else(|| CoreError::UnknownSymbol(format!("{name}/{arity}")))
  }

  pub fn symbol(&self, id: SymbolId) -> &Symbol {
    &self.symbols[id.0 as usize]
  }

  /// Every declared symbol, in declaration order (reserved symbols first).
  pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
    self.symbols.iter()
  }

  pub fn check_arity(&self, id: SymbolId, got: usize) -> CoreResult<()> {
    let symbol = self.symbol(id);
    if symbol.arity as usize != got {
      Err(CoreError::SymbolArityMismatch { symbol: id, expected: symbol.arity, got: got as u32 })
    } else {
      Ok(())
    }
  }

  pub fn len(&self) -> usize {
    self.symbols.len()
  }

  pub fn is_empty(&self) -> bool {
    self.symbols.is_empty()
  }
}
