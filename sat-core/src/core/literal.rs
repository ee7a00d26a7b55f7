/*!

An equational literal is an ordered pair of terms with a sign. When the right-hand term is the
bank's `$true` constant the literal is *non-equational* (an ordinary atom); otherwise it is a
genuine equation. Properties track maximality, orientation, and the roles the generating
inferences care about.

*/

use enumflags2::{bitflags, BitFlags};

use crate::core::ordering::{ComparisonResult, Ordering};
use crate::core::term_bank::{term_ptr_eq, TermPtr};

#[bitflags]
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LiteralProperty {
  Maximal,
  StrictlyMaximal,
  Oriented,
  SplitLiteral,
  AnswerLiteral,
  PseudoLiteral,
  SelectedForParamodulation,
}

#[derive(Clone)]
pub struct Literal {
  pub lhs: TermPtr,
  pub rhs: TermPtr,
  pub positive: bool,
  properties: BitFlags<LiteralProperty>,
}

impl Literal {
  pub fn new(lhs: TermPtr, rhs: TermPtr, positive: bool) -> Self {
    Self { lhs, rhs, positive, properties: BitFlags::empty() }
  }

  pub fn is_equational(&self, true_term: &TermPtr) -> bool {
    !term_ptr_eq(&self.rhs, true_term)
  }

  pub fn negate(&self) -> Self {
    Self { lhs: self.lhs.clone(), rhs: self.rhs.clone(), positive: !self.positive, properties: BitFlags::empty() }
  }

  pub fn has_property(&self, property: LiteralProperty) -> bool {
    self.properties.contains(property)
  }

  pub fn set_maximal(&mut self, value: bool) {
    self.set_flag(LiteralProperty::Maximal, value);
  }

  pub fn set_strictly_maximal(&mut self, value: bool) {
    self.set_flag(LiteralProperty::StrictlyMaximal, value);
  }

  pub fn is_maximal(&self) -> bool {
    self.has_property(LiteralProperty::Maximal)
  }

  pub fn is_strictly_maximal(&self) -> bool {
    self.has_property(LiteralProperty::StrictlyMaximal)
  }

  fn set_flag(&mut self, property: LiteralProperty, value: bool) {
    if value {
      self.properties.insert(property);
    } else {
      self.properties.remove(property);
    }
  }

  /// Returns `(bigger, smaller)` sides of the literal's equation under `ordering`, used for the
  /// multiset extension that compares two literals (spec §4.3's "maximal-side marking").
  /// Ties and uncomparable sides are returned left-to-right, matching the order they were built in.
  pub fn ordered_sides<O: Ordering + ?Sized>(&self, ordering: &O) -> (TermPtr, TermPtr) {
    match ordering.compare_uncached(&self.lhs, &self.rhs) {
      ComparisonResult::Less => (self.rhs.clone(), self.lhs.clone()),
      _ => (self.lhs.clone(), self.rhs.clone()),
    }
  }

  /// A positive unit equality `s = t` is oriented once one side is known strictly greater; the
  /// greater side becomes the rewrite rule's left-hand side.
  pub fn orient<O: Ordering + ?Sized>(&mut self, ordering: &O) {
    if let ComparisonResult::Less = ordering.compare_uncached(&self.lhs, &self.rhs) {
      std::mem::swap(&mut self.lhs, &mut self.rhs);
    }
    self.properties.insert(LiteralProperty::Oriented);
  }
}
