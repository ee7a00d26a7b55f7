/*!

Maps every non-variable subterm occurring in any clause's literals to the set of clause positions
where it occurs, distinguishing rewrite-restricted positions (spec §4.4, §4.6). Maintained in
lockstep with clause-set membership: the owning `ClauseSet`'s insert/remove paths are expected to
call [`SubtermIndex::insert_clause`]/[`SubtermIndex::remove_clause`].

*/

use sat_abs::HashMap;

use crate::core::clause::{Clause, ClauseId};
use crate::core::term_bank::{Head, TermPtr};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClausePosition {
  pub clause: ClauseId,
  pub literal: usize,
  /// `false` for the literal's left-hand side, `true` for the right-hand side.
  pub side: bool,
  pub restricted: bool,
}

fn term_key(term: &TermPtr) -> usize {
  std::rc::Rc::as_ptr(term) as usize
}

#[derive(Default)]
pub struct SubtermIndex {
  occurrences: HashMap<usize, Vec<ClausePosition>>,
}

impl SubtermIndex {
  pub fn new() -> Self {
    Self::default()
  }

  fn walk(term: &TermPtr, clause: ClauseId, literal: usize, side: bool, restricted: bool, occurrences: &mut HashMap<usize, Vec<ClausePosition>>) {
    if let Head::Symbol(_) = term.head {
      occurrences.entry(term_key(term)).or_default().push(ClausePosition { clause, literal, side, restricted });
      for arg in &term.args {
        Self::walk(arg, clause, literal, side, restricted, occurrences);
      }
    }
  }

  pub fn insert_clause(&mut self, clause: &Clause) {
    for (i, literal) in clause.literals.iter().enumerate() {
      let restricted = literal.has_property(crate::core::literal::LiteralProperty::Oriented) && !literal.positive;
      Self::walk(&literal.lhs, clause.id, i, false, restricted, &mut self.occurrences);
      Self::walk(&literal.rhs, clause.id, i, true, restricted, &mut self.occurrences);
    }
  }

  pub fn remove_clause(&mut self, clause: &Clause) {
    for bucket in self.occurrences.values_mut() {
      bucket.retain(|position| position.clause != clause.id);
    }
    self.occurrences.retain(|_, bucket| !bucket.is_empty());
  }

  pub fn occurrences_of(&self, term: &TermPtr) -> &[ClausePosition] {
    self.occurrences.get(&term_key(term)).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn len(&self) -> usize {
    self.occurrences.len()
  }

  pub fn is_empty(&self) -> bool {
    self.occurrences.is_empty()
  }
}
