/*!

Lexicographic path ordering. Two terms compare by recursively descending into arguments: a term
`f(s1..sn)` is greater than `t` if some `si` is greater-or-equal to `t`, or if `f`/`g` are equal in
precedence and the argument tuples compare greater lexicographically (or as a multiset, per the
symbol's [`Status`]) with every `t`'s argument dominated, or if `f` outranks `g` in precedence and
every argument of `t` is dominated by `s` itself.

*/

use std::cmp::Ordering as StdOrdering;

use sat_abs::HashMap;

use crate::core::ordering::{ComparisonResult, Ordering, Precedence, Status};
use crate::core::signature::SymbolId;
use crate::core::term_bank::{term_ptr_eq, Head, TermPtr};

pub struct Lpo {
  precedence: Precedence,
  status: HashMap<SymbolId, Status>,
}

impl Lpo {
  pub fn new(precedence: Precedence) -> Self {
    Self { precedence, status: HashMap::new() }
  }

  pub fn with_status(mut self, symbol: SymbolId, status: Status) -> Self {
    self.status.insert(symbol, status);
    self
  }

  fn status_of(&self, symbol: SymbolId) -> Status {
    self.status.get(&symbol).copied().unwrap_or_default()
  }

  /// `s >(lpo) t`, used both at the top level and recursively.
  fn gt(&self, s: &TermPtr, t: &TermPtr) -> bool {
    if term_ptr_eq(s, t) {
      return false;
    }
    match &t.head {
      Head::Variable(..) => {
        // s > t for a variable t iff t occurs properly in s, or (ground case) always since
        // variables are the minimal elements of the ordering and s != t.
        occurs_in_args(s, t) || !matches!(&s.head, Head::Variable(..))
      }
      Head::Symbol(g) => match &s.head {
        Head::Variable(..) => false,
        Head::Symbol(f) => {
          // Case 1: some argument of s is >= t.
          if s.args.iter().any(|si| term_ptr_eq(si, t) || self.gt(si, t)) {
            return true;
          }
          match self.precedence.compare(*f, *g) {
            StdOrdering::Equal if f == g => {
              // Case 2: same symbol, compare argument tuples per status.
              self.args_gt(*f, &s.args, &t.args, s, t)
            }
            StdOrdering::Greater => t.args.iter().all(|ti| self.gt(s, ti)),
            _ => false,
          }
        }
      },
    }
  }

  fn args_gt(&self, symbol: SymbolId, s_args: &[TermPtr], t_args: &[TermPtr], s: &TermPtr, t: &TermPtr) -> bool {
    match self.status_of(symbol) {
      Status::Lexicographic => {
        for (si, ti) in s_args.iter().zip(t_args.iter()) {
          if term_ptr_eq(si, ti) {
            continue;
          }
          return self.gt(si, ti) && t_args.iter().all(|tj| self.gt(s, tj));
        }
        false
      }
      Status::Multiset => multiset_gt(self, s_args, t_args) && t.args.iter().all(|tj| self.gt(s, tj)),
    }
  }
}

fn occurs_in_args(term: &TermPtr, variable: &TermPtr) -> bool {
  term.args.iter().any(|arg| term_ptr_eq(arg, variable) || occurs_in_args(arg, variable))
}

fn multiset_gt(lpo: &Lpo, s_args: &[TermPtr], t_args: &[TermPtr]) -> bool {
  // Dershowitz–Manna multiset extension: s_args > t_args iff every element of t_args is
  // dominated by some element of s_args not matched to a smaller or equal remainder.
  let mut remaining_t: Vec<&TermPtr> = t_args.iter().collect();
  let mut remaining_s: Vec<&TermPtr> = s_args.iter().collect();

  // Remove exact pairwise matches first.
  remaining_s.retain(|s_elem| {
    if let Some(pos) = remaining_t.iter().position(|t_elem| term_ptr_eq(s_elem, t_elem)) {
      remaining_t.remove(pos);
      false
    } else {
      true
    }
  });

  if remaining_t.is_empty() {
    // All of t's elements were matched exactly; s strictly dominates iff it has leftover elements.
    return !remaining_s.is_empty();
  }

  remaining_t.iter().all(|t_elem| remaining_s.iter().any(|s_elem| lpo.gt(s_elem, t_elem)))
}

impl Ordering for Lpo {
  fn compare_uncached(&self, s: &TermPtr, t: &TermPtr) -> ComparisonResult {
    if term_ptr_eq(s, t) {
      return ComparisonResult::Equal;
    }
    if self.gt(s, t) {
      return ComparisonResult::Greater;
    }
    if self.gt(t, s) {
      return ComparisonResult::Less;
    }
    ComparisonResult::Uncomparable
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::signature::Signature;
  use crate::core::term_bank::TermBank;
  use enumflags2::BitFlags;
  use sat_abs::SmallVec;

  #[test]
  fn constants_compare_by_precedence() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let individual = signature.sorts.individual();
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let b = signature.declare("b", 0, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let b_sym = signature.symbol(b).clone();
    let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
    let tb = bank.intern_term(&b_sym, SmallVec::new()).unwrap();

    let lpo = Lpo::new(Precedence::from_order([a, b]));
    assert_eq!(lpo.compare_uncached(&tb, &ta), ComparisonResult::Greater);
    assert_eq!(lpo.compare_uncached(&ta, &tb), ComparisonResult::Less);
  }

  #[test]
  fn subterm_is_smaller_than_its_parent() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let individual = signature.sorts.individual();
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let f = signature.declare("f", 1, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let f_sym = signature.symbol(f).clone();
    let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
    let fa = bank.intern_term(&f_sym, SmallVec::from_vec(vec![ta.clone()])).unwrap();

    let lpo = Lpo::new(Precedence::from_order([a, f]));
    assert_eq!(lpo.compare_uncached(&fa, &ta), ComparisonResult::Greater);
  }

  #[test]
  fn ordering_is_stable_under_substitution() {
    // f(a) > a  =>  f(f(a)) > f(a) (substituting a -> f(a) throughout a fixed skeleton)
    let mut signature = Signature::new();
    let mut bank = TermBank::new(crate::core::signature::reserved::TRUE);
    let individual = signature.sorts.individual();
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let f = signature.declare("f", 1, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let f_sym = signature.symbol(f).clone();
    let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
    let fa = bank.intern_term(&f_sym, SmallVec::from_vec(vec![ta.clone()])).unwrap();
    let ffa = bank.intern_term(&f_sym, SmallVec::from_vec(vec![fa.clone()])).unwrap();

    let lpo = Lpo::new(Precedence::from_order([a, f]));
    assert_eq!(lpo.compare_uncached(&fa, &ta), ComparisonResult::Greater);
    assert_eq!(lpo.compare_uncached(&ffa, &fa), ComparisonResult::Greater);
  }
}
