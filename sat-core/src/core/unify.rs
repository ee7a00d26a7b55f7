/*!

Syntactic first-order unification (Robinson's algorithm, with an occurs-check) and one-sided
matching over shared terms, both built on the watermarked [`Substitution`] (spec §4.2). On failure
the substitution is restored to its watermark at entry; on success, bindings remain installed for
the caller to use and later undo.

*/

use crate::core::substitution::Substitution;
use crate::core::term_bank::{term_ptr_eq, Head, TermPtr};

/// Unifies `s` and `t`, installing bindings in `substitution`. On failure, `substitution` is
/// rewound to its state at entry.
pub fn unify(s: &TermPtr, t: &TermPtr, substitution: &mut Substitution) -> bool {
  let watermark = substitution.mark();
  if unify_inner(s, t, substitution) {
    true
  } else {
    substitution.rewind(watermark);
    false
  }
}

fn unify_inner(s: &TermPtr, t: &TermPtr, substitution: &mut Substitution) -> bool {
  let s = resolve(s, substitution);
  let t = resolve(t, substitution);

  if term_ptr_eq(&s, &t) {
    return true;
  }

  match (&s.head, &t.head) {
    (Head::Variable(index, _), _) => bind_if_acyclic(*index, t, substitution),
    (_, Head::Variable(index, _)) => bind_if_acyclic(*index, s, substitution),
    (Head::Symbol(f), Head::Symbol(g)) => {
      if f != g || s.args.len() != t.args.len() {
        return false;
      }
      s.args.iter().zip(t.args.iter()).all(|(si, ti)| unify_inner(si, ti, substitution))
    }
  }
}

/// One-sided matching: variables in `instance` are treated as constants; only `pattern`'s
/// variables may be bound. Same watermark discipline as [`unify`].
pub fn matches(pattern: &TermPtr, instance: &TermPtr, substitution: &mut Substitution) -> bool {
  let watermark = substitution.mark();
  if match_inner(pattern, instance, substitution) {
    true
  } else {
    substitution.rewind(watermark);
    false
  }
}

fn match_inner(pattern: &TermPtr, instance: &TermPtr, substitution: &mut Substitution) -> bool {
  let pattern = resolve(pattern, substitution);

  if let Head::Variable(index, _) = pattern.head {
    return match substitution.get(index) {
      Some(bound) => term_ptr_eq(&bound, instance),
      None => {
        substitution.bind(index, instance.clone());
        true
      }
    };
  }

  match (&pattern.head, &instance.head) {
    (Head::Symbol(f), Head::Symbol(g)) => {
      if f != g || pattern.args.len() != instance.args.len() {
        return false;
      }
      pattern.args.iter().zip(instance.args.iter()).all(|(p, i)| match_inner(p, i, substitution))
    }
    _ => false,
  }
}

fn resolve(term: &TermPtr, substitution: &Substitution) -> TermPtr {
  match term.variable_index() {
    Some(index) => match substitution.get(index) {
      Some(bound) => resolve(&bound, substitution),
      None => term.clone(),
    },
    None => term.clone(),
  }
}

fn bind_if_acyclic(index: crate::core::substitution::VariableIndex, value: TermPtr, substitution: &mut Substitution) -> bool {
  if let Some(existing) = substitution.get(index) {
    return unify_inner(&existing, &value, substitution);
  }
  if occurs(index, &value, substitution) {
    return false;
  }
  substitution.bind(index, value);
  true
}

fn occurs(index: crate::core::substitution::VariableIndex, term: &TermPtr, substitution: &Substitution) -> bool {
  let term = resolve(term, substitution);
  match term.variable_index() {
    Some(other) => other == index,
    None => term.args.iter().any(|arg| occurs(index, arg, substitution)),
  }
}
