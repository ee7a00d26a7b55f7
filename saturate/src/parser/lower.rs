/*!

Lowers the format-agnostic [`super::ast`] into `sat_core` clauses. Symbols are auto-declared on
first use: a name applied directly as a literal (no `=`/`!=`) is a predicate (sort `Boolean`); a
name used as an argument, or on either side of an equation, is an ordinary function symbol (sort
`Individual`). Variable names are scoped to a single clause — `X` in one `cnf(...)` has nothing to
do with `X` in the next.

*/

use enumflags2::BitFlags;
use sat_abs::{HashMap, SmallVec};
use sat_core::core::clause::{Clause, ClauseId};
use sat_core::core::literal::Literal as CoreLiteral;
use sat_core::core::signature::{Signature, SortId, SymbolAttribute};
use sat_core::core::term_bank::{TermBank, TermPtr};

use crate::error::{SaturateError, SaturateResult};
use crate::parser::ast::{ClauseDecl, Literal, Term};

fn lower_term(
  term: &Term,
  expected_sort: SortId,
  signature: &mut Signature,
  bank: &mut TermBank,
  variables: &mut HashMap<String, u32>,
) -> SaturateResult<TermPtr> {
  match term {
    Term::Var(name) => {
      let individual = signature.sorts.individual();
      let index = *variables.entry(name.clone()).or_insert_with(|| {
        let fresh = bank.intern_variable(individual, None);
        fresh.variable_index().expect("just interned a variable").0
      });
      Ok(bank.intern_variable(individual, Some(index)))
    }
    Term::App(name, args) => {
      let mut lowered = SmallVec::<[TermPtr; 4]>::new();
      let individual = signature.sorts.individual();
      for arg in args {
        lowered.push(lower_term(arg, individual, signature, bank, variables)?);
      }
      let symbol_id = signature.declare(name, args.len() as u32, expected_sort, BitFlags::<SymbolAttribute>::empty());
      let symbol = signature.symbol(symbol_id).clone();
      bank
        .intern_term(&symbol, lowered)
        .map_err(|source| SaturateError::Semantic(format!("lowering `{name}`: {source}")))
    }
  }
}

fn lower_literal(
  literal: &Literal,
  signature: &mut Signature,
  bank: &mut TermBank,
  variables: &mut HashMap<String, u32>,
) -> SaturateResult<CoreLiteral> {
  match &literal.rhs {
    None => {
      let boolean = signature.sorts.boolean();
      let atom = lower_term(&literal.lhs, boolean, signature, bank, variables)?;
      Ok(CoreLiteral::new(atom, bank.true_term(), literal.positive))
    }
    Some(rhs) => {
      let individual = signature.sorts.individual();
      let lhs = lower_term(&literal.lhs, individual, signature, bank, variables)?;
      let rhs = lower_term(rhs, individual, signature, bank, variables)?;
      Ok(CoreLiteral::new(lhs, rhs, literal.positive))
    }
  }
}

/// Lowers a single parsed clause declaration into a core [`Clause`] with a fresh variable scope.
/// `id` is supplied by the caller (typically [`sat_core::saturation::proof_state::ProofState::fresh_clause_id`]).
pub fn lower_clause(decl: &ClauseDecl, signature: &mut Signature, bank: &mut TermBank, id: ClauseId) -> SaturateResult<Clause> {
  let mut variables = HashMap::new();
  let mut literals = Vec::with_capacity(decl.literals.len());
  for literal in &decl.literals {
    literals.push(lower_literal(literal, signature, bank, &mut variables)?);
  }
  Ok(Clause::new(id, literals, None))
}

#[cfg(test)]
mod tests {
  use super::*;
  use sat_core::core::signature::reserved;

  fn fresh_bank(signature: &Signature) -> TermBank {
    let _ = signature;
    TermBank::new(reserved::TRUE)
  }

  #[test]
  fn predicate_atom_lowers_to_a_boolean_literal_against_true() {
    let mut signature = Signature::new();
    let mut bank = fresh_bank(&signature);
    let decl = ClauseDecl {
      name: "c".to_string(),
      role: crate::parser::ast::Role::Axiom,
      literals: vec![Literal { lhs: Term::App("p".to_string(), vec![Term::App("a".to_string(), Vec::new())]), rhs: None, positive: true }],
    };
    let clause = lower_clause(&decl, &mut signature, &mut bank, ClauseId(1)).unwrap();
    assert_eq!(clause.literals.len(), 1);
    assert!(sat_core::core::term_bank::term_ptr_eq(&clause.literals[0].rhs, &bank.true_term()));
  }

  #[test]
  fn repeated_variable_names_share_one_index_within_a_clause() {
    let mut signature = Signature::new();
    let mut bank = fresh_bank(&signature);
    let decl = ClauseDecl {
      name: "c".to_string(),
      role: crate::parser::ast::Role::Axiom,
      literals: vec![Literal { lhs: Term::Var("X".to_string()), rhs: Some(Term::Var("X".to_string())), positive: true }],
    };
    let clause = lower_clause(&decl, &mut signature, &mut bank, ClauseId(2)).unwrap();
    let literal = &clause.literals[0];
    assert!(sat_core::core::term_bank::term_ptr_eq(&literal.lhs, &literal.rhs));
  }
}
