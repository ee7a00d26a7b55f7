/*!

Rendering the result of a run (spec §6.2): SZS status lines, the TPTP-ish clause listing for
"axioms used", and a PCL2-style proof trace. Term/clause printing needs the signature in scope to
recover symbol names, so it lives here as a small signature-threaded printer rather than through
[`sat_core::core::format::Formattable`] (that trait renders a self-contained value; a bare
[`sat_core::core::term_bank::TermPtr`] carries only interned ids).

*/

use std::fmt::Write as _;

use sat_core::core::clause::{Clause, ClauseId, ClauseSet, InferenceKind};
use sat_core::core::literal::Literal;
use sat_core::core::signature::Signature;
use sat_core::core::term_bank::{term_ptr_eq, TermPtr};
use sat_core::error::TerminationReason;
use sat_core::proof::Proof;

/// The SZS ontology status strings a run can report (spec §6.2/§7).
pub fn szs_status(reason: TerminationReason) -> &'static str {
  match reason {
    TerminationReason::Unsatisfiable => "Theorem",
    TerminationReason::Satisfiable => "Satisfiable",
    TerminationReason::ResourceOut => "ResourceOut",
    TerminationReason::GaveUp => "GaveUp",
    TerminationReason::Error => "Error",
  }
}

fn write_term(out: &mut String, signature: &Signature, term: &TermPtr) {
  match term.symbol() {
    Some(id) => {
      let symbol = signature.symbol(id);
      write!(out, "{}", symbol.name).unwrap();
      if !term.args.is_empty() {
        out.push('(');
        for (i, arg) in term.args.iter().enumerate() {
          if i > 0 {
            out.push(',');
          }
          write_term(out, signature, arg);
        }
        out.push(')');
      }
    }
    None => {
      let index = term.variable_index().expect("non-symbol term is a variable");
      write!(out, "X{}", index.0).unwrap();
    }
  }
}

fn write_literal(out: &mut String, signature: &Signature, literal: &Literal, true_term: &TermPtr) {
  if term_ptr_eq(&literal.rhs, true_term) {
    if !literal.positive {
      out.push('~');
    }
    write_term(out, signature, &literal.lhs);
  } else {
    write_term(out, signature, &literal.lhs);
    out.push_str(if literal.positive { " = " } else { " != " });
    write_term(out, signature, &literal.rhs);
  }
}

/// Renders one clause as a TPTP `cnf(...)` declaration.
pub fn render_clause(signature: &Signature, true_term: &TermPtr, name: &str, role: &str, clause: &Clause) -> String {
  let mut out = String::new();
  write!(out, "cnf({name}, {role}, ").unwrap();
  if clause.literals.is_empty() {
    out.push_str("$false");
  } else {
    for (i, literal) in clause.literals.iter().enumerate() {
      if i > 0 {
        out.push_str(" | ");
      }
      write_literal(&mut out, signature, literal, true_term);
    }
  }
  out.push_str(").");
  out
}

fn inference_name(kind: InferenceKind) -> &'static str {
  match kind {
    InferenceKind::Initial => "initial",
    InferenceKind::Superposition => "superposition",
    InferenceKind::EqualityResolution => "equality_resolution",
    InferenceKind::EqualityFactoring => "equality_factoring",
    InferenceKind::Subsumption => "subsumption",
    InferenceKind::SimplifyReflect => "simplify_reflect",
    InferenceKind::Rewrite => "rewrite",
  }
}

/// Renders a reconstructed proof as a PCL2-style trace: one line per step, axioms first.
pub fn render_proof(signature: &Signature, true_term: &TermPtr, clauses: &ClauseSet, proof: &Proof) -> String {
  let mut out = String::new();
  for step in &proof.steps {
    let Some(clause) = clauses.get(step.clause) else { continue };
    write!(out, "{} : ", step.clause.0).unwrap();
    if clause.literals.is_empty() {
      out.push_str("$false");
    } else {
      for (i, literal) in clause.literals.iter().enumerate() {
        if i > 0 {
          out.push_str(" | ");
        }
        write_literal(&mut out, signature, literal, true_term);
      }
    }
    out.push_str(" : ");
    match step.kind {
      None => out.push_str("axiom"),
      Some(kind) => {
        write!(out, "{}(", inference_name(kind)).unwrap();
        for (i, parent) in step.parents.iter().enumerate() {
          if i > 0 {
            out.push_str(", ");
          }
          write!(out, "{}", parent.0).unwrap();
        }
        out.push(')');
      }
    }
    out.push_str(".\n");
  }
  out
}

/// Renders a reconstructed proof as a sequence of TPTP `cnf(...)` declarations, one per step, with
/// the derivation recorded as a trailing comment (TPTP has no native inference-annotation syntax
/// in the CNF dialect this prover reads, so the comment mirrors what PCL2 states structurally).
pub fn render_proof_tptp(signature: &Signature, true_term: &TermPtr, clauses: &ClauseSet, proof: &Proof) -> String {
  let mut out = String::new();
  for step in &proof.steps {
    let Some(clause) = clauses.get(step.clause) else { continue };
    let name = format!("step{}", step.clause.0);
    out.push_str(&render_clause(signature, true_term, &name, "plain", clause));
    match step.kind {
      None => out.push_str(" % axiom"),
      Some(kind) => {
        write!(out, " % {}(", inference_name(kind)).unwrap();
        for (i, parent) in step.parents.iter().enumerate() {
          if i > 0 {
            out.push_str(", ");
          }
          write!(out, "step{}", parent.0).unwrap();
        }
        out.push(')');
      }
    }
    out.push('\n');
  }
  out
}

/// Renders the "axioms used" list (spec §6.2): one `cnf(...)` line per axiom that actually
/// contributed to the proof, in the order they were first introduced.
pub fn render_axioms_used(signature: &Signature, true_term: &TermPtr, clauses: &ClauseSet, axioms: &[ClauseId]) -> String {
  let mut out = String::new();
  for id in axioms {
    if let Some(clause) = clauses.get(*id) {
      out.push_str(&render_clause(signature, true_term, &format!("ax{}", id.0), "axiom", clause));
      out.push('\n');
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use enumflags2::BitFlags;
  use sat_abs::SmallVec;
  use sat_core::core::clause::ClauseId;
  use sat_core::core::signature::Signature;
  use sat_core::core::term_bank::TermBank;

  #[test]
  fn renders_a_ground_unit_clause_as_tptp_cnf() {
    let mut signature = Signature::new();
    let mut bank = TermBank::new(sat_core::core::signature::reserved::TRUE);
    let boolean = signature.sorts.boolean();
    let individual = signature.sorts.individual();
    let p = signature.declare("p", 1, boolean, BitFlags::empty());
    let a = signature.declare("a", 0, individual, BitFlags::empty());
    let a_sym = signature.symbol(a).clone();
    let ta = bank.intern_term(&a_sym, SmallVec::new()).unwrap();
    let p_sym = signature.symbol(p).clone();
    let pa = bank.intern_term(&p_sym, SmallVec::from_vec(vec![ta])).unwrap();
    let true_term = bank.true_term();
    let clause = Clause::new(ClauseId(1), vec![Literal::new(pa, true_term.clone(), true)], None);

    let rendered = render_clause(&signature, &true_term, "c1", "axiom", &clause);
    assert_eq!(rendered, "cnf(c1, axiom, p(a)).");
  }

  #[test]
  fn szs_status_maps_unsatisfiable_to_theorem() {
    assert_eq!(szs_status(TerminationReason::Unsatisfiable), "Theorem");
    assert_eq!(szs_status(TerminationReason::Satisfiable), "Satisfiable");
  }
}
