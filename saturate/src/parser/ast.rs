/*!

A small, format-agnostic clause AST. The TPTP, LOP, and PCL2 readers all produce these same types;
lowering into `sat_core` terms happens once, in [`super::lower`], regardless of which surface
syntax a clause arrived in.

*/

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
  Var(String),
  App(String, Vec<Term>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
  pub lhs: Term,
  /// `Some(rhs)` for an equational literal (`lhs = rhs` or `lhs != rhs`); `None` for a plain
  /// predicate atom, where `lhs` is the whole atom (e.g. `p(a)`).
  pub rhs: Option<Term>,
  pub positive: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
  Axiom,
  Conjecture,
  NegatedConjecture,
  Plain,
}

impl Role {
  pub fn parse(name: &str) -> Role {
    match name {
      "conjecture" => Role::Conjecture,
      "negated_conjecture" => Role::NegatedConjecture,
      "axiom" | "hypothesis" | "lemma" | "theorem" | "definition" => Role::Axiom,
      _ => Role::Plain,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClauseDecl {
  pub name: String,
  pub role: Role,
  pub literals: Vec<Literal>,
}

/// A PCL2 proof step: `id : clause : justification`. `id` is a dotted sequence of positive
/// integers (e.g. `1.2.3`); `justification` names an inference and its parent step ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofStepDecl {
  pub id: Vec<u32>,
  pub clause: Vec<Literal>,
  pub justification: Justification,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Justification {
  pub operator: String,
  pub parents: Vec<Vec<u32>>,
}
