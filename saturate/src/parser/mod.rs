/*!

Input parsing (spec §6.1, §6.3's format selector): three clause surface syntaxes — TPTP CNF, LOP,
and PCL2 proof traces — sharing one [`ast`] and one [`lower`] step into `sat_core` types.

*/

pub mod ast;
pub mod lop;
pub mod lower;
pub mod pcl2;
pub mod tptp;

use sat_core::core::clause::{Clause, ClauseId};
use sat_core::core::signature::Signature;
use sat_core::core::term_bank::TermBank;

use crate::error::{SaturateError, SaturateResult};

/// The input syntaxes `saturate` understands, selected by `--input-format` or guessed by
/// [`detect_format`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputFormat {
  Tptp,
  Lop,
  Auto,
}

/// A first-token sniff: `cnf(`/`fof(` marks TPTP, anything else is assumed to be LOP. This mirrors
/// how a human skimming the file would tell the two apart — there is no ambiguity between the two
/// surface syntaxes in practice, since LOP clauses never start with a bare `cnf` or `fof` identifier
/// followed by `(`.
pub fn detect_format(source: &str) -> InputFormat {
  let trimmed = source.trim_start();
  if trimmed.starts_with("cnf(") || trimmed.starts_with("fof(") {
    InputFormat::Tptp
  } else {
    InputFormat::Lop
  }
}

/// Parses `source` (named `file` for diagnostics) as a sequence of clause declarations under the
/// requested format, auto-detecting it first if `format` is [`InputFormat::Auto`].
pub fn parse_clauses(source: &str, file: &str, format: InputFormat) -> SaturateResult<Vec<ast::ClauseDecl>> {
  let resolved = match format {
    InputFormat::Auto => detect_format(source),
    other => other,
  };
  match resolved {
    InputFormat::Tptp => tptp::parse(source, file),
    InputFormat::Lop => lop::parse(source, file),
    InputFormat::Auto => unreachable!("detect_format never returns Auto"),
  }
}

/// Parses and lowers every clause declaration in `source` in one step, assigning each a fresh id
/// from `next_id` (typically `ProofState::fresh_clause_id`).
pub fn parse_and_lower(
  source: &str,
  file: &str,
  format: InputFormat,
  signature: &mut Signature,
  bank: &mut TermBank,
  mut next_id: impl FnMut() -> ClauseId,
) -> SaturateResult<Vec<(ast::ClauseDecl, Clause)>> {
  let decls = parse_clauses(source, file, format)?;
  let mut lowered = Vec::with_capacity(decls.len());
  for decl in decls {
    let id = next_id();
    let clause = lower::lower_clause(&decl, signature, bank, id)
      .map_err(|err| match err {
        SaturateError::Semantic(message) => SaturateError::Semantic(format!("in clause `{}`: {message}", decl.name)),
        other => other,
      })?;
    lowered.push((decl, clause));
  }
  Ok(lowered)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn detects_tptp_by_leading_cnf_keyword() {
    assert_eq!(detect_format("cnf(c1, axiom, p(a))."), InputFormat::Tptp);
  }

  #[test]
  fn detects_lop_when_no_cnf_or_fof_keyword_leads() {
    assert_eq!(detect_format("p(a)."), InputFormat::Lop);
  }
}
