/*!

PCL2 proof-trace syntax (spec §6.2): one step per line,

```text
1.2.3 : p(X) | ~q(a) : superposition(1.1, 1.2).
```

a dotted positive-integer step id, a clause (reusing the TPTP literal grammar), and a justification
naming an inference operator and the step ids of its parents. This reader is used for replaying or
checking an externally produced proof rather than for feeding axioms into a fresh saturation run.

*/

use crate::error::SaturateError;
use crate::parser::ast::{Justification, Literal, ProofStepDecl, Term};

#[derive(Clone, Debug, PartialEq)]
enum Token {
  Ident(String),
  Var(String),
  Number(u32),
  LParen,
  RParen,
  Comma,
  Dot,
  Pipe,
  Tilde,
  Colon,
  Equals,
  NotEquals,
}

struct Lexer<'a> {
  chars: std::iter::Peekable<std::str::CharIndices<'a>>,
  source: &'a str,
  file: String,
  line: usize,
  column: usize,
}

impl<'a> Lexer<'a> {
  fn new(source: &'a str, file: &str) -> Self {
    Self { chars: source.char_indices().peekable(), source, file, line: 1, column: 1 }
  }

  fn bump(&mut self) -> Option<char> {
    let (_, c) = self.chars.next()?;
    if c == '\n' {
      self.line += 1;
      self.column = 1;
    } else {
      self.column += 1;
    }
    Some(c)
  }

  fn error(&self, message: impl Into<String>) -> SaturateError {
    SaturateError::Syntax { file: self.file.clone(), line: self.line, column: self.column, message: message.into() }
  }

  fn skip_trivia(&mut self) {
    loop {
      match self.chars.peek() {
        Some((_, c)) if c.is_whitespace() => {
          self.bump();
        }
        Some((_, '%')) => {
          while let Some((_, c)) = self.chars.peek() {
            if *c == '\n' {
              break;
            }
            self.bump();
          }
        }
        _ => break,
      }
    }
  }

  /// Peeks ahead to decide whether a run of digits-and-dots is a dotted step id (`1.2.3`) or a
  /// single number followed by an unrelated `.` end-of-clause marker. A step id never has a
  /// trailing dot; a number token standing alone may.
  fn next_token(&mut self) -> Result<Option<Token>, SaturateError> {
    self.skip_trivia();
    let Some(&(start, c)) = self.chars.peek() else { return Ok(None) };

    if c == '(' {
      self.bump();
      return Ok(Some(Token::LParen));
    }
    if c == ')' {
      self.bump();
      return Ok(Some(Token::RParen));
    }
    if c == ',' {
      self.bump();
      return Ok(Some(Token::Comma));
    }
    if c == '.' {
      self.bump();
      return Ok(Some(Token::Dot));
    }
    if c == '|' {
      self.bump();
      return Ok(Some(Token::Pipe));
    }
    if c == '~' {
      self.bump();
      return Ok(Some(Token::Tilde));
    }
    if c == ':' {
      self.bump();
      return Ok(Some(Token::Colon));
    }
    if c == '=' {
      self.bump();
      return Ok(Some(Token::Equals));
    }
    if c == '!' {
      self.bump();
      match self.chars.peek() {
        Some((_, '=')) => {
          self.bump();
          return Ok(Some(Token::NotEquals));
        }
        _ => return Err(self.error("expected `=` after `!`")),
      }
    }
    if c.is_alphabetic() || c == '_' {
      let is_var = c.is_uppercase();
      let mut end = start + c.len_utf8();
      self.bump();
      while let Some(&(i, c)) = self.chars.peek() {
        if c.is_alphanumeric() || c == '_' {
          end = i + c.len_utf8();
          self.bump();
        } else {
          break;
        }
      }
      let text = self.source[start..end].to_string();
      return Ok(Some(if is_var { Token::Var(text) } else { Token::Ident(text) }));
    }
    if c.is_ascii_digit() {
      let mut end = start + c.len_utf8();
      self.bump();
      while let Some(&(i, c)) = self.chars.peek() {
        if c.is_ascii_digit() {
          end = i + c.len_utf8();
          self.bump();
        } else {
          break;
        }
      }
      let value: u32 = self.source[start..end]
        .parse()
        .map_err(|_| self.error("step id component out of range"))?;
      return Ok(Some(Token::Number(value)));
    }

    Err(self.error(format!("unexpected character `{c}`")))
  }
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  lookahead: Option<Token>,
}

impl<'a> Parser<'a> {
  pub fn new(source: &'a str, file: &str) -> Result<Self, SaturateError> {
    let mut lexer = Lexer::new(source, file);
    let lookahead = lexer.next_token()?;
    Ok(Self { lexer, lookahead })
  }

  fn advance(&mut self) -> Result<Token, SaturateError> {
    let current = self.lookahead.take().ok_or_else(|| self.lexer.error("unexpected end of input"))?;
    self.lookahead = self.lexer.next_token()?;
    Ok(current)
  }

  fn expect(&mut self, expected: &Token) -> Result<(), SaturateError> {
    let token = self.advance()?;
    if &token == expected {
      Ok(())
    } else {
      Err(self.lexer.error(format!("expected {expected:?}, found {token:?}")))
    }
  }

  pub fn parse_all(&mut self) -> Result<Vec<ProofStepDecl>, SaturateError> {
    let mut steps = Vec::new();
    while self.lookahead.is_some() {
      steps.push(self.parse_step()?);
    }
    Ok(steps)
  }

  fn parse_step(&mut self) -> Result<ProofStepDecl, SaturateError> {
    let id = self.parse_dotted_id()?;
    self.expect(&Token::Colon)?;
    let clause = self.parse_literal_list()?;
    self.expect(&Token::Colon)?;
    let justification = self.parse_justification()?;
    self.expect(&Token::Dot)?;
    Ok(ProofStepDecl { id, clause, justification })
  }

  fn parse_dotted_id(&mut self) -> Result<Vec<u32>, SaturateError> {
    let mut id = vec![self.parse_number()?];
    while self.lookahead == Some(Token::Dot) {
      // Only consume the dot if another digit follows; otherwise it is the clause terminator
      // and must be left for the caller. Since the lexer already tokenized eagerly, a `Dot`
      // here inside an id context is unambiguous: dotted ids are only parsed at the start of a
      // step or inside a justification's parent list, where a bare `.` never appears.
      self.advance()?;
      id.push(self.parse_number()?);
    }
    Ok(id)
  }

  fn parse_number(&mut self) -> Result<u32, SaturateError> {
    match self.advance()? {
      Token::Number(n) => Ok(n),
      other => Err(self.lexer.error(format!("expected a number, found {other:?}"))),
    }
  }

  fn parse_literal_list(&mut self) -> Result<Vec<Literal>, SaturateError> {
    let mut literals = vec![self.parse_literal()?];
    while self.lookahead == Some(Token::Pipe) {
      self.advance()?;
      literals.push(self.parse_literal()?);
    }
    Ok(literals)
  }

  fn parse_literal(&mut self) -> Result<Literal, SaturateError> {
    let mut negated = false;
    if self.lookahead == Some(Token::Tilde) {
      self.advance()?;
      negated = true;
    }
    let lhs = self.parse_term()?;
    let (rhs, positive) = match &self.lookahead {
      Some(Token::Equals) => {
        self.advance()?;
        (Some(self.parse_term()?), true)
      }
      Some(Token::NotEquals) => {
        self.advance()?;
        (Some(self.parse_term()?), false)
      }
      _ => (None, true),
    };
    Ok(Literal { lhs, rhs, positive: positive ^ negated })
  }

  fn parse_term(&mut self) -> Result<Term, SaturateError> {
    match self.advance()? {
      Token::Var(name) => Ok(Term::Var(name)),
      Token::Ident(name) => {
        if self.lookahead == Some(Token::LParen) {
          self.advance()?;
          let mut args = vec![self.parse_term()?];
          while self.lookahead == Some(Token::Comma) {
            self.advance()?;
            args.push(self.parse_term()?);
          }
          self.expect(&Token::RParen)?;
          Ok(Term::App(name, args))
        } else {
          Ok(Term::App(name, Vec::new()))
        }
      }
      other => Err(self.lexer.error(format!("expected a term, found {other:?}"))),
    }
  }

  fn parse_justification(&mut self) -> Result<Justification, SaturateError> {
    let operator = match self.advance()? {
      Token::Ident(name) => name,
      other => return Err(self.lexer.error(format!("expected an inference operator name, found {other:?}"))),
    };
    let mut parents = Vec::new();
    if self.lookahead == Some(Token::LParen) {
      self.advance()?;
      parents.push(self.parse_dotted_id()?);
      while self.lookahead == Some(Token::Comma) {
        self.advance()?;
        parents.push(self.parse_dotted_id()?);
      }
      self.expect(&Token::RParen)?;
    }
    Ok(Justification { operator, parents })
  }
}

/// Parses a complete PCL2 proof trace from `source`, named `file` for diagnostics.
pub fn parse(source: &str, file: &str) -> Result<Vec<ProofStepDecl>, SaturateError> {
  Parser::new(source, file)?.parse_all()
}
