/*!

A hand-written lexer and recursive-descent parser for the TPTP CNF clause syntax (spec §6.1):

```text
cnf(name, role, literal (| literal)*).
```

where a literal is an optional leading `~` followed by either an equation (`s = t` / `s != t`) or a
plain atom. Full TPTP FOF (quantifiers, connectives other than `|`/`~`) is out of scope; a `fof(...)`
declaration is reported as a syntax error naming the unsupported construct rather than silently
mis-parsed.

*/

use crate::error::SaturateError;
use crate::parser::ast::{ClauseDecl, Literal, Role, Term};

#[derive(Clone, Debug, PartialEq)]
enum Token {
  Ident(String),
  Var(String),
  LParen,
  RParen,
  Comma,
  Dot,
  Pipe,
  Tilde,
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
      return Ok(Some(Token::Ident(self.source[start..end].to_string())));
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

  fn expect_ident(&mut self) -> Result<String, SaturateError> {
    match self.advance()? {
      Token::Ident(s) => Ok(s),
      other => Err(self.lexer.error(format!("expected identifier, found {other:?}"))),
    }
  }

  /// Parses every `cnf(...)` declaration in the source, in order. Stops (and errors) on the first
  /// `fof(...)` declaration encountered.
  pub fn parse_all(&mut self) -> Result<Vec<ClauseDecl>, SaturateError> {
    let mut clauses = Vec::new();
    while self.lookahead.is_some() {
      clauses.push(self.parse_cnf_decl()?);
    }
    Ok(clauses)
  }

  fn parse_cnf_decl(&mut self) -> Result<ClauseDecl, SaturateError> {
    let keyword = self.expect_ident()?;
    if keyword == "fof" {
      return Err(self.lexer.error("FOF formulas are not supported; only `cnf(...)` clauses are accepted"));
    }
    if keyword != "cnf" {
      return Err(self.lexer.error(format!("expected `cnf`, found `{keyword}`")));
    }
    self.expect(&Token::LParen)?;
    let name = self.expect_ident()?;
    self.expect(&Token::Comma)?;
    let role = Role::parse(&self.expect_ident()?);
    self.expect(&Token::Comma)?;
    let literals = self.parse_literal_list()?;
    self.expect(&Token::RParen)?;
    self.expect(&Token::Dot)?;
    Ok(ClauseDecl { name, role, literals })
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
}

/// Parses every `cnf(...)` declaration in `source`, named `file` for diagnostics.
pub fn parse(source: &str, file: &str) -> Result<Vec<ClauseDecl>, SaturateError> {
  Parser::new(source, file)?.parse_all()
}
