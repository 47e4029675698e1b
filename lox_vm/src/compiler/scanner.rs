use std::{iter::Peekable, str::CharIndices};

use super::ir::{
  ast::Span,
  token::{Token, TokenKind, TokenLiteral},
};
use crate::{error::CompileError, source::LineOffsets};

/// Everything produced by scanning a source string
#[derive(Debug)]
pub struct Scanned<'a> {
  /// The tokens in source order, always terminated by a single `Eof`
  pub tokens: Vec<Token<'a>>,

  /// Lexical errors in the order they were found
  pub errors: Vec<CompileError>,

  /// Where each line of the source begins
  pub line_offsets: LineOffsets,
}

/// Scan the provided source into tokens
///
/// # Examples
/// ```
/// use lox_vm::compiler::{scan, TokenKind};
///
/// let scanned = scan("1 + @2");
/// let kinds: Vec<TokenKind> = scanned.tokens.iter().map(|t| t.kind()).collect();
///
/// assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Plus, TokenKind::Number, TokenKind::Eof]);
/// assert_eq!(scanned.errors.len(), 1);
/// ```
pub fn scan(source: &str) -> Scanned<'_> {
  Scanner::new(source).scan_tokens()
}

/// A scanner for the lox language. This struct is
/// responsible for taking a source string and tokenizing it
pub struct Scanner<'a> {
  /// The input source string
  source: &'a str,

  /// A peekable char indicies iterator
  char_indices: Peekable<CharIndices<'a>>,

  /// The offsets each line starts at
  line_offsets: Vec<usize>,

  /// Lexical errors found so far
  errors: Vec<CompileError>,

  /// The current line number
  line: u32,

  /// The start of the current token
  start: usize,

  /// The offset of the next unconsumed char
  current: usize,
}

impl<'a> Scanner<'a> {
  /// Create a new scanner from the provided source string.
  /// The scanner produces a sequence of tokens
  /// by calling the `scan_token` method
  pub fn new(source: &'a str) -> Scanner<'a> {
    assert!(
      source.len() < u32::MAX as usize,
      "Can only read files less than {} bytes",
      u32::MAX
    );

    let mut line_offsets = Vec::with_capacity(source_line_heuristic_guess(source.len()));
    line_offsets.push(0);

    Scanner {
      source,
      char_indices: source.char_indices().peekable(),
      line_offsets,
      errors: Vec::new(),
      line: 0,
      start: 0,
      current: 0,
    }
  }

  /// Scan the entire source, stopping after the first `Eof`
  pub fn scan_tokens(mut self) -> Scanned<'a> {
    let mut tokens = Vec::with_capacity(self.source.len() / 2 + 1);

    loop {
      let token = self.scan_token();
      let kind = token.kind();
      tokens.push(token);

      if kind == TokenKind::Eof {
        break;
      }
    }

    self.line_offsets.shrink_to_fit();
    let line_offsets = LineOffsets::new(self.line_offsets, self.source.len());

    Scanned {
      tokens,
      errors: self.errors,
      line_offsets,
    }
  }

  /// Scan the next token from the source string provided. Lexical
  /// errors are recorded and skipped so this always yields a
  /// real token, `Eof` once the source is exhausted
  pub fn scan_token(&mut self) -> Token<'a> {
    loop {
      // advance whitespace
      self.skip_white_space();
      self.start = self.current;

      let c = match self.next() {
        Some(c) => c,
        None => return self.make_token(TokenKind::Eof, None),
      };

      if let Some(token) = self.lex(c) {
        return token;
      }
    }
  }

  /// Classify the token beginning with `c`. Returns `None` when
  /// an error was recorded instead
  fn lex(&mut self, c: char) -> Option<Token<'a>> {
    let kind = match c {
      '(' => TokenKind::LeftParen,
      ')' => TokenKind::RightParen,
      '{' => TokenKind::LeftBrace,
      '}' => TokenKind::RightBrace,
      ',' => TokenKind::Comma,
      '.' => TokenKind::Dot,
      '-' => TokenKind::Minus,
      '+' => TokenKind::Plus,
      ';' => TokenKind::Semicolon,
      '*' => TokenKind::Star,
      '/' => TokenKind::Slash,
      '!' => self.either('=', TokenKind::BangEqual, TokenKind::Bang),
      '=' => self.either('=', TokenKind::EqualEqual, TokenKind::Equal),
      '<' => self.either('=', TokenKind::LessEqual, TokenKind::Less),
      '>' => self.either('=', TokenKind::GreaterEqual, TokenKind::Greater),
      '"' => return self.string(),
      _ => {
        if is_digit(c) {
          return self.number();
        }

        if is_alpha(c) {
          return Some(self.identifier());
        }

        self.error("Unexpected character.");
        return None;
      },
    };

    Some(self.make_token(kind, None))
  }

  /// Pick the two character kind if the next char is `expected`
  fn either(&mut self, expected: char, double: TokenKind, single: TokenKind) -> TokenKind {
    if self.match_char(expected) {
      double
    } else {
      single
    }
  }

  /// Generate an identifier token
  fn identifier(&mut self) -> Token<'a> {
    // advance until we hit whitespace or a special char
    while self.next_if(|c| is_alpha(*c) || is_digit(*c)).is_some() {}

    // identifier if we are actually a keyword
    self.make_token(self.identifier_type(), None)
  }

  /// Generate a number token
  fn number(&mut self) -> Option<Token<'a>> {
    // advance consecutive digits
    while self.next_if(|c| is_digit(*c)).is_some() {}

    // only consume the '.' when a digit follows it
    if self.peek() == Some('.') && matches!(self.peek_next(), Some(c) if is_digit(c)) {
      self.next();

      while self.next_if(|c| is_digit(*c)).is_some() {}
    }

    match self.current_slice().parse::<f64>() {
      Ok(num) => Some(self.make_token(TokenKind::Number, Some(TokenLiteral::Number(num)))),
      Err(_) => {
        self.error("Invalid number.");
        None
      },
    }
  }

  /// Generate a string token
  fn string(&mut self) -> Option<Token<'a>> {
    loop {
      match self.next() {
        Some('"') => break,
        Some('\n') => self.new_line(),
        Some(_) => (),
        None => {
          self.error("Unterminated string.");
          return None;
        },
      }
    }

    // trim the surrounding quotes
    let value = &self.source[self.start + 1..self.current - 1];
    Some(self.make_token(TokenKind::String, Some(TokenLiteral::String(value))))
  }

  /// Advance through whitespace and comments effectively throwing them away
  fn skip_white_space(&mut self) {
    while let Some(c) = self.peek() {
      match c {
        ' ' | '\r' | '\t' => {
          self.next();
        },
        '\n' => {
          self.next();
          self.new_line();
        },
        '/' => {
          if let Some('/') = self.peek_next() {
            while self.next_if(|c| *c != '\n').is_some() {}
          } else {
            return;
          }
        },
        _ => return,
      }
    }
  }

  /// Identify if the current slice is a keyword.
  /// This uses a short of hard coded trie
  fn identifier_type(&self) -> TokenKind {
    let mut chars = self.current_slice().chars();

    match chars.next() {
      Some(c1) => match c1 {
        'a' => self.check_keyword(1, "nd", TokenKind::And),
        'c' => self.check_keyword(1, "lass", TokenKind::Class),
        'e' => self.check_keyword(1, "lse", TokenKind::Else),
        'f' => match chars.next() {
          Some(c2) => match c2 {
            'a' => self.check_keyword(2, "lse", TokenKind::False),
            'o' => self.check_keyword(2, "r", TokenKind::For),
            'u' => self.check_keyword(2, "n", TokenKind::Fun),
            _ => TokenKind::Identifier,
          },
          None => TokenKind::Identifier,
        },
        'i' => self.check_keyword(1, "f", TokenKind::If),
        'n' => self.check_keyword(1, "il", TokenKind::Nil),
        'o' => self.check_keyword(1, "r", TokenKind::Or),
        'p' => self.check_keyword(1, "rint", TokenKind::Print),
        'r' => self.check_keyword(1, "eturn", TokenKind::Return),
        's' => self.check_keyword(1, "uper", TokenKind::Super),
        't' => match chars.next() {
          Some(c2) => match c2 {
            'h' => self.check_keyword(2, "is", TokenKind::This),
            'r' => self.check_keyword(2, "ue", TokenKind::True),
            _ => TokenKind::Identifier,
          },
          None => TokenKind::Identifier,
        },
        'v' => self.check_keyword(1, "ar", TokenKind::Var),
        'w' => self.check_keyword(1, "hile", TokenKind::While),
        _ => TokenKind::Identifier,
      },
      None => TokenKind::Identifier,
    }
  }

  /// Check if the remainder of the current slice matches the rest
  /// of the keyword
  fn check_keyword(&self, start: usize, rest: &str, kind: TokenKind) -> TokenKind {
    let start_index = self.start + start;

    if self.source.get(start_index..self.current) == Some(rest) {
      return kind;
    }

    TokenKind::Identifier
  }

  /// Make a token from the current state of the scanner
  fn make_token(&self, kind: TokenKind, literal: Option<TokenLiteral<'a>>) -> Token<'a> {
    Token::new(
      kind,
      self.current_slice(),
      literal,
      self.line,
      self.start as u32,
      self.current as u32,
    )
  }

  /// Record a lexical error for the current slice
  fn error(&mut self, message: &str) {
    self.errors.push(CompileError::lexical(
      self.line,
      Span::new(self.start as u32, self.current as u32),
      message,
    ));
  }

  /// Advance the character iterator if condition is met
  fn next_if(&mut self, f: impl FnOnce(&char) -> bool) -> Option<char> {
    self.char_indices.next_if(|(_, c)| f(c)).map(|(index, c)| {
      self.current = index + c.len_utf8();
      c
    })
  }

  /// Get the next character
  fn next(&mut self) -> Option<char> {
    self.char_indices.next().map(|(index, c)| {
      self.current = index + c.len_utf8();
      c
    })
  }

  /// Peek the current character
  fn peek(&mut self) -> Option<char> {
    self.char_indices.peek().map(|(_, c)| *c)
  }

  /// Peek the character after the current character
  fn peek_next(&self) -> Option<char> {
    let mut chars = self.source[self.current..].chars();
    chars.next();
    chars.next()
  }

  /// Insert a new line
  fn new_line(&mut self) {
    self.line += 1;
    self.line_offsets.push(self.current);
  }

  /// Get the current str slice
  fn current_slice(&self) -> &'a str {
    &self.source[self.start..self.current]
  }

  /// match the current token against an expected
  fn match_char(&mut self, expected: char) -> bool {
    self.next_if(|c| *c == expected).is_some()
  }
}

/// Is the char a digit
fn is_digit(c: char) -> bool {
  c.is_ascii_digit()
}

/// Is the char a letter or underscore
fn is_alpha(c: char) -> bool {
  c.is_ascii_alphabetic() || c == '_'
}

/// A loose estimate for how many lines are in a source of this length
const fn source_line_heuristic_guess(len: usize) -> usize {
  len / 20 + 1
}
