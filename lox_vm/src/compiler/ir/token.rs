use super::ast::Spanned;
use std::fmt;
use variant_count::VariantCount;

/// The decoded value of a literal token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenLiteral<'a> {
  Number(f64),
  String(&'a str),
}

impl<'a> fmt::Display for TokenLiteral<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TokenLiteral::Number(num) => write!(f, "{}", num),
      TokenLiteral::String(string) => f.write_str(string),
    }
  }
}

/// A token in the lox language
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
  /// The token kind
  kind: TokenKind,

  /// The slice of source this token was scanned from
  lexeme: &'a str,

  /// The decoded literal for numbers and strings
  literal: Option<TokenLiteral<'a>>,

  /// The line this token was scanned on, starting at 0
  line: u32,

  /// the start offset of this token
  start: u32,

  /// The end offset of this token
  end: u32,
}

impl<'a> Token<'a> {
  pub const fn new(
    kind: TokenKind,
    lexeme: &'a str,
    literal: Option<TokenLiteral<'a>>,
    line: u32,
    start: u32,
    end: u32,
  ) -> Self {
    Self {
      kind,
      lexeme,
      literal,
      line,
      start,
      end,
    }
  }

  #[inline]
  pub fn str(&self) -> &'a str {
    self.lexeme
  }

  #[inline]
  pub fn kind(&self) -> TokenKind {
    self.kind
  }

  #[inline]
  pub fn literal(&self) -> Option<TokenLiteral<'a>> {
    self.literal
  }

  #[inline]
  pub fn line(&self) -> u32 {
    self.line
  }
}

impl<'a> Spanned for Token<'a> {
  fn start(&self) -> u32 {
    self.start
  }

  fn end(&self) -> u32 {
    self.end
  }
}

impl<'a> fmt::Display for Token<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?} {} ", self.kind, self.lexeme)?;
    match &self.literal {
      Some(literal) => write!(f, "{}", literal),
      None => f.write_str("nil"),
    }
  }
}

/// Token kinds in the lox language
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, VariantCount)]
#[repr(u8)]
pub enum TokenKind {
  LeftParen,
  RightParen,
  LeftBrace,
  RightBrace,
  Comma,
  Dot,
  Minus,
  Plus,
  Semicolon,
  Slash,
  Star,

  // logical operators
  Bang,
  BangEqual,
  Equal,
  EqualEqual,
  Greater,
  GreaterEqual,
  Less,
  LessEqual,

  // sequences
  Identifier,
  String,
  Number,

  // keywords
  And,
  Class,
  Else,
  False,
  For,
  Fun,
  If,
  Nil,
  Or,
  Print,
  Return,
  Super,
  This,
  True,
  Var,
  While,

  // meta
  Eof,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      TokenKind::LeftParen => "(",
      TokenKind::RightParen => ")",
      TokenKind::LeftBrace => "{",
      TokenKind::RightBrace => "}",
      TokenKind::Comma => ",",
      TokenKind::Dot => ".",
      TokenKind::Minus => "-",
      TokenKind::Plus => "+",
      TokenKind::Semicolon => ";",
      TokenKind::Slash => "/",
      TokenKind::Star => "*",
      TokenKind::Bang => "!",
      TokenKind::BangEqual => "!=",
      TokenKind::Equal => "=",
      TokenKind::EqualEqual => "==",
      TokenKind::Greater => ">",
      TokenKind::GreaterEqual => ">=",
      TokenKind::Less => "<",
      TokenKind::LessEqual => "<=",
      TokenKind::Identifier => "identifier",
      TokenKind::String => "string",
      TokenKind::Number => "number",
      TokenKind::And => "and",
      TokenKind::Class => "class",
      TokenKind::Else => "else",
      TokenKind::False => "false",
      TokenKind::For => "for",
      TokenKind::Fun => "fun",
      TokenKind::If => "if",
      TokenKind::Nil => "nil",
      TokenKind::Or => "or",
      TokenKind::Print => "print",
      TokenKind::Return => "return",
      TokenKind::Super => "super",
      TokenKind::This => "this",
      TokenKind::True => "true",
      TokenKind::Var => "var",
      TokenKind::While => "while",
      TokenKind::Eof => "eof",
    })
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn display_token() {
    let number = Token::new(
      TokenKind::Number,
      "12.5",
      Some(TokenLiteral::Number(12.5)),
      0,
      0,
      4,
    );
    assert_eq!(number.to_string(), "Number 12.5 12.5");

    let string = Token::new(
      TokenKind::String,
      "\"hi\"",
      Some(TokenLiteral::String("hi")),
      2,
      10,
      14,
    );
    assert_eq!(string.to_string(), "String \"hi\" hi");

    let plus = Token::new(TokenKind::Plus, "+", None, 0, 1, 2);
    assert_eq!(plus.to_string(), "Plus + nil");
  }

  #[test]
  fn spans() {
    let token = Token::new(TokenKind::Identifier, "apples", None, 3, 4, 10);
    assert_eq!(token.start(), 4);
    assert_eq!(token.end(), 10);
    assert_eq!(token.line(), 3);
    assert_eq!(token.str(), "apples");
  }
}
