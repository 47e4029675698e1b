use super::{
  ir::{
    ast::*,
    token::{Token, TokenKind, TokenLiteral},
  },
  scan, Scanned,
};
use crate::{
  constants::{MAX_NESTING_DEPTH, MAX_TREE_HEIGHT},
  error::{CompileError, FeResult},
  source::{LineOffsets, Source},
};
use std::{mem, vec};

type ParseResult<T> = Result<T, CompileError>;

/// Scan and parse the provided source into a lox expression.
/// On failure every lexical error is returned followed by
/// the first syntax error if one was found
///
/// # Examples
/// ```
/// use lox_vm::{compiler::parse, source::Source};
///
/// let source = Source::new("(1 + 2) * 3");
/// assert!(parse(&source).is_ok());
///
/// let source = Source::new("1 +");
/// let errors = parse(&source).unwrap_err();
/// assert_eq!(errors[0].to_string(), "[line 0] Error at end: Expect expression.");
/// ```
pub fn parse(source: &Source) -> FeResult<Expr<'_>> {
  parse_with_offsets(source).0
}

/// Scan and parse the provided source, also handing back where
/// each line of the source begins
pub fn parse_with_offsets(source: &Source) -> (FeResult<Expr<'_>>, LineOffsets) {
  let Scanned {
    tokens,
    mut errors,
    line_offsets,
  } = scan(source);

  let result = match Parser::new(source, tokens).parse() {
    Ok(expr) if errors.is_empty() => Ok(expr),
    Ok(_) => Err(errors),
    Err(error) => {
      errors.push(error);
      Err(errors)
    },
  };

  (result, line_offsets)
}

/// The lox parser. This structure produces the lox
/// AST from a sequence of tokens
pub struct Parser<'a> {
  /// The current token
  current: Token<'a>,

  /// The previous token
  previous: Token<'a>,

  /// How many expressions we are currently nested inside
  depth: usize,

  /// The remaining tokens
  tokens: vec::IntoIter<Token<'a>>,

  /// The arena nodes are allocated in
  source: &'a Source,
}

impl<'a> Parser<'a> {
  /// Create a new instance of the parser from a source and the
  /// tokens scanned from it
  pub fn new(source: &'a Source, tokens: Vec<Token<'a>>) -> Self {
    let eof = Token::new(TokenKind::Eof, "", None, 0, 0, 0);

    Self {
      current: eof.clone(),
      previous: eof,
      depth: 0,
      tokens: tokens.into_iter(),
      source,
    }
  }

  /// Parse the tokens into a single lox expression. The whole
  /// token sequence must be consumed
  ///
  /// # Examples
  /// ```
  /// use lox_vm::{compiler::{scan, Parser}, source::Source};
  ///
  /// let source = Source::new("3 / 2 + 10");
  /// let scanned = scan(&source);
  ///
  /// let parser = Parser::new(&source, scanned.tokens);
  /// assert!(parser.parse().is_ok());
  /// ```
  pub fn parse(mut self) -> Result<Expr<'a>, CompileError> {
    self.advance();
    let expr = self.expr()?;

    if !self.check(TokenKind::Eof) {
      return self.error_current("Expect end of expression.");
    }

    Ok(expr)
  }

  /// Parse a lox expression
  fn expr(&mut self) -> ParseResult<Expr<'a>> {
    self.parse_precedence(Precedence::Equality)
  }

  /// Parse an expression using a Pratt parser
  fn parse_precedence(&mut self, precedence: Precedence) -> ParseResult<Expr<'a>> {
    self.nested(|parser| {
      parser.advance();

      // apply some prefix action
      let mut expr = match get_prefix(parser.previous.kind()) {
        Some(prefix) => parser.prefix(prefix),
        None => return parser.error("Expect expression."),
      }?;

      // while we still have binding power keep applying infix operations
      while precedence <= get_infix(parser.current.kind()) {
        parser.advance();
        expr = parser.binary(expr)?;
      }

      Ok(expr)
    })
  }

  /// Run `cb` one level deeper, failing once expressions nest too far
  fn nested<T>(&mut self, cb: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
    if self.depth >= MAX_NESTING_DEPTH {
      return self.error_current("Expression nests too deeply.");
    }

    self.depth += 1;
    let result = cb(self);
    self.depth -= 1;

    result
  }

  /// Execute an prefix action
  fn prefix(&mut self, action: Prefix) -> ParseResult<Expr<'a>> {
    match action {
      Prefix::Grouping => self.grouping(),
      Prefix::Literal => self.literal(),
      Prefix::Unary => self.unary(),
    }
  }

  /// Parse a binary expression
  fn binary(&mut self, lhs: Expr<'a>) -> ParseResult<Expr<'a>> {
    let operator = self.previous.clone();
    let precedence = get_infix(operator.kind()).higher();
    let rhs = self.parse_precedence(precedence)?;

    let op = match operator.kind() {
      TokenKind::BangEqual => BinaryOp::Ne,
      TokenKind::EqualEqual => BinaryOp::Eq,
      TokenKind::Greater => BinaryOp::Gt,
      TokenKind::GreaterEqual => BinaryOp::GtEq,
      TokenKind::Less => BinaryOp::Lt,
      TokenKind::LessEqual => BinaryOp::LtEq,
      TokenKind::Plus => BinaryOp::Add,
      TokenKind::Minus => BinaryOp::Sub,
      TokenKind::Star => BinaryOp::Mul,
      TokenKind::Slash => BinaryOp::Div,
      _ => unreachable!("Invalid operator"),
    };

    // long chains fold iteratively here but every later pass recurses
    if lhs.height().max(rhs.height()) >= MAX_TREE_HEIGHT {
      return self.error_at(&operator, "Expression nests too deeply.");
    }

    Ok(Expr::Binary(
      self.source.node(Binary::new(op, operator, lhs, rhs)),
    ))
  }

  /// Parse a unary expression
  fn unary(&mut self) -> ParseResult<Expr<'a>> {
    let operator = self.previous.clone();
    let expr = self.parse_precedence(Precedence::Unary)?;

    let op = match operator.kind() {
      TokenKind::Minus => UnaryOp::Negate,
      TokenKind::Bang => UnaryOp::Not,
      _ => unreachable!("Unexpected unary operator"),
    };

    Ok(Expr::Unary(self.source.node(Unary::new(op, operator, expr))))
  }

  /// Parse a grouping expression
  fn grouping(&mut self) -> ParseResult<Expr<'a>> {
    let start = self.previous.start();
    let expr = self.expr()?;
    self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;

    let span = Span::new(start, self.previous.end());
    Ok(Expr::Grouping(self.source.node(Grouping::new(expr, span))))
  }

  /// Parse a literal token
  fn literal(&mut self) -> ParseResult<Expr<'a>> {
    let token = self.previous.clone();

    let value = match (token.kind(), token.literal()) {
      (TokenKind::Number, Some(TokenLiteral::Number(num))) => LiteralValue::Number(num),
      (TokenKind::String, Some(TokenLiteral::String(string))) => LiteralValue::String(string),
      (TokenKind::True, _) => LiteralValue::Bool(true),
      (TokenKind::False, _) => LiteralValue::Bool(false),
      (TokenKind::Nil, _) => LiteralValue::Nil,
      _ => return self.error("Invalid literal."),
    };

    Ok(Expr::Literal(Literal::new(value, token)))
  }

  /// Consume a token and advance the current token index
  #[inline]
  fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<()> {
    if self.check(kind) {
      self.advance();
      return Ok(());
    }

    self.error_current(message)
  }

  /// Does the provided token kind match the current kind
  #[inline]
  fn check(&self, kind: TokenKind) -> bool {
    self.current.kind() == kind
  }

  /// Advance the parser a token forward. Once the tokens run
  /// out the final token is repeated
  #[inline]
  fn advance(&mut self) {
    let next = match self.tokens.next() {
      Some(token) => token,
      None => self.current.clone(),
    };

    self.previous = mem::replace(&mut self.current, next);
  }

  /// Indicate an error occurred at the current token
  fn error_current<T>(&self, message: &str) -> ParseResult<T> {
    self.error_at(&self.current, message)
  }

  /// Indicate an error occurred at the previous token
  fn error<T>(&self, message: &str) -> ParseResult<T> {
    self.error_at(&self.previous, message)
  }

  /// Produce a syntax error at the provided token
  fn error_at<T>(&self, token: &Token<'a>, message: &str) -> ParseResult<T> {
    Err(CompileError::at_token(token, message))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Precedence {
  None,
  Equality,
  Comparison,
  Term,
  Factor,
  Unary,
  Primary,
}

impl Precedence {
  fn higher(&self) -> Precedence {
    match self {
      Precedence::None => Precedence::Equality,
      Precedence::Equality => Precedence::Comparison,
      Precedence::Comparison => Precedence::Term,
      Precedence::Term => Precedence::Factor,
      Precedence::Factor => Precedence::Unary,
      Precedence::Unary => Precedence::Primary,
      Precedence::Primary => Precedence::Primary,
    }
  }
}

#[derive(Clone, Copy)]
enum Prefix {
  Grouping,
  Literal,
  Unary,
}

/// The prefix action a token begins, if any
fn get_prefix(kind: TokenKind) -> Option<Prefix> {
  match kind {
    TokenKind::LeftParen => Some(Prefix::Grouping),
    TokenKind::Minus | TokenKind::Bang => Some(Prefix::Unary),
    TokenKind::Number | TokenKind::String | TokenKind::True | TokenKind::False | TokenKind::Nil => {
      Some(Prefix::Literal)
    },
    _ => None,
  }
}

/// The binding power of a token used as a binary operator
fn get_infix(kind: TokenKind) -> Precedence {
  match kind {
    TokenKind::EqualEqual | TokenKind::BangEqual => Precedence::Equality,
    TokenKind::Greater | TokenKind::GreaterEqual | TokenKind::Less | TokenKind::LessEqual => {
      Precedence::Comparison
    },
    TokenKind::Plus | TokenKind::Minus => Precedence::Term,
    TokenKind::Star | TokenKind::Slash => Precedence::Factor,
    _ => Precedence::None,
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{compiler::ir::ast_printer::AstPrint, error::ErrorKind};

  fn printed(src: &str) -> String {
    let source = Source::new(src);
    let ast = parse(&source);
    assert!(ast.is_ok(), "failed to parse {:?}: {:?}", src, ast);

    let ast = ast.unwrap();
    let mut printer = AstPrint::default();
    let printed = printer.print(&ast).to_string();
    printed
  }

  fn errors(src: &str) -> Vec<String> {
    let source = Source::new(src);
    let errors = match parse(&source) {
      Ok(ast) => panic!("expected {:?} to fail, parsed {:?}", src, ast),
      Err(errors) => errors.iter().map(|error| error.to_string()).collect(),
    };
    errors
  }

  #[test]
  fn literals() {
    assert_eq!(printed("123"), "123");
    assert_eq!(printed("4.5"), "4.5");
    assert_eq!(printed("\"hi there\""), "hi there");
    assert_eq!(printed("true"), "true");
    assert_eq!(printed("false"), "false");
    assert_eq!(printed("nil"), "nil");
  }

  #[test]
  fn precedence() {
    assert_eq!(printed("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(printed("1 * 2 + 3"), "(+ (* 1 2) 3)");
    assert_eq!(printed("-1 * 2"), "(* (- 1) 2)");
    assert_eq!(printed("1 < 2 == 3 >= 4"), "(== (< 1 2) (>= 3 4))");
    assert_eq!(printed("1 + 2 < 3 * 4"), "(< (+ 1 2) (* 3 4))");
  }

  #[test]
  fn left_associative() {
    assert_eq!(printed("1 - 2 - 3"), "(- (- 1 2) 3)");
    assert_eq!(printed("8 / 4 / 2"), "(/ (/ 8 4) 2)");
    assert_eq!(printed("1 == 2 != 3"), "(!= (== 1 2) 3)");
  }

  #[test]
  fn unary_nests() {
    assert_eq!(printed("!!true"), "(! (! true))");
    assert_eq!(printed("--1"), "(- (- 1))");
  }

  #[test]
  fn grouping() {
    assert_eq!(printed("(1 + 2) * 3"), "(* (group (+ 1 2)) 3)");
    assert_eq!(printed("((nil))"), "(group (group nil))");
  }

  #[test]
  fn grouping_span() {
    let source = Source::new(" (1 + 2) ");
    let ast = parse(&source).unwrap();

    assert_eq!(ast.span(), Span::new(1, 8));
  }

  #[test]
  fn deterministic() {
    let source = Source::new("-(1.5 + \"a\") * !nil == 2");
    let first = parse(&source).unwrap();
    let second = parse(&source).unwrap();

    assert_eq!(first, second);
  }

  #[test]
  fn expect_expression() {
    assert_eq!(
      errors("apples"),
      vec!["[line 0] Error at 'apples': Expect expression."]
    );
    assert_eq!(errors(""), vec!["[line 0] Error at end: Expect expression."]);
    assert_eq!(
      errors("1 +\n"),
      vec!["[line 1] Error at end: Expect expression."]
    );
    assert_eq!(
      errors("1 + )"),
      vec!["[line 0] Error at ')': Expect expression."]
    );
  }

  #[test]
  fn unclosed_grouping() {
    assert_eq!(
      errors("(1 + 2"),
      vec!["[line 0] Error at end: Expect ')' after expression."]
    );
    assert_eq!(
      errors("(1 2)"),
      vec!["[line 0] Error at '2': Expect ')' after expression."]
    );
  }

  #[test]
  fn trailing_tokens() {
    assert_eq!(
      errors("1 2"),
      vec!["[line 0] Error at '2': Expect end of expression."]
    );
    assert_eq!(
      errors("(1))"),
      vec!["[line 0] Error at ')': Expect end of expression."]
    );
  }

  #[test]
  fn lexical_errors_reported_without_tree() {
    let source = Source::new("1 + @2");
    let errors = parse(&source).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::Lexical);
    assert_eq!(errors[0].to_string(), "[line 0] Error: Unexpected character.");
  }

  #[test]
  fn lexical_then_syntax_errors() {
    let source = Source::new("@ # (");
    let errors = parse(&source).unwrap_err();
    let kinds: Vec<ErrorKind> = errors.iter().map(|error| error.kind).collect();

    assert_eq!(
      kinds,
      vec![ErrorKind::Lexical, ErrorKind::Lexical, ErrorKind::Syntax]
    );
    assert_eq!(
      errors[2].to_string(),
      "[line 0] Error at end: Expect expression."
    );
  }

  #[test]
  fn nesting_limit() {
    let depth = MAX_NESTING_DEPTH - 1;
    let ok = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert!(parse(&Source::new(ok)).is_ok());

    let too_deep = format!("{}1{}", "(".repeat(MAX_NESTING_DEPTH), ")".repeat(MAX_NESTING_DEPTH));
    assert_eq!(
      errors(&too_deep),
      vec!["[line 0] Error at '1': Expression nests too deeply."]
    );

    let negations = format!("{}1", "-".repeat(MAX_NESTING_DEPTH * 2));
    assert_eq!(
      errors(&negations),
      vec!["[line 0] Error at '-': Expression nests too deeply."]
    );
  }

  #[test]
  fn tree_height_limit() {
    let terms = MAX_TREE_HEIGHT as usize - 1;
    let tallest = format!("1{}", " + 1".repeat(terms));
    let source = Source::new(tallest);
    let ast = parse(&source).unwrap();
    assert_eq!(ast.height(), MAX_TREE_HEIGHT);

    let too_tall = format!("1{}", " + 1".repeat(terms + 1));
    assert_eq!(
      errors(&too_tall),
      vec!["[line 0] Error at '+': Expression nests too deeply."]
    );

    let chain = format!("1{}", " * 2".repeat(20_000));
    assert_eq!(
      errors(&chain),
      vec!["[line 0] Error at '*': Expression nests too deeply."]
    );
  }

  #[test]
  fn tree_height_counts_groups() {
    let group = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    let mut chain = group.clone();
    for _ in 0..5 {
      chain.push_str(" - ");
      chain.push_str(&group);
    }

    let source = Source::new(chain);
    let ast = parse(&source).unwrap();
    assert_eq!(ast.height(), 201 + 5);

    let source = Source::new("-(1 + 2) * 3");
    let ast = parse(&source).unwrap();
    assert_eq!(ast.height(), 5);
  }

  #[test]
  fn parser_from_tokens() {
    let source = Source::new("2 * 3");
    let tokens = scan(&source).tokens;

    let ast = Parser::new(&source, tokens).parse().unwrap();
    let mut printer = AstPrint::default();

    assert_eq!(printer.print(&ast), "(* 2 3)");
  }

  #[test]
  fn offsets_returned() {
    let source = Source::new("1 +\n2");
    let (ast, offsets) = parse_with_offsets(&source);

    assert!(ast.is_ok());
    assert_eq!(offsets.lines(), 2);
  }

  #[test]
  fn parser_without_tokens() {
    let source = Source::new("");
    let error = Parser::new(&source, vec![]).parse().unwrap_err();

    assert_eq!(error.to_string(), "[line 0] Error at end: Expect expression.");
  }
}
