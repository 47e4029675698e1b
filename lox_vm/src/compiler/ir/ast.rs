use bumpalo::boxed::Box;
use std::{fmt, ops::Range};

use super::token::Token;

/// A visitor pattern for the lox ast. Each consumer of the tree
/// implements one method per node kind, `visit_expr` must match
/// every variant so a new node forces each consumer to handle it
pub trait Visitor<'a> {
  type Result;

  fn visit_expr(&mut self, expr: &Expr<'a>) -> Self::Result;

  fn visit_literal(&mut self, literal: &Literal<'a>) -> Self::Result;
  fn visit_grouping(&mut self, grouping: &Grouping<'a>) -> Self::Result;
  fn visit_unary(&mut self, unary: &Unary<'a>) -> Self::Result;
  fn visit_binary(&mut self, binary: &Binary<'a>) -> Self::Result;
}

/// An object that can specify it's start and end position and optionally the full range
/// Implementors of ranges only need to implement `start` ad `end`
pub trait Spanned {
  /// The starting offset of this node
  fn start(&self) -> u32;

  /// The ending offset of this node
  fn end(&self) -> u32;

  /// The full range of this node
  fn span(&self) -> Span {
    Span {
      start: self.start(),
      end: self.end(),
    }
  }
}

/// Representing the start and end of a node in the source
#[derive(Default, PartialEq, Eq, Debug, Copy, Clone)]
pub struct Span {
  pub start: u32,
  pub end: u32,
}

impl Span {
  pub fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }
}

impl From<Span> for Range<usize> {
  fn from(span: Span) -> Self {
    (span.start as usize)..(span.end as usize)
  }
}

/// A lox expression. Interior nodes live in the arena of the
/// `Source` they were parsed from and own their children
#[derive(Debug, PartialEq)]
pub enum Expr<'a> {
  Literal(Literal<'a>),
  Grouping(Box<'a, Grouping<'a>>),
  Unary(Box<'a, Unary<'a>>),
  Binary(Box<'a, Binary<'a>>),
}

impl<'a> Expr<'a> {
  /// The number of nodes on the longest path from this node to a leaf
  pub fn height(&self) -> u32 {
    match self {
      Expr::Literal(_) => 1,
      Expr::Grouping(grouping) => grouping.height,
      Expr::Unary(unary) => unary.height,
      Expr::Binary(binary) => binary.height,
    }
  }
}

impl<'a> Spanned for Expr<'a> {
  fn start(&self) -> u32 {
    match self {
      Expr::Literal(literal) => literal.start(),
      Expr::Grouping(grouping) => grouping.start(),
      Expr::Unary(unary) => unary.start(),
      Expr::Binary(binary) => binary.start(),
    }
  }

  fn end(&self) -> u32 {
    match self {
      Expr::Literal(literal) => literal.end(),
      Expr::Grouping(grouping) => grouping.end(),
      Expr::Unary(unary) => unary.end(),
      Expr::Binary(binary) => binary.end(),
    }
  }
}

/// The value of a literal expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
  Number(f64),
  String(&'a str),
  Bool(bool),
  Nil,
}

#[derive(Debug, PartialEq)]
pub struct Literal<'a> {
  pub value: LiteralValue<'a>,
  pub token: Token<'a>,
}

impl<'a> Literal<'a> {
  pub fn new(value: LiteralValue<'a>, token: Token<'a>) -> Self {
    Self { value, token }
  }
}

impl<'a> Spanned for Literal<'a> {
  fn start(&self) -> u32 {
    self.token.start()
  }

  fn end(&self) -> u32 {
    self.token.end()
  }
}

/// A parenthesized expression
#[derive(Debug, PartialEq)]
pub struct Grouping<'a> {
  pub expr: Expr<'a>,
  pub span: Span,
  height: u32,
}

impl<'a> Grouping<'a> {
  pub fn new(expr: Expr<'a>, span: Span) -> Self {
    let height = expr.height() + 1;
    Self { expr, span, height }
  }
}

impl<'a> Spanned for Grouping<'a> {
  fn start(&self) -> u32 {
    self.span.start
  }

  fn end(&self) -> u32 {
    self.span.end
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
  Not,
  Negate,
}

impl fmt::Display for UnaryOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      UnaryOp::Not => "!",
      UnaryOp::Negate => "-",
    })
  }
}

#[derive(Debug, PartialEq)]
pub struct Unary<'a> {
  pub op: UnaryOp,
  pub operator: Token<'a>,
  pub expr: Expr<'a>,
  height: u32,
}

impl<'a> Unary<'a> {
  pub fn new(op: UnaryOp, operator: Token<'a>, expr: Expr<'a>) -> Self {
    let height = expr.height() + 1;

    Self {
      op,
      operator,
      expr,
      height,
    }
  }
}

impl<'a> Spanned for Unary<'a> {
  fn start(&self) -> u32 {
    self.operator.start()
  }

  fn end(&self) -> u32 {
    self.expr.end()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Eq,
  Ne,
  Gt,
  GtEq,
  Lt,
  LtEq,
  Add,
  Sub,
  Mul,
  Div,
}

impl fmt::Display for BinaryOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      BinaryOp::Eq => "==",
      BinaryOp::Ne => "!=",
      BinaryOp::Gt => ">",
      BinaryOp::GtEq => ">=",
      BinaryOp::Lt => "<",
      BinaryOp::LtEq => "<=",
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
    })
  }
}

#[derive(Debug, PartialEq)]
pub struct Binary<'a> {
  pub op: BinaryOp,
  pub operator: Token<'a>,
  pub lhs: Expr<'a>,
  pub rhs: Expr<'a>,
  height: u32,
}

impl<'a> Binary<'a> {
  pub fn new(op: BinaryOp, operator: Token<'a>, lhs: Expr<'a>, rhs: Expr<'a>) -> Self {
    let height = lhs.height().max(rhs.height()) + 1;

    Self {
      op,
      operator,
      lhs,
      rhs,
      height,
    }
  }
}

impl<'a> Spanned for Binary<'a> {
  fn start(&self) -> u32 {
    self.lhs.start()
  }

  fn end(&self) -> u32 {
    self.rhs.end()
  }
}
