use crate::{
  compiler::ir::{ast::*, token::Token},
  error::{RuntimeError, RuntimeResult},
};
use lox_core::{utils::is_falsey, val, value::Value};

/// A tree walking evaluator for lox expressions
///
/// # Examples
/// ```
/// use lox_vm::{compiler::parse, interpreter::Interpreter, source::Source};
///
/// let source = Source::new("(20 * (5 + 3) - (7 * 2)) / (4 + 2)");
/// let ast = parse(&source).unwrap();
///
/// let mut interpreter = Interpreter::default();
/// assert_eq!(interpreter.interpret(&ast).unwrap(), "24.333333333333332");
/// ```
#[derive(Debug, Default)]
pub struct Interpreter;

impl Interpreter {
  /// Evaluate the provided expression to a value
  pub fn evaluate(&mut self, expr: &Expr) -> RuntimeResult<Value> {
    self.visit_expr(expr)
  }

  /// Evaluate the provided expression, returning the text
  /// lox displays for the result
  pub fn interpret(&mut self, expr: &Expr) -> RuntimeResult<String> {
    self.evaluate(expr).map(|value| value.to_string())
  }
}

impl<'a> Visitor<'a> for Interpreter {
  type Result = RuntimeResult<Value>;

  fn visit_expr(&mut self, expr: &Expr<'a>) -> Self::Result {
    match expr {
      Expr::Literal(literal) => self.visit_literal(literal),
      Expr::Grouping(grouping) => self.visit_grouping(grouping),
      Expr::Unary(unary) => self.visit_unary(unary),
      Expr::Binary(binary) => self.visit_binary(binary),
    }
  }

  fn visit_literal(&mut self, literal: &Literal<'a>) -> Self::Result {
    Ok(match literal.value {
      LiteralValue::Number(num) => val!(num),
      LiteralValue::String(string) => val!(string),
      LiteralValue::Bool(b) => val!(b),
      LiteralValue::Nil => val!(()),
    })
  }

  fn visit_grouping(&mut self, grouping: &Grouping<'a>) -> Self::Result {
    self.visit_expr(&grouping.expr)
  }

  fn visit_unary(&mut self, unary: &Unary<'a>) -> Self::Result {
    let value = self.visit_expr(&unary.expr)?;

    match unary.op {
      UnaryOp::Not => Ok(val!(is_falsey(&value))),
      UnaryOp::Negate => match value.as_num() {
        Some(num) => Ok(val!(-num)),
        None => Err(RuntimeError::new(
          &unary.operator,
          "Operand must be a number.",
        )),
      },
    }
  }

  fn visit_binary(&mut self, binary: &Binary<'a>) -> Self::Result {
    // both sides always run, left first
    let lhs = self.visit_expr(&binary.lhs)?;
    let rhs = self.visit_expr(&binary.rhs)?;
    let operator = &binary.operator;

    match binary.op {
      BinaryOp::Eq => Ok(val!(lhs == rhs)),
      BinaryOp::Ne => Ok(val!(lhs != rhs)),
      BinaryOp::Add => add(operator, lhs, rhs),
      BinaryOp::Sub => numbers(operator, &lhs, &rhs).map(|(l, r)| val!(l - r)),
      BinaryOp::Mul => numbers(operator, &lhs, &rhs).map(|(l, r)| val!(l * r)),
      BinaryOp::Div => numbers(operator, &lhs, &rhs).map(|(l, r)| val!(l / r)),
      BinaryOp::Gt => numbers(operator, &lhs, &rhs).map(|(l, r)| val!(l > r)),
      BinaryOp::GtEq => numbers(operator, &lhs, &rhs).map(|(l, r)| val!(l >= r)),
      BinaryOp::Lt => numbers(operator, &lhs, &rhs).map(|(l, r)| val!(l < r)),
      BinaryOp::LtEq => numbers(operator, &lhs, &rhs).map(|(l, r)| val!(l <= r)),
    }
  }
}

/// Add two numbers or concatenate two strings
fn add(operator: &Token, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
  match (lhs, rhs) {
    (Value::Number(l), Value::Number(r)) => Ok(val!(l + r)),
    (Value::String(mut l), Value::String(r)) => {
      l.push_str(&r);
      Ok(val!(l))
    },
    _ => Err(RuntimeError::new(operator, "Operands must be numbers.")),
  }
}

/// Require both operands to be numbers
fn numbers(operator: &Token, lhs: &Value, rhs: &Value) -> RuntimeResult<(f64, f64)> {
  match (lhs.as_num(), rhs.as_num()) {
    (Some(l), Some(r)) => Ok((l, r)),
    _ => Err(RuntimeError::new(operator, "Operands must be numbers.")),
  }
}
