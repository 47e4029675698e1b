use super::ast::*;

/// Renders an expression as a fully parenthesized prefix form,
/// `(* (- 123) (group 45.67))`
#[derive(Default)]
pub struct AstPrint {
  buffer: String,
}

impl AstPrint {
  /// Print the provided expression returning the rendered str
  pub fn print(&mut self, expr: &Expr) -> &str {
    self.buffer.clear();
    self.visit_expr(expr);
    &self.buffer
  }

  pub fn str(&self) -> &str {
    &self.buffer
  }

  fn parenthesize<'a>(&mut self, name: &str, exprs: &[&Expr<'a>]) {
    self.buffer.push('(');
    self.buffer.push_str(name);

    for expr in exprs {
      self.buffer.push(' ');
      self.visit_expr(expr);
    }

    self.buffer.push(')');
  }
}

impl<'a> Visitor<'a> for AstPrint {
  type Result = ();

  fn visit_expr(&mut self, expr: &Expr<'a>) -> Self::Result {
    match expr {
      Expr::Literal(literal) => self.visit_literal(literal),
      Expr::Grouping(grouping) => self.visit_grouping(grouping),
      Expr::Unary(unary) => self.visit_unary(unary),
      Expr::Binary(binary) => self.visit_binary(binary),
    }
  }

  fn visit_literal(&mut self, literal: &Literal<'a>) -> Self::Result {
    match literal.value {
      LiteralValue::Number(num) => self.buffer.push_str(&num.to_string()),
      LiteralValue::String(string) => self.buffer.push_str(string),
      LiteralValue::Bool(b) => self.buffer.push_str(if b { "true" } else { "false" }),
      LiteralValue::Nil => self.buffer.push_str("nil"),
    }
  }

  fn visit_grouping(&mut self, grouping: &Grouping<'a>) -> Self::Result {
    self.parenthesize("group", &[&grouping.expr]);
  }

  fn visit_unary(&mut self, unary: &Unary<'a>) -> Self::Result {
    self.parenthesize(&unary.op.to_string(), &[&unary.expr]);
  }

  fn visit_binary(&mut self, binary: &Binary<'a>) -> Self::Result {
    self.parenthesize(&binary.op.to_string(), &[&binary.lhs, &binary.rhs]);
  }
}
