use super::Vm;
use crate::{
  compiler::{scan, AstPrint, Expr},
  source::Source,
};
use std::io;

impl Vm {
  /// Print every token scanned from the source
  pub(super) fn print_tokens(&self, source: &Source) -> io::Result<()> {
    let mut stdio = self.io.stdio();
    let stdout = stdio.stdout();

    for token in scan(source).tokens {
      writeln!(stdout, "  [line {}] {}", token.line(), token)?;
    }

    Ok(())
  }

  /// Print the parenthesized form of a parsed expression
  pub(super) fn print_ast(&self, expr: &Expr) -> io::Result<()> {
    let mut stdio = self.io.stdio();
    let mut printer = AstPrint::default();

    writeln!(stdio.stdout(), "  {}", printer.print(expr))
  }
}
