pub mod ir;
mod parser;
mod scanner;

pub use ir::{
  ast::{Expr, Span, Spanned, Visitor},
  ast_printer::AstPrint,
  token::{Token, TokenKind, TokenLiteral},
};
pub use parser::{parse, parse_with_offsets, Parser};
pub use scanner::{scan, Scanned, Scanner};
