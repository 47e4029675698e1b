use crate::compiler::ir::{
  ast::{Span, Spanned},
  token::{Token, TokenKind},
};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use std::fmt;

/// Which front end stage detected an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Lexical,
  Syntax,
}

/// Where in the source an error is reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSite {
  /// No token, used by the scanner
  Nowhere,

  /// At the end of input
  End,

  /// At the token with this lexeme
  Lexeme(String),
}

impl fmt::Display for ErrorSite {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ErrorSite::Nowhere => Ok(()),
      ErrorSite::End => f.write_str(" at end"),
      ErrorSite::Lexeme(lexeme) => write!(f, " at '{}'", lexeme),
    }
  }
}

/// A lexical or syntax error found before evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
  pub kind: ErrorKind,
  pub line: u32,
  pub site: ErrorSite,
  pub message: String,
  pub span: Span,
}

impl CompileError {
  /// A lexical error on `line` covering `span`
  pub fn lexical(line: u32, span: Span, message: impl Into<String>) -> Self {
    Self {
      kind: ErrorKind::Lexical,
      line,
      site: ErrorSite::Nowhere,
      message: message.into(),
      span,
    }
  }

  /// A syntax error located at `token`
  pub fn at_token(token: &Token, message: impl Into<String>) -> Self {
    let site = match token.kind() {
      TokenKind::Eof => ErrorSite::End,
      _ => ErrorSite::Lexeme(token.str().to_string()),
    };

    Self {
      kind: ErrorKind::Syntax,
      line: token.line(),
      site,
      message: message.into(),
      span: token.span(),
    }
  }

  /// Convert this error into a diagnostic for rich terminal output
  pub fn to_diagnostic<FileId>(&self, file_id: FileId) -> Diagnostic<FileId> {
    Diagnostic::error()
      .with_message(&self.message)
      .with_labels(vec![Label::primary(file_id, self.span)])
  }
}

impl fmt::Display for CompileError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[line {}] Error{}: {}", self.line, self.site, self.message)
  }
}

impl std::error::Error for CompileError {}

/// An error raised while evaluating an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
  pub message: String,
  pub line: u32,
  pub span: Span,
}

impl RuntimeError {
  /// A runtime error raised by the operator `token`
  pub fn new(token: &Token, message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      line: token.line(),
      span: token.span(),
    }
  }

  /// Convert this error into a diagnostic for rich terminal output
  pub fn to_diagnostic<FileId>(&self, file_id: FileId) -> Diagnostic<FileId> {
    Diagnostic::error()
      .with_message(&self.message)
      .with_labels(vec![Label::primary(file_id, self.span)])
  }
}

impl fmt::Display for RuntimeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}\n[line {}]", self.message, self.line)
  }
}

impl std::error::Error for RuntimeError {}

/// The result of running the front end
pub type FeResult<T> = Result<T, Vec<CompileError>>;

/// The result of evaluating an expression
pub type RuntimeResult<T> = Result<T, RuntimeError>;
