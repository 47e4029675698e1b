use crate::stdio::{IoStdioMock, Stdio};
use std::{fmt, rc::Rc};

#[derive(Debug)]
/// A struct wrapping the externally provided io to lox
pub struct Io {
  stdio_impl: Rc<dyn IoImpl<Stdio>>,
}

impl Default for Io {
  fn default() -> Self {
    Self {
      stdio_impl: Rc::new(IoStdioMock()),
    }
  }
}

impl Io {
  /// Create a new io wrapper uses the provided io impl
  pub fn new(stdio_impl: Rc<dyn IoImpl<Stdio>>) -> Self {
    Self { stdio_impl }
  }

  /// Generate a wrapper to stdio facilities
  pub fn stdio(&self) -> Stdio {
    self.stdio_impl.make()
  }
}

impl Clone for Io {
  fn clone(&self) -> Self {
    Io::new(Rc::clone(&self.stdio_impl))
  }
}

/// A factory for an io facility
pub trait IoImpl<T>: fmt::Debug {
  fn make(&self) -> T;
}
