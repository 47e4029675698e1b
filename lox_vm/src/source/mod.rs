mod files;
pub use files::{LineError, LineOffsets, VmFileId, VmFiles, VM_FILE_TEST_ID};

use bumpalo::{boxed::Box, Bump};
use std::ops::Deref;

/// A source string along with the arena its syntax tree is
/// allocated in
pub struct Source {
  content: String,
  alloc: Bump,
}

impl Source {
  pub fn new(content: impl Into<String>) -> Self {
    let content = content.into();
    let alloc = Bump::with_capacity(content.len() * 2);

    Self { content, alloc }
  }

  /// Allocate a tree node in this source's arena
  pub fn node<T>(&self, node: T) -> Box<T> {
    Box::new_in(node, &self.alloc)
  }
}

impl Deref for Source {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.content
  }
}

impl AsRef<str> for Source {
  fn as_ref(&self) -> &str {
    self
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn new() {
    let content = "(1 + 2) * 3";
    let src = Source::new(content);

    assert_eq!(&*src, content)
  }

  #[test]
  fn node() {
    let src = Source::new("");
    let node = src.node(10);

    assert_eq!(*node, 10);
  }
}
