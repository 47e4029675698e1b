use crate::io::IoImpl;
use std::io::{self, Write};
use termcolor::{ColorSpec, WriteColor};

/// A wrapper the provided facilities around standard input output and err
pub struct Stdio {
  stdio: Box<dyn StdioImpl>,
}

impl Default for Stdio {
  fn default() -> Self {
    Self {
      stdio: Box::<StdioMock>::default(),
    }
  }
}

impl Stdio {
  /// Create a new wrapper from the provided stdio facilities
  pub fn new(stdio: Box<dyn StdioImpl>) -> Self {
    Self { stdio }
  }

  /// Get a Write to stdout
  pub fn stdout(&mut self) -> &mut dyn Write {
    self.stdio.stdout()
  }

  /// Get a Write to stderr
  pub fn stderr(&mut self) -> &mut dyn Write {
    self.stdio.stderr()
  }

  /// Get a color aware Write to stderr
  pub fn stderr_color(&mut self) -> &mut dyn WriteColor {
    self.stdio.stderr_color()
  }

  /// Read a line from standard in
  pub fn read_line(&self, buffer: &mut String) -> io::Result<usize> {
    self.stdio.read_line(buffer)
  }
}

pub trait StdioImpl {
  fn stdout(&mut self) -> &mut dyn Write;
  fn stderr(&mut self) -> &mut dyn Write;
  fn stderr_color(&mut self) -> &mut dyn WriteColor;

  fn read_line(&self, buffer: &mut String) -> io::Result<usize>;
}

#[derive(Debug)]
pub struct IoStdioMock();

impl IoImpl<Stdio> for IoStdioMock {
  fn make(&self) -> Stdio {
    Stdio::default()
  }
}

#[derive(Default)]
pub struct StdioMock {
  write: MockWrite,
}

impl StdioImpl for StdioMock {
  fn stdout(&mut self) -> &mut dyn Write {
    &mut self.write
  }
  fn stderr(&mut self) -> &mut dyn Write {
    &mut self.write
  }
  fn stderr_color(&mut self) -> &mut dyn WriteColor {
    &mut self.write
  }
  fn read_line(&self, _buffer: &mut String) -> io::Result<usize> {
    Ok(0)
  }
}

/// A writer that discards everything written to it
#[derive(Default)]
pub struct MockWrite();

impl Write for MockWrite {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    Ok(buf.len())
  }
  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl WriteColor for MockWrite {
  fn supports_color(&self) -> bool {
    false
  }
  fn set_color(&mut self, _spec: &ColorSpec) -> io::Result<()> {
    Ok(())
  }
  fn reset(&mut self) -> io::Result<()> {
    Ok(())
  }
}

pub mod support {
  use super::{Stdio, StdioImpl};
  use crate::io::IoImpl;
  use std::{
    cell::{Cell, RefCell},
    io::{self, Write},
    rc::Rc,
  };
  use termcolor::{ColorSpec, WriteColor};

  /// A shared in memory buffer standing in for an output stream
  #[derive(Debug, Default, Clone)]
  pub struct TestWriter(Rc<RefCell<Vec<u8>>>);

  impl TestWriter {
    /// The text written so far
    pub fn contents(&self) -> String {
      String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
  }

  impl Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.borrow_mut().extend_from_slice(buf);
      Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  impl WriteColor for TestWriter {
    fn supports_color(&self) -> bool {
      false
    }
    fn set_color(&mut self, _spec: &ColorSpec) -> io::Result<()> {
      Ok(())
    }
    fn reset(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  /// Holds everything a test stdio wrote and the lines it will read
  #[derive(Debug, Default)]
  pub struct StdioTestContainer {
    pub stdout: TestWriter,
    pub stderr: TestWriter,
    pub lines: Vec<String>,
    line_index: Rc<Cell<usize>>,
  }

  impl StdioTestContainer {
    pub fn with_lines(lines: Vec<String>) -> Self {
      Self {
        lines,
        ..Default::default()
      }
    }

    pub fn make_stdio(&self) -> StdioTest {
      StdioTest {
        stdout: self.stdout.clone(),
        stderr: self.stderr.clone(),
        lines: self.lines.clone(),
        line_index: Rc::clone(&self.line_index),
      }
    }

    pub fn log_stdio(&self) {
      eprintln!("{}", self.stdout.contents());
      eprintln!("{}", self.stderr.contents());
    }
  }

  #[derive(Debug)]
  pub struct IoStdioTest {
    container: Rc<StdioTestContainer>,
  }

  impl IoStdioTest {
    pub fn new(container: &Rc<StdioTestContainer>) -> Self {
      Self {
        container: Rc::clone(container),
      }
    }
  }

  impl IoImpl<Stdio> for IoStdioTest {
    fn make(&self) -> Stdio {
      Stdio::new(Box::new(self.container.make_stdio()))
    }
  }

  #[derive(Debug, Clone)]
  pub struct StdioTest {
    stdout: TestWriter,
    stderr: TestWriter,
    lines: Vec<String>,
    line_index: Rc<Cell<usize>>,
  }

  impl StdioImpl for StdioTest {
    fn stdout(&mut self) -> &mut dyn Write {
      &mut self.stdout
    }
    fn stderr(&mut self) -> &mut dyn Write {
      &mut self.stderr
    }
    fn stderr_color(&mut self) -> &mut dyn WriteColor {
      &mut self.stderr
    }
    fn read_line(&self, buffer: &mut String) -> io::Result<usize> {
      let index = self.line_index.get();

      match self.lines.get(index) {
        Some(line) => {
          buffer.push_str(line);
          self.line_index.set(index + 1);
          Ok(line.len())
        },
        None => Ok(0),
      }
    }
  }

}
