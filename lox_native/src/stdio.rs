use lox_env::{
  io::IoImpl,
  stdio::{Stdio, StdioImpl},
};
use std::io::{self, stdin, stdout, Stdout, Write};
use termcolor::{ColorChoice, StandardStream, WriteColor};

#[derive(Debug, Default)]
pub struct IoStdioNative {
  color: bool,
}

impl IoStdioNative {
  /// Native stdio that colors diagnostics written to stderr
  pub fn colored() -> Self {
    Self { color: true }
  }
}

impl IoImpl<Stdio> for IoStdioNative {
  fn make(&self) -> Stdio {
    Stdio::new(Box::new(NativeStdio::new(self.color)))
  }
}

pub struct NativeStdio {
  stdout: Stdout,
  stderr: StandardStream,
}

impl NativeStdio {
  fn new(color: bool) -> Self {
    let choice = if color {
      ColorChoice::Auto
    } else {
      ColorChoice::Never
    };

    Self {
      stdout: stdout(),
      stderr: StandardStream::stderr(choice),
    }
  }
}

impl StdioImpl for NativeStdio {
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
    stdin().read_line(buffer)
  }
}
