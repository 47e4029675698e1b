#[cfg(feature = "debug")]
mod debug;

use crate::{
  compiler::parse_with_offsets,
  constants::{EXIT_COMPILE_ERROR, EXIT_IO_ERROR, EXIT_RUNTIME_ERROR, REPL_FILE},
  error::{CompileError, RuntimeError},
  interpreter::Interpreter,
  source::{Source, VmFileId, VmFiles},
};
use codespan_reporting::{
  diagnostic::Diagnostic,
  term::{self, Config},
};
use lox_core::value::Value;
use lox_env::{io::Io, stdio::Stdio};
use lox_native::io::io_native;
use std::path::PathBuf;

/// The outcome of executing a single source
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteResult {
  Ok(Value),
  CompileError,
  RuntimeError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmExit {
  Ok,
  RuntimeError,
  CompileError,
  IoError,
}

/// Options controlling how the vm reports errors
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VmConfig {
  /// Render each error with a source snippet in addition to
  /// its one line report
  pub diagnostics: bool,
}

pub fn default_native_vm() -> Vm {
  Vm::new(io_native())
}

/// The driver for the lox expression language
pub struct Vm {
  /// The environment io
  io: Io,

  /// Every source this vm has executed
  files: VmFiles,

  /// How errors are reported
  config: VmConfig,

  /// The evaluator for parsed expressions
  interpreter: Interpreter,
}

impl Vm {
  pub fn new(io: Io) -> Vm {
    Vm {
      io,
      files: VmFiles::default(),
      config: VmConfig::default(),
      interpreter: Interpreter::default(),
    }
  }

  /// Replace this vm's configuration
  pub fn with_config(mut self, config: VmConfig) -> Self {
    self.config = config;
    self
  }

  /// Start the interactive repl. Each line is executed on its own,
  /// end of input or an empty line ends the session
  pub fn repl(&mut self) -> (i32, VmExit) {
    let mut stdio = self.io.stdio();

    loop {
      let mut buffer = String::new();

      write!(stdio.stdout(), "> ").expect("Could not write to stdout");
      stdio.stdout().flush().expect("Could not write to stdout");

      match stdio.read_line(&mut buffer) {
        Ok(0) => {
          return (0, VmExit::Ok);
        },
        Ok(_) => {
          if buffer.trim().is_empty() {
            return (0, VmExit::Ok);
          }

          if let ExecuteResult::Ok(value) = self.execute(REPL_FILE, buffer) {
            writeln!(stdio.stdout(), "{}", value).expect("Could not write to stdout");
          }
        },
        Err(error) => {
          writeln!(stdio.stderr(), "{}", error).expect("Unable to write to stderr");
          return (EXIT_IO_ERROR, VmExit::IoError);
        },
      }
    }
  }

  /// Run the provided source file, printing the resulting value
  pub fn run(&mut self, module_path: PathBuf, source_content: &str) -> (i32, VmExit) {
    let name = module_path.to_string_lossy();

    match self.execute(&name, source_content.to_string()) {
      ExecuteResult::Ok(value) => {
        writeln!(self.io.stdio().stdout(), "{}", value).expect("Could not write to stdout");
        (0, VmExit::Ok)
      },
      ExecuteResult::CompileError => (EXIT_COMPILE_ERROR, VmExit::CompileError),
      ExecuteResult::RuntimeError => (EXIT_RUNTIME_ERROR, VmExit::RuntimeError),
    }
  }

  /// Interpret the provided source returning the execution result.
  /// Errors are still reported to stderr
  ///
  /// # Examples
  /// ```
  /// use lox_core::val;
  /// use lox_env::io::Io;
  /// use lox_vm::vm::{ExecuteResult, Vm};
  ///
  /// let mut vm = Vm::new(Io::default());
  ///
  /// assert_eq!(vm.interpret("1 + 2"), ExecuteResult::Ok(val!(3.0)));
  /// assert_eq!(vm.interpret("1 +"), ExecuteResult::CompileError);
  /// assert_eq!(vm.interpret("-nil"), ExecuteResult::RuntimeError);
  /// ```
  pub fn interpret(&mut self, source_content: &str) -> ExecuteResult {
    self.execute(REPL_FILE, source_content.to_string())
  }

  /// Scan, parse and evaluate a source registered under `name`
  fn execute(&mut self, name: &str, source_content: String) -> ExecuteResult {
    let file_id = self.files.upsert(name, &source_content);
    let source = Source::new(source_content);

    #[cfg(feature = "debug")]
    {
      self.print_tokens(&source).expect("Unable to print tokens");
    }

    let (ast, line_offsets) = parse_with_offsets(&source);
    self
      .files
      .update_line_offsets(file_id, line_offsets)
      .expect("Source missing from the file database");

    let ast = match ast {
      Ok(ast) => ast,
      Err(errors) => {
        self.report_compile_errors(file_id, &errors);
        return ExecuteResult::CompileError;
      },
    };

    #[cfg(feature = "debug")]
    {
      self.print_ast(&ast).expect("Unable to print ast");
    }

    match self.interpreter.evaluate(&ast) {
      Ok(value) => ExecuteResult::Ok(value),
      Err(error) => {
        self.report_runtime_error(file_id, &error);
        ExecuteResult::RuntimeError
      },
    }
  }

  /// Report each lexical or syntax error
  fn report_compile_errors(&self, file_id: VmFileId, errors: &[CompileError]) {
    let mut stdio = self.io.stdio();

    for error in errors {
      writeln!(stdio.stderr(), "{}", error).expect("Unable to write to stderr");

      if self.config.diagnostics {
        self.emit(&mut stdio, &error.to_diagnostic(file_id));
      }
    }
  }

  /// Report an error raised during evaluation
  fn report_runtime_error(&self, file_id: VmFileId, error: &RuntimeError) {
    let mut stdio = self.io.stdio();
    writeln!(stdio.stderr(), "{}", error).expect("Unable to write to stderr");

    if self.config.diagnostics {
      self.emit(&mut stdio, &error.to_diagnostic(file_id));
    }
  }

  /// Render a diagnostic against the file database
  fn emit(&self, stdio: &mut Stdio, diagnostic: &Diagnostic<VmFileId>) {
    term::emit(
      stdio.stderr_color(),
      &Config::default(),
      &self.files,
      diagnostic,
    )
    .expect("Unable to write to stderr");
  }
}
