#![deny(clippy::all)]
use lox_vm::{
  constants::EXIT_IO_ERROR,
  vm::{default_native_vm, VmConfig},
};
use std::env;
use std::fs::read_to_string;
use std::{path::PathBuf, process};

#[cfg(feature = "jemalloc")]
use jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

const DIAGNOSTICS_FLAG: &str = "--diagnostics";
const EXIT_USAGE: i32 = 64;

fn run(file_path: &str, config: VmConfig) -> i32 {
  let mut vm = default_native_vm().with_config(config);
  let path = PathBuf::from(file_path);

  match read_to_string(&path) {
    Ok(source) => vm.run(path, &source).0,
    Err(e) => {
      eprintln!("{}: {}", file_path, e);
      EXIT_IO_ERROR
    },
  }
}

fn repl(config: VmConfig) -> i32 {
  default_native_vm().with_config(config).repl().0
}

fn main() {
  let args: Vec<String> = env::args().collect();
  let diagnostics = VmConfig { diagnostics: true };

  let code = match args.as_slice() {
    [_] => repl(VmConfig::default()),
    [_, flag] if flag == DIAGNOSTICS_FLAG => repl(diagnostics),
    [_, file_path] => run(file_path, VmConfig::default()),
    [_, flag, file_path] if flag == DIAGNOSTICS_FLAG => run(file_path, diagnostics),
    _ => {
      eprintln!("Usage: lox [{}] [script]", DIAGNOSTICS_FLAG);
      EXIT_USAGE
    },
  };

  process::exit(code)
}
