use lox_vm::compiler::{parse, scan};
use lox_vm::source::Source;
use std::env;
use std::fs::read_to_string;
use std::process;
use std::time::Instant;

const ITERATIONS: usize = 100000;

fn load_source(path: &str) -> String {
  match read_to_string(path) {
    Ok(source) => source,
    Err(e) => {
      eprintln!("{}: {}", path, e);
      process::exit(74);
    },
  }
}

fn scanner_bench(src: &str) {
  for _ in 0..ITERATIONS {
    let scanned = scan(src);
    assert!(scanned.errors.is_empty());
  }
}

fn parser_bench(src: &str) {
  for _ in 0..ITERATIONS {
    let source = Source::new(src);
    assert!(parse(&source).is_ok());
  }
}

fn main() {
  let args: Vec<String> = env::args().collect();
  match args.as_slice() {
    [_, file_path] => {
      let src = load_source(file_path);
      let now = Instant::now();

      parser_bench(&src);

      println!("{}", (now.elapsed().as_micros() as f64) / 1000000.0);
    },
    [_, bench_type, file_path] => {
      let src = load_source(file_path);
      let now = Instant::now();

      if bench_type == "scan" {
        scanner_bench(&src);
      } else {
        parser_bench(&src);
      }

      println!("{}", (now.elapsed().as_micros() as f64) / 1000000.0);
    },
    _ => {
      println!("Usage: lox_frontend_bench [scan|parse] [path]");
      process::exit(1);
    },
  }
}
