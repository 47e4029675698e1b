use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lox_env::io::Io;
use lox_vm::vm::{ExecuteResult, Vm};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_path(bench_path: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .join("fixture")
    .join("criterion")
    .join(bench_path)
}

fn load_source(bench_path: &str) -> String {
  fs::read_to_string(fixture_path(bench_path)).expect("Unable to load benchmark file.")
}

fn criterion_benchmark(c: &mut Criterion) {
  let sources = [
    ("arithmetic", load_source("arithmetic.lox")),
    ("equality", load_source("equality.lox")),
    ("grouping", load_source("grouping.lox")),
    ("strings", load_source("strings.lox")),
  ];

  for (name, source) in &sources {
    c.bench_with_input(BenchmarkId::new("interpret", name), source, |b, s| {
      let mut vm = Vm::new(Io::default());

      b.iter(|| match vm.interpret(s) {
        ExecuteResult::Ok(_) => (),
        result => panic!("benchmark failed with {:?}", result),
      });
    });
  }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
