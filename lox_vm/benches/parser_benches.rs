use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lox_vm::{
  compiler::{scan, Parser},
  source::Source,
};
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

fn scan_source(source: &str) {
  let scanned = scan(source);
  assert!(scanned.errors.is_empty());
}

fn parse_source(source: &str) {
  let source = Source::new(source);
  let scanned = scan(&source);
  let parser = Parser::new(&source, scanned.tokens);
  parser.parse().unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
  let sources = [
    ("arithmetic", load_source("arithmetic.lox")),
    ("equality", load_source("equality.lox")),
    ("grouping", load_source("grouping.lox")),
    ("strings", load_source("strings.lox")),
  ];

  for (name, source) in &sources {
    c.bench_with_input(BenchmarkId::new("scan", name), source, |b, s| {
      b.iter(|| scan_source(s));
    });
    c.bench_with_input(BenchmarkId::new("parse", name), source, |b, s| {
      b.iter(|| parse_source(s));
    });
  }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
