use lox_env::{
  io::Io,
  stdio::support::{IoStdioTest, StdioTestContainer},
};
use lox_vm::vm::{Vm, VmExit};
use std::{
  fs, io,
  path::{Path, PathBuf},
  rc::Rc,
};

pub fn fixture_path(fixture: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .join("fixture")
    .join(fixture)
}

// each test binary only uses some of these helpers
#[allow(dead_code)]
pub fn assert_files_exit(paths: &[&str], expected: VmExit) -> io::Result<()> {
  for path in paths {
    let container = Rc::new(StdioTestContainer::default());
    let exit = run_fixture(path, &container)?;

    if exit != expected {
      container.log_stdio();
      panic!("{} exited with {:?}, expected {:?}", path, exit, expected);
    }
  }

  Ok(())
}

#[allow(dead_code)]
pub fn assert_file_exit_and_stdio(
  path: &str,
  stdout: Option<Vec<&str>>,
  stderr: Option<Vec<&str>>,
  expected: VmExit,
) -> io::Result<()> {
  let container = Rc::new(StdioTestContainer::default());
  let exit = run_fixture(path, &container)?;

  if exit != expected {
    container.log_stdio();
    panic!("{} exited with {:?}, expected {:?}", path, exit, expected);
  }

  // assert stdout matches if provided
  if let Some(stdout) = stdout {
    assert_lines(&container, &container.stdout.contents(), &stdout);
  }

  // assert stderr matches if provided
  if let Some(stderr) = stderr {
    assert_lines(&container, &container.stderr.contents(), &stderr);
  }

  Ok(())
}

#[allow(dead_code)]
pub fn assert_repl(lines: &[&str], stdout: &str, stderr: &str) {
  let container = Rc::new(StdioTestContainer::with_lines(
    lines.iter().map(|line| format!("{}\n", line)).collect(),
  ));

  let mut vm = test_vm(&container);
  assert_eq!(vm.repl(), (0, VmExit::Ok));

  assert_eq!(container.stdout.contents(), stdout);
  assert_eq!(container.stderr.contents(), stderr);
}

pub fn test_vm(container: &Rc<StdioTestContainer>) -> Vm {
  let io = Io::new(Rc::new(IoStdioTest::new(container)));
  Vm::new(io)
}

fn run_fixture(path: &str, container: &Rc<StdioTestContainer>) -> io::Result<VmExit> {
  let fixture = fixture_path(path);
  let source = fs::read_to_string(&fixture)?;

  let mut vm = test_vm(container);
  let (_, exit) = vm.run(fixture, &source);

  Ok(exit)
}

fn assert_lines(container: &StdioTestContainer, actual: &str, expected: &[&str]) {
  let actual: Vec<&str> = actual.trim_end().split('\n').collect();

  if actual != expected {
    container.log_stdio();
    panic!("expected:\n{:?}\nactual:\n{:?}", expected, actual);
  }
}
