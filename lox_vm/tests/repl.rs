use support::assert_repl;

mod support;

#[test]
fn evaluates_each_line() {
  assert_repl(&["1 + 2", "\"a\" + \"b\"", "!true"], "> 3\n> ab\n> false\n> ", "");
}

#[test]
fn continues_after_errors() {
  assert_repl(
    &["1 +", "-nil", "2 * 3"],
    "> > > 6\n> ",
    "[line 1] Error at end: Expect expression.\nOperand must be a number.\n[line 0]\n",
  );
}

#[test]
fn blank_line_exits() {
  assert_repl(&["1", "", "2"], "> 1\n> ", "");
}

#[test]
fn end_of_input_exits() {
  assert_repl(&[], "> ", "");
}
