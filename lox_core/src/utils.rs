use crate::value::Value;

/// Is the provided `value` falsey according to lox rules. Only
/// `nil` and `false` are falsey, `0` and `""` are truthy
#[inline]
pub fn is_falsey(value: &Value) -> bool {
  value.is_false() || value.is_nil()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn falsey() {
    assert!(is_falsey(&Value::Nil));
    assert!(is_falsey(&Value::Bool(false)));

    assert!(!is_falsey(&Value::Bool(true)));
    assert!(!is_falsey(&Value::Number(0.0)));
    assert!(!is_falsey(&Value::String(String::new())));
  }
}
