use std::fmt;

/// A lox runtime value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
  Number(f64),
  String(String),
  Bool(bool),
  #[default]
  Nil,
}

impl Value {
  #[inline]
  pub fn is_nil(&self) -> bool {
    matches!(self, Value::Nil)
  }

  /// Is this value exactly `false`. `nil` is not false
  #[inline]
  pub fn is_false(&self) -> bool {
    matches!(self, Value::Bool(false))
  }

  /// Retrieve the underlying number if this value is one
  #[inline]
  pub fn as_num(&self) -> Option<f64> {
    match self {
      Value::Number(num) => Some(*num),
      _ => None,
    }
  }
}

impl From<f64> for Value {
  fn from(num: f64) -> Self {
    Value::Number(num)
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

impl From<String> for Value {
  fn from(string: String) -> Self {
    Value::String(string)
  }
}

impl From<&str> for Value {
  fn from(string: &str) -> Self {
    Value::String(string.to_string())
  }
}

impl From<()> for Value {
  fn from(_: ()) -> Self {
    Value::Nil
  }
}

impl fmt::Display for Value {
  /// The text a lox program displays for this value
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Number(num) => fmt_number(*num, f),
      Value::String(string) => f.write_str(string),
      Value::Bool(b) => write!(f, "{}", b),
      Value::Nil => f.write_str("nil"),
    }
  }
}

/// Write a number in its shortest round trip form. Integral
/// numbers never carry a trailing `.0` and very large or very
/// small magnitudes switch to exponent form, `1e+21` and `1e-7`
fn fmt_number(num: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
  if num.is_nan() {
    return f.write_str("NaN");
  }

  if num.is_infinite() {
    return f.write_str(if num > 0.0 { "Infinity" } else { "-Infinity" });
  }

  // negative zero included
  if num == 0.0 {
    return f.write_str("0");
  }

  let magnitude = num.abs();
  if (1e-6..1e21).contains(&magnitude) {
    return write!(f, "{}", num);
  }

  let exponential = format!("{:e}", num);
  match exponential.split_once('e') {
    Some((mantissa, exponent)) if !exponent.starts_with('-') => {
      write!(f, "{}e+{}", mantissa, exponent)
    },
    _ => f.write_str(&exponential),
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn nil_is_distinct() {
    assert_ne!(Value::Nil, Value::Bool(false));
    assert_ne!(Value::Nil, Value::String(String::new()));
    assert_ne!(Value::Nil, Value::Number(0.0));
    assert_eq!(Value::Nil, Value::Nil);
  }

  #[test]
  fn number_never_equals_string() {
    assert_ne!(Value::Number(1.0), Value::String("1".to_string()));
  }

  #[test]
  fn display_numbers() {
    assert_eq!(Value::Number(24.0).to_string(), "24");
    assert_eq!(Value::Number(-3.0).to_string(), "-3");
    assert_eq!(Value::Number(45.67).to_string(), "45.67");
    assert_eq!(
      Value::Number(146.0 / 6.0).to_string(),
      "24.333333333333332"
    );
    assert_eq!(Value::Number(1.0 / 0.0).to_string(), "Infinity");
    assert_eq!(Value::Number(-1.0 / 0.0).to_string(), "-Infinity");
    assert_eq!(Value::Number(0.0 / 0.0).to_string(), "NaN");
  }

  #[test]
  fn display_zero() {
    assert_eq!(Value::Number(0.0).to_string(), "0");
    assert_eq!(Value::Number(-0.0).to_string(), "0");
  }

  #[test]
  fn display_exponents() {
    assert_eq!(Value::Number(1e21).to_string(), "1e+21");
    assert_eq!(Value::Number(-1e21).to_string(), "-1e+21");
    assert_eq!(Value::Number(2.5e300).to_string(), "2.5e+300");
    assert_eq!(Value::Number(f64::MAX).to_string(), "1.7976931348623157e+308");
    assert_eq!(Value::Number(1e-7).to_string(), "1e-7");
    assert_eq!(Value::Number(-1.5e-10).to_string(), "-1.5e-10");
    assert_eq!(Value::Number(5e-324).to_string(), "5e-324");

    assert_eq!(Value::Number(1e20).to_string(), "100000000000000000000");
    assert_eq!(Value::Number(123456789012.0).to_string(), "123456789012");
    assert_eq!(Value::Number(0.000001).to_string(), "0.000001");
  }

  #[test]
  fn display_others() {
    assert_eq!(Value::Nil.to_string(), "nil");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::String("ab".to_string()).to_string(), "ab");
    assert_eq!(Value::String(String::new()).to_string(), "");
  }

  #[test]
  fn accessors() {
    assert_eq!(Value::Number(2.5).as_num(), Some(2.5));
    assert_eq!(Value::Nil.as_num(), None);
    assert!(Value::Bool(false).is_false());
    assert!(!Value::Nil.is_false());
  }
}
