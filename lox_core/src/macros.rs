/// Construct a lox `Value` from any type with a `From`
/// conversion into `Value`
///
/// # Examples
/// ```
/// use lox_core::{val, value::Value};
///
/// assert_eq!(val!(10.0), Value::Number(10.0));
/// assert_eq!(val!(true), Value::Bool(true));
/// assert_eq!(val!("example"), Value::String("example".to_string()));
/// ```
#[macro_export]
macro_rules! val {
  ( $x:expr ) => {
    $crate::value::Value::from($x)
  };
}
