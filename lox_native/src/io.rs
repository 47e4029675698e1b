use crate::stdio::IoStdioNative;
use lox_env::io::Io;
use std::rc::Rc;

/// Io backed by the process's own standard streams
pub fn io_native() -> Io {
  Io::new(Rc::new(IoStdioNative::colored()))
}
