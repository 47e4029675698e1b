#![deny(clippy::all)]

pub mod compiler;
pub mod constants;
pub mod error;
pub mod interpreter;
pub mod source;
pub mod vm;

pub use error::{CompileError, FeResult, RuntimeError, RuntimeResult};
