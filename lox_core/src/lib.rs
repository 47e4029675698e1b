#![deny(clippy::all)]
mod macros;
pub mod utils;
pub mod value;
