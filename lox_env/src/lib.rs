#![deny(clippy::all)]

pub mod io;
pub mod stdio;
