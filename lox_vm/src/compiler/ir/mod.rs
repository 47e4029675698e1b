pub mod ast;
pub mod ast_printer;
pub mod token;
