/// The deepest an expression may nest before the parser gives up
pub const MAX_NESTING_DEPTH: usize = 256;

/// The tallest tree the parser will hand back, counting every node
/// on the longest path from the root to a leaf
pub const MAX_TREE_HEIGHT: u32 = 1024;

/// The file name reported for lines entered at the prompt
pub const REPL_FILE: &str = "repl.lox";

/// Exit status after a lexical or syntax error
pub const EXIT_COMPILE_ERROR: i32 = 65;

/// Exit status after an error during evaluation
pub const EXIT_RUNTIME_ERROR: i32 = 70;

/// Exit status when input could not be read
pub const EXIT_IO_ERROR: i32 = 74;
