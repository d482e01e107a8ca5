pub mod interpreter;
pub mod parser;

pub use interpreter::{Collaborators, Interpreter};
pub use parser::{parse_line, ParsedLine};
