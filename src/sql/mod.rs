pub mod ast;
pub mod grammar;
pub mod lexer;
pub mod parser;
mod scan;
