pub mod ast;
pub mod lexer;
pub mod parser;
pub mod symbol_table;
pub mod error;
pub mod evaluator;
pub mod executor;
