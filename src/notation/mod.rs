mod error;
mod lexer;
mod parse;
mod format;
mod describe;
mod validate;

#[cfg(test)]
mod str_test_strategies;

pub use error::NotationError;
pub use parse::{Parser, parse, is_valid_notation, residue};
pub use format::{Formatted, format, to_notation};
pub use describe::describe;
pub use validate::{ValidationResult, validate};
