//! Configuration value trees.
//!
//! This module handles:
//! - The immutable, shared value tree and its iteration modes
//! - Reading UCL text (strings and files) into a tree
//! - Parser flags and macro registration

mod lexer;
pub mod object;
pub mod parser;

pub use object::{Iter, Kind, Object};
pub use parser::{MacroHandler, Parser, ParserFlags, parse_file, parse_str};
