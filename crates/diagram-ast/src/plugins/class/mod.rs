//! Class diagram dialect
//!
//! Classes with members, annotations and generics, eight relation kinds
//! with optional cardinalities, namespaces and notes.

mod ast;
mod chumsky_parser;
mod detector;
mod generator;
mod parser;

pub use ast::*;
pub use chumsky_parser::{parse_member, ChumskyClassParser, ClassHeader};
pub use detector::*;
pub use generator::*;
pub use parser::*;
