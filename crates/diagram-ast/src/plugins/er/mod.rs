//! Entity-relationship dialect
//!
//! Entities with typed attributes and relationships between them written
//! with crow's-foot cardinality operators.

mod ast;
mod chumsky_parser;
mod detector;
mod generator;
mod parser;

pub use ast::*;
pub use chumsky_parser::{ChumskyErParser, EntityHeader};
pub use detector::*;
pub use generator::*;
pub use parser::*;
