//! Flowchart dialect
//!
//! `flowchart`/`graph` blocks: nodes in fourteen shapes, eleven edge
//! operators, nested subgraphs and style directives.

mod ast;
mod chumsky_parser;
mod detector;
mod generator;
mod parser;

pub use ast::*;
pub use chumsky_parser::{Chain, ChumskyFlowchartParser, Link, NodeRef};
pub use detector::*;
pub use generator::*;
pub use parser::*;
