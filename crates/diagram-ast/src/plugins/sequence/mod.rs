//! Sequence dialect
//!
//! Participants, messages with eight arrow kinds, notes, nested control
//! blocks (`loop`, `alt`, `opt`, `par`, `critical`, `break`, `rect`, `box`)
//! and the activation and numbering directives.

mod ast;
mod detector;
mod generator;
mod parser;

pub use ast::*;
pub use detector::*;
pub use generator::*;
pub use parser::*;
