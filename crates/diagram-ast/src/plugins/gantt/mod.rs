//! Gantt chart dialect
//!
//! Sections of tasks with optional ids, status tags, start dates and
//! durations. Dates are not resolved; `after <id>` starts are kept as text.

mod ast;
mod detector;
mod generator;
mod parser;

pub use ast::*;
pub use detector::*;
pub use generator::*;
pub use parser::*;
