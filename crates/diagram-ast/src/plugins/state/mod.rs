//! State diagram dialect
//!
//! Syntax examples:
//! ```text
//! stateDiagram-v2
//!     [*] --> Idle
//!     Idle --> Processing : start
//!     state Processing {
//!         [*] --> Working
//!     }
//!     Processing --> [*]
//! ```

mod ast;
mod chumsky_parser;
mod detector;
mod generator;
mod parser;

pub use ast::*;
pub use chumsky_parser::{ChumskyStateParser, NoteHeader, StateHeader};
pub use detector::*;
pub use generator::*;
pub use parser::*;
