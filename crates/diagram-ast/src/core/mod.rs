//! Core abstractions shared by every dialect
//!
//! Spans, label content, the line lexer, text and token tables, the parser,
//! generator and detector traits, configuration, errors and logging.

pub mod chumsky_utils;
mod config;
mod content;
mod detector;
mod error;
mod generator;
mod lexer;
pub mod logging;
mod outline;
mod parser;
mod span;
mod text;
mod tokens;
mod types;

pub use config::*;
pub use content::*;
pub use detector::*;
pub use error::*;
pub use generator::*;
pub use lexer::*;
pub use outline::*;
pub use parser::*;
pub use span::*;
pub use text::*;
pub use tokens::*;
pub use types::*;
