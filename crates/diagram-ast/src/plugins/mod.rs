//! Dialect implementations and the dispatcher
//!
//! Each dialect module owns its AST, grammar, generator and detector. The
//! dispatcher ties them together for multi-diagram documents.

pub mod class;
pub mod dispatcher;
pub mod er;
pub mod flowchart;
pub mod gantt;
pub mod sequence;
pub mod state;

pub use dispatcher::{Block, Dispatcher, ParseOutput};
