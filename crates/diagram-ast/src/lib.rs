//! diagram-ast - parse Mermaid-style diagram markup into a typed AST and
//! generate it back
//!
//! Six dialects are supported: flowchart, sequence, class,
//! entity-relationship, state and Gantt. A document may hold several diagram
//! blocks; each becomes one entry of [`Program::body`].
//!
//! # Quick Start
//!
//! ```rust
//! use diagram_ast::{generate_code, parse};
//!
//! let program = parse("flowchart LR\n    A[Start] --> B{Done?}").unwrap();
//! assert_eq!(program.body.len(), 1);
//!
//! let text = generate_code(&program);
//! assert!(text.starts_with("flowchart LR"));
//! ```
//!
//! # Per-dialect Usage
//!
//! For more control, use a dialect's parser and generator directly:
//!
//! ```rust
//! use diagram_ast::prelude::*;
//!
//! let diagram = ErParser::new().parse("erDiagram\n    A ||--o{ B : has").unwrap();
//! assert_eq!(diagram.relationships().count(), 1);
//!
//! let text = ErGenerator::new().generate(&diagram);
//! assert!(text.contains("A ||--o{ B : has"));
//! ```

pub mod ast;
pub mod core;
pub mod plugins;

pub use ast::{Diagram, Program};
pub use crate::core::{DiagramError, DiagramKind, GenerateConfig, ParseConfig, Result, SkippedLine};
pub use plugins::{Dispatcher, ParseOutput};

use crate::core::Generator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ast::{Diagram, Program};
    pub use crate::core::{
        Detector, DiagramError, DiagramKind, Direction, GenerateConfig, Generator, Outline,
        Outlined, ParseConfig, Parser, Span,
    };
    pub use crate::plugins::class::{ClassDiagram, ClassGenerator, ClassParser};
    pub use crate::plugins::er::{ErDiagram, ErGenerator, ErParser};
    pub use crate::plugins::flowchart::{FlowchartDiagram, FlowchartGenerator, FlowchartParser};
    pub use crate::plugins::gantt::{GanttDiagram, GanttGenerator, GanttParser};
    pub use crate::plugins::sequence::{SequenceDiagram, SequenceGenerator, SequenceParser};
    pub use crate::plugins::state::{StateDiagram, StateGenerator, StateParser};
    pub use crate::plugins::{Dispatcher, ParseOutput};
}

/// Parse a document into a [`Program`]
///
/// Every recognised diagram block becomes one entry of `body`, in source
/// order. Lines no grammar understands are skipped; use
/// [`parse_with_diagnostics`] to see them.
///
/// # Example
/// ```rust
/// use diagram_ast::{parse, DiagramKind};
///
/// let program = parse("sequenceDiagram\n    Alice->>Bob: Hi\ngantt\n    Task : 1d").unwrap();
/// assert_eq!(program.kinds(), vec![DiagramKind::Sequence, DiagramKind::Gantt]);
/// ```
pub fn parse(input: &str) -> Result<Program> {
    Dispatcher::default().parse(input)
}

/// Parse a document and report the lines that were skipped
pub fn parse_with_diagnostics(input: &str) -> Result<ParseOutput> {
    Dispatcher::default().parse_with_diagnostics(input)
}

/// Dialect of the first diagram block in `input`
pub fn detect_diagram_type(input: &str) -> Result<DiagramKind> {
    Dispatcher::default().detect_diagram_type(input)
}

/// Generate source text for one diagram with the default configuration
pub fn generate(diagram: &Diagram) -> String {
    generate_with_config(diagram, &GenerateConfig::default())
}

/// Generate source text for one diagram
pub fn generate_with_config(diagram: &Diagram, config: &GenerateConfig) -> String {
    use crate::plugins::{class, er, flowchart, gantt, sequence, state};

    match diagram {
        Diagram::Flowchart(d) => flowchart::FlowchartGenerator::with_config(*config).generate(d),
        Diagram::Sequence(d) => sequence::SequenceGenerator::with_config(*config).generate(d),
        Diagram::Class(d) => class::ClassGenerator::with_config(*config).generate(d),
        Diagram::Er(d) => er::ErGenerator::with_config(*config).generate(d),
        Diagram::State(d) => state::StateGenerator::with_config(*config).generate(d),
        Diagram::Gantt(d) => gantt::GanttGenerator::with_config(*config).generate(d),
    }
}

/// Generate source text for a whole program
///
/// Diagrams are separated by a blank line, so the output parses back into
/// the same number of blocks.
///
/// # Example
/// ```rust
/// use diagram_ast::{generate_code, parse};
///
/// let program = parse("erDiagram\n  A ||--|{ B : owns").unwrap();
/// assert_eq!(generate_code(&program), "erDiagram\n    A ||--|{ B : owns\n");
/// ```
pub fn generate_code(program: &Program) -> String {
    program
        .body
        .iter()
        .map(generate)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_dialect() {
        let input = "flowchart TD\n  A --> B\nsequenceDiagram\n  A->>B: hi\nclassDiagram\n  A <|-- B\nerDiagram\n  A ||--o{ B : has\nstateDiagram-v2\n  [*] --> A\ngantt\n  Task : 1d";
        let program = parse(input).unwrap();
        assert_eq!(program.kinds(), DiagramKind::ALL.to_vec());
    }

    #[test]
    fn test_generate_code_separates_diagrams() {
        let program = parse("flowchart LR\n  A --> B\ngantt\n  Task : 1d").unwrap();
        let text = generate_code(&program);
        assert!(text.contains("\n\ngantt\n"));
        assert_eq!(parse(&text).unwrap().body.len(), 2);
    }

    #[test]
    fn test_generate_with_config_indent() {
        let program = parse("erDiagram\n  A ||--o{ B : has").unwrap();
        let config = GenerateConfig::default().with_indent(2);
        assert_eq!(
            generate_with_config(&program.body[0], &config),
            "erDiagram\n  A ||--o{ B : has\n"
        );
    }

    #[test]
    fn test_detect_diagram_type() {
        assert_eq!(detect_diagram_type("gantt\n  title x").unwrap(), DiagramKind::Gantt);
    }
}
