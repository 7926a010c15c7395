//! Dispatcher for multi-diagram documents
//!
//! The dispatcher splits a document into blocks at header lines and hands
//! each block to its dialect's grammar:
//! lex → split at headers → Parser[dialect] → Diagram → Program

use serde::{Deserialize, Serialize};
use tracing::{debug, info, span, trace, warn, Level};

use crate::ast::{Diagram, Program};
use crate::core::{
    lex, Detector, DiagramError, DiagramKind, ParseConfig, ParseContext, Parser, Result,
    SkippedLine, SourceLine,
};
use crate::plugins::class::{ClassDetector, ClassParser};
use crate::plugins::er::{ErDetector, ErParser};
use crate::plugins::flowchart::{FlowchartDetector, FlowchartParser};
use crate::plugins::gantt::{GanttDetector, GanttParser};
use crate::plugins::sequence::{SequenceDetector, SequenceParser};
use crate::plugins::state::{StateDetector, StateParser};

/// A parsed program together with the lines the grammars ignored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutput {
    pub program: Program,
    pub skipped: Vec<SkippedLine>,
}

/// One diagram block: its dialect and lines, header first
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    pub kind: DiagramKind,
    pub lines: &'a [SourceLine],
}

/// Routes diagram blocks to their grammars
///
/// Header recognition goes through the registered detectors, so a
/// dispatcher without a detector for a dialect treats that dialect's
/// header as an ordinary line.
pub struct Dispatcher {
    detectors: Vec<Box<dyn Detector>>,
    config: ParseConfig,
}

impl Dispatcher {
    /// Create a dispatcher with no detectors registered
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
            config: ParseConfig::default(),
        }
    }

    /// Create a dispatcher that recognises all six dialects
    pub fn with_all_dialects() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register_default_detectors();
        dispatcher
    }

    pub fn with_config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Register a detector; a later detector for the same dialect replaces
    /// the earlier one
    pub fn register_detector(&mut self, detector: Box<dyn Detector>) {
        let kind = detector.kind();
        self.detectors.retain(|existing| existing.kind() != kind);
        self.detectors.push(detector);
    }

    pub fn register_default_detectors(&mut self) {
        self.register_detector(Box::new(FlowchartDetector::new()));
        self.register_detector(Box::new(SequenceDetector::new()));
        self.register_detector(Box::new(ClassDetector::new()));
        self.register_detector(Box::new(ErDetector::new()));
        self.register_detector(Box::new(StateDetector::new()));
        self.register_detector(Box::new(GanttDetector::new()));
    }

    /// Dialects with a registered detector
    pub fn dialects(&self) -> Vec<DiagramKind> {
        self.detectors.iter().map(|detector| detector.kind()).collect()
    }

    /// Dialect whose header is `line`, if any registered detector claims it
    fn header_kind(&self, line: &str) -> Option<DiagramKind> {
        self.detectors
            .iter()
            .find(|detector| detector.is_header(line))
            .map(|detector| detector.kind())
    }

    /// Split lexed lines into blocks; lines before the first header are
    /// returned separately
    pub fn split_blocks<'a>(&self, lines: &'a [SourceLine]) -> (&'a [SourceLine], Vec<Block<'a>>) {
        let starts: Vec<(usize, DiagramKind)> = lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| self.header_kind(&line.text).map(|kind| (idx, kind)))
            .collect();

        let preamble_end = starts.first().map(|(idx, _)| *idx).unwrap_or(lines.len());
        let blocks = starts
            .iter()
            .enumerate()
            .map(|(n, (start, kind))| {
                let end = starts.get(n + 1).map(|(next, _)| *next).unwrap_or(lines.len());
                Block {
                    kind: *kind,
                    lines: &lines[*start..end],
                }
            })
            .collect();

        (&lines[..preamble_end], blocks)
    }

    /// Parse a document into a program
    pub fn parse(&self, input: &str) -> Result<Program> {
        self.parse_with_diagnostics(input).map(|output| output.program)
    }

    /// Parse a document, also returning every skipped line
    pub fn parse_with_diagnostics(&self, input: &str) -> Result<ParseOutput> {
        let dispatch_span = span!(Level::INFO, "dispatch", input_len = input.len());
        let _enter = dispatch_span.enter();

        let lines = lex(input);
        let (preamble, blocks) = self.split_blocks(&lines);
        let mut ctx = ParseContext::new(self.config);

        if blocks.is_empty() {
            let found = lines.first().map(|line| line.text.clone()).unwrap_or_default();
            warn!(found = %found, "No diagram header found");
            return Err(DiagramError::diagram_type(found));
        }

        for line in preamble {
            ctx.skip(line, "outside any diagram block");
        }

        let mut program = Program::new();
        for block in blocks {
            info!(dialect = %block.kind, lines = block.lines.len(), "Parsing diagram block");
            ctx.set_dialect(block.kind);
            let diagram = parse_block(block, &mut ctx)?;
            trace!(statements = diagram.statement_count(), "Block parsed");
            program.body.push(diagram);
        }

        let skipped = ctx.into_skipped();
        debug!(
            diagrams = program.body.len(),
            skipped = skipped.len(),
            "Parsed program"
        );
        Ok(ParseOutput { program, skipped })
    }

    /// Dialect of the first block, or the best confidence guess for text
    /// without any header
    pub fn detect_diagram_type(&self, input: &str) -> Result<DiagramKind> {
        let detect_span = span!(Level::INFO, "detect_diagram_type", input_len = input.len());
        let _enter = detect_span.enter();

        let lines = lex(input);
        if let Some(kind) = lines.iter().find_map(|line| self.header_kind(&line.text)) {
            debug!(dialect = %kind, "Detected diagram header");
            return Ok(kind);
        }

        let best = self
            .detectors
            .iter()
            .map(|detector| (detector.kind(), detector.confidence(input)))
            .inspect(|(kind, confidence)| trace!(dialect = %kind, confidence, "Checking detector"))
            .filter(|(_, confidence)| *confidence > 0.5)
            .max_by(|a, b| a.1.total_cmp(&b.1));

        match best {
            Some((kind, confidence)) => {
                info!(dialect = %kind, confidence, "Guessed diagram type");
                Ok(kind)
            }
            None => {
                warn!("No suitable detector found for input");
                let found = lines.first().map(|line| line.text.clone()).unwrap_or_default();
                Err(DiagramError::diagram_type(found))
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_all_dialects()
    }
}

/// Run the grammar for one block
fn parse_block(block: Block<'_>, ctx: &mut ParseContext) -> Result<Diagram> {
    let diagram = match block.kind {
        DiagramKind::Flowchart => FlowchartParser::new().parse_lines(block.lines, ctx)?.into(),
        DiagramKind::Sequence => SequenceParser::new().parse_lines(block.lines, ctx)?.into(),
        DiagramKind::Class => ClassParser::new().parse_lines(block.lines, ctx)?.into(),
        DiagramKind::Er => ErParser::new().parse_lines(block.lines, ctx)?.into(),
        DiagramKind::State => StateParser::new().parse_lines(block.lines, ctx)?.into(),
        DiagramKind::Gantt => GanttParser::new().parse_lines(block.lines, ctx)?.into(),
    };
    Ok(diagram)
}
