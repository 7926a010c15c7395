//! Parser and generator configuration

/// Default limit on nested blocks, subgraphs and composite states
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Default number of spaces per indentation level in generated text
pub const DEFAULT_INDENT: usize = 4;

/// Settings that apply to every grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Deepest allowed nesting of block constructs
    pub max_nesting_depth: usize,
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Settings that apply to every generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Spaces per nesting level
    pub indent: usize,
    /// Omit the sequence statements that older generators never emitted
    /// (activation, create, destroy, box, link, properties, autonumber)
    pub drop_unsupported_sequence_statements: bool,
}

impl GenerateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn drop_unsupported_sequence_statements(mut self, drop: bool) -> Self {
        self.drop_unsupported_sequence_statements = drop;
        self
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            drop_unsupported_sequence_statements: false,
        }
    }
}
