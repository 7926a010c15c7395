//! Core generator trait for turning diagrams back into source text

use super::GenerateConfig;

/// Core trait for dialect code generators
///
/// A generator is the mirror image of a grammar: every AST node maps to one
/// emission rule, and the emitted text parses back into a structurally
/// equivalent diagram.
pub trait Generator: Send + Sync {
    /// The diagram consumed by this generator
    type Input;

    /// Emit source text for `diagram`
    fn generate(&self, diagram: &Self::Input) -> String;

    /// Get the name of this generator
    fn name(&self) -> &'static str;
}

/// Line buffer with indentation tracking
#[derive(Debug)]
pub struct CodeWriter {
    out: String,
    depth: usize,
    indent: usize,
}

impl CodeWriter {
    pub fn new(config: &GenerateConfig) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            indent: config.indent,
        }
    }

    /// Write one line at the current depth
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.out.push_str(&" ".repeat(self.depth * self.indent));
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Increase nesting depth
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease nesting depth
    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write lines produced by `body` one level deeper
    pub fn nested(&mut self, body: impl FnOnce(&mut Self)) {
        self.indent();
        body(self);
        self.dedent();
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_indents_nested_lines() {
        let mut writer = CodeWriter::new(&GenerateConfig::default().with_indent(2));
        writer.line("loop");
        writer.nested(|w| {
            w.line("A->>B: hi");
            w.nested(|w| w.line("deep"));
        });
        writer.line("end");
        assert_eq!(writer.finish(), "loop\n  A->>B: hi\n    deep\nend\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut writer = CodeWriter::new(&GenerateConfig::default());
        writer.dedent();
        assert_eq!(writer.depth(), 0);
    }
}
