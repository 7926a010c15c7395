//! Span-insensitive structural summaries of AST nodes
//!
//! Two trees are structurally equivalent when their outlines are equal: the
//! same statement kinds, in the same order, with the same nesting. Labels,
//! text and spans do not take part.

/// Kind and children of one AST node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    pub kind: &'static str,
    pub children: Vec<Outline>,
}

impl Outline {
    pub fn leaf(kind: &'static str) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn node(kind: &'static str, children: Vec<Outline>) -> Self {
        Self { kind, children }
    }

    /// Outline every item of a statement list
    pub fn of_all<'a, T: Outlined + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<Outline> {
        items.into_iter().map(Outlined::outline).collect()
    }

    /// Number of nodes in this outline, itself included
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Outline::count).sum::<usize>()
    }
}

/// Implemented by every AST node that takes part in structural comparison
pub trait Outlined {
    fn outline(&self) -> Outline;
}
