use crate::span::Span;

use super::types::Type;

/// A constraint between two types, carrying the span of the expression
/// that emitted it so solver failures can point at source.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Equal { left: Type, right: Type, span: Span },
    /// Reserved for the solver interface; the generator never emits these.
    Subtype { sub: Type, sup: Type, span: Span },
}

/// Insertion-ordered collection of constraints. The solver consumes
/// entries in exactly the order they were pushed.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        ConstraintSet::default()
    }

    pub fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn push_equal(&mut self, left: Type, right: Type, span: Span) {
        self.constraints.push(Constraint::Equal { left, right, span });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}
