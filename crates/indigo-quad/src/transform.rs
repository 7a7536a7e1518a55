use std::sync::Arc;

use crate::mutable::MutableQuadView;

/// Rewrites a quad in flight. Returning `false` drops it.
pub trait QuadTransform: Send + Sync {
    fn transform(&self, quad: &mut MutableQuadView) -> bool;
}

impl<F> QuadTransform for F
where
    F: Fn(&mut MutableQuadView) -> bool + Send + Sync,
{
    fn transform(&self, quad: &mut MutableQuadView) -> bool {
        self(quad)
    }
}

/// LIFO chain of transforms, applied most recently pushed first.
#[derive(Clone, Default)]
pub struct TransformStack {
    stack: Vec<Arc<dyn QuadTransform>>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transform: Arc<dyn QuadTransform>) {
        self.stack.push(transform);
    }

    /// Panics when the stack is empty.
    pub fn pop(&mut self) {
        assert!(self.stack.pop().is_some(), "transform stack pop without matching push");
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Runs the chain. Stops at, and returns false for, the first rejection.
    pub fn apply(&self, quad: &mut MutableQuadView) -> bool {
        self.stack.iter().rev().all(|t| t.transform(quad))
    }
}
