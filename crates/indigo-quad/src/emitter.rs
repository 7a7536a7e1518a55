use std::ops::{Deref, DerefMut};

use crate::mutable::MutableQuadView;

/// Destination of emitted quads: a renderer or a mesh buffer.
pub trait QuadSink {
    /// Receives a finished quad. The quad is cleared after this returns.
    fn accept(&mut self, quad: &mut MutableQuadView);
}

/// Producer-facing cursor: write fields through `Deref`, then `emit()`.
pub struct QuadEmitter<'a> {
    quad: &'a mut MutableQuadView,
    sink: &'a mut dyn QuadSink,
}

impl<'a> QuadEmitter<'a> {
    pub fn new(quad: &'a mut MutableQuadView, sink: &'a mut dyn QuadSink) -> Self {
        Self { quad, sink }
    }

    /// Hands the quad to the sink and clears the cursor.
    /// Panics if positions changed since the last `compute_geometry()`.
    pub fn emit(&mut self) -> &mut Self {
        assert!(
            self.quad.is_geometry_valid(),
            "quad emitted without compute_geometry()"
        );
        self.sink.accept(&mut *self.quad);
        self.quad.clear();
        self
    }
}

impl Deref for QuadEmitter<'_> {
    type Target = MutableQuadView;

    fn deref(&self) -> &MutableQuadView {
        &*self.quad
    }
}

impl DerefMut for QuadEmitter<'_> {
    fn deref_mut(&mut self) -> &mut MutableQuadView {
        &mut *self.quad
    }
}
