//! Immutable quad meshes and the builder that records them.

use std::sync::Arc;

use crate::emitter::{QuadEmitter, QuadSink};
use crate::encoding::TOTAL_STRIDE;
use crate::mutable::MutableQuadView;
use crate::view::QuadView;

/// A finished, shareable list of packed quads with computed geometry.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    data: Arc<[u32]>,
}

/// Borrowed view of one quad inside a `Mesh`.
#[derive(Copy, Clone, Debug)]
pub struct MeshQuad<'a> {
    data: &'a [u32],
}

impl QuadView for MeshQuad<'_> {
    #[inline]
    fn data(&self) -> &[u32] {
        self.data
    }
}

impl Mesh {
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.data.len() / TOTAL_STRIDE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MeshQuad<'_>> {
        self.data
            .chunks_exact(TOTAL_STRIDE)
            .map(|data| MeshQuad { data })
    }

    pub fn for_each(&self, mut f: impl FnMut(MeshQuad<'_>)) {
        for quad in self.iter() {
            f(quad);
        }
    }
}

#[derive(Default)]
struct MeshBuffer {
    data: Vec<u32>,
}

impl QuadSink for MeshBuffer {
    fn accept(&mut self, quad: &mut MutableQuadView) {
        self.data.extend_from_slice(quad.raw());
    }
}

/// Records emitted quads into a growable buffer.
#[derive(Default)]
pub struct MeshBuilder {
    quad: MutableQuadView,
    buffer: MeshBuffer,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitter(&mut self) -> QuadEmitter<'_> {
        QuadEmitter::new(&mut self.quad, &mut self.buffer)
    }

    /// Takes everything emitted so far. The builder is empty afterwards.
    pub fn build(&mut self) -> Mesh {
        self.quad.clear();
        let data = std::mem::take(&mut self.buffer.data);
        Mesh { data: data.into() }
    }
}
