use hashbrown::HashMap;
use indigo_geom::Vec3;
use indigo_quad::RenderLayer;
use indigo_quad::color::to_rgba_bytes;

/// Overlay coordinates used when the caller supplies none (no hurt flash, no white flash).
pub const DEFAULT_OVERLAY: u32 = 0x000A_0000;

/// One fully shaded output vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    /// `0xAARRGGBB`.
    pub color: u32,
    pub uv: [f32; 2],
    pub overlay: u32,
    /// Packed block/sky light.
    pub light: u32,
    pub normal: Vec3,
}

/// Receives tessellated vertices. Four consecutive calls form one quad.
pub trait VertexSink {
    fn vertex(&mut self, v: &Vertex);
}

/// Resolves the vertex sink for a render layer.
pub trait LayerSinks {
    fn sink(&mut self, layer: RenderLayer) -> &mut dyn VertexSink;
}

/// CPU-side mesh in structure-of-arrays form, two triangles per quad.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u32>,
    pub col: Vec<u8>,
    pub light: Vec<u32>,
    pub overlay: Vec<u32>,
}

impl MeshBuild {
    /// Clears all arrays but retains capacity for reuse across rebuilds.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.norm.clear();
        self.uv.clear();
        self.idx.clear();
        self.col.clear();
        self.light.clear();
        self.overlay.clear();
    }

    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.pos.reserve(n_quads * 4 * 3);
        self.norm.reserve(n_quads * 4 * 3);
        self.uv.reserve(n_quads * 4 * 2);
        self.col.reserve(n_quads * 4 * 4);
        self.light.reserve(n_quads * 4);
        self.overlay.reserve(n_quads * 4);
        self.idx.reserve(n_quads * 6);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    /// Completed quads. A quad with fewer than four vertices so far is not counted.
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.idx.len() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Position of vertex `i`.
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos[i * 3], self.pos[i * 3 + 1], self.pos[i * 3 + 2])
    }

    /// `[r, g, b, a]` of vertex `i`.
    pub fn rgba(&self, i: usize) -> [u8; 4] {
        let c = &self.col[i * 4..i * 4 + 4];
        [c[0], c[1], c[2], c[3]]
    }
}

impl VertexSink for MeshBuild {
    fn vertex(&mut self, v: &Vertex) {
        self.pos.extend_from_slice(&[v.pos.x, v.pos.y, v.pos.z]);
        self.col.extend_from_slice(&to_rgba_bytes(v.color));
        self.uv.extend_from_slice(&v.uv);
        self.overlay.push(v.overlay);
        self.light.push(v.light);
        self.norm.extend_from_slice(&[v.normal.x, v.normal.y, v.normal.z]);
        let count = self.vertex_count() as u32;
        if count % 4 == 0 {
            let base = count - 4;
            self.idx
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }
}

/// Per-layer output of one chunk rebuild. Layer buffers are created on first use.
#[derive(Default, Clone, Debug)]
pub struct ChunkMesh {
    layers: HashMap<RenderLayer, MeshBuild>,
}

impl ChunkMesh {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn layer(&self, layer: RenderLayer) -> Option<&MeshBuild> {
        self.layers.get(&layer)
    }

    /// Non-empty layers in `RenderLayer::ALL` order.
    pub fn layers(&self) -> impl Iterator<Item = (RenderLayer, &MeshBuild)> {
        RenderLayer::ALL
            .into_iter()
            .filter_map(|l| self.layers.get(&l).map(|b| (l, b)))
            .filter(|(_, b)| !b.is_empty())
    }

    pub fn quad_count(&self) -> usize {
        self.layers.values().map(MeshBuild::quad_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.values().all(MeshBuild::is_empty)
    }

    /// Empties every layer, keeping the allocations.
    pub fn clear_keep_capacity(&mut self) {
        for build in self.layers.values_mut() {
            build.clear_keep_capacity();
        }
    }
}

impl LayerSinks for ChunkMesh {
    fn sink(&mut self, layer: RenderLayer) -> &mut dyn VertexSink {
        self.layers.entry(layer).or_default()
    }
}

/// Routes every layer into one sink.
pub(crate) struct SingleSink<'a>(pub &'a mut dyn VertexSink);

impl LayerSinks for SingleSink<'_> {
    fn sink(&mut self, _layer: RenderLayer) -> &mut dyn VertexSink {
        &mut *self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32) -> Vertex {
        Vertex {
            pos: Vec3::new(x, 0.0, 0.0),
            color: 0x80FF_0000,
            uv: [0.0, 1.0],
            overlay: DEFAULT_OVERLAY,
            light: 0x00F0_0000,
            normal: Vec3::UP,
        }
    }

    #[test]
    fn indices_follow_each_fourth_vertex() {
        let mut b = MeshBuild::default();
        for i in 0..3 {
            b.vertex(&vertex(i as f32));
        }
        assert!(b.idx.is_empty());
        assert_eq!(b.quad_count(), 0);
        b.vertex(&vertex(3.0));
        assert_eq!(b.idx, vec![0, 1, 2, 0, 2, 3]);
        for i in 4..8 {
            b.vertex(&vertex(i as f32));
        }
        assert_eq!(&b.idx[6..], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(b.quad_count(), 2);
        assert_eq!(b.rgba(0), [0xFF, 0, 0, 0x80]);
        assert_eq!(b.position(5).x, 5.0);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut b = MeshBuild::default();
        b.reserve_quads(8);
        let cap = b.pos.capacity();
        for i in 0..4 {
            b.vertex(&vertex(i as f32));
        }
        b.clear_keep_capacity();
        assert!(b.is_empty());
        assert!(b.idx.is_empty());
        assert_eq!(b.pos.capacity(), cap);
    }

    #[test]
    fn chunk_mesh_creates_layers_lazily() {
        let mut mesh = ChunkMesh::new();
        assert!(mesh.layer(RenderLayer::Cutout).is_none());
        for i in 0..4 {
            mesh.sink(RenderLayer::Cutout).vertex(&vertex(i as f32));
        }
        assert_eq!(mesh.quad_count(), 1);
        assert!(mesh.layer(RenderLayer::Solid).is_none());
        let layers: Vec<_> = mesh.layers().map(|(l, _)| l).collect();
        assert_eq!(layers, vec![RenderLayer::Cutout]);
    }
}
