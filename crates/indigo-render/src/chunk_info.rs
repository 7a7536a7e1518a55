use std::sync::Arc;

use indigo_geom::BlockPos;
use indigo_lighting::{BlockView, LightCache};

use crate::sink::ChunkMesh;

/// World binding, light cache and output buffers for one chunk rebuild.
pub struct ChunkRenderInfo {
    pub(crate) origin: BlockPos,
    pub(crate) view: Option<Arc<dyn BlockView>>,
    pub(crate) cache: LightCache,
    pub(crate) mesh: ChunkMesh,
}

impl ChunkRenderInfo {
    pub fn new(fix_luminous_occlusion: bool) -> Self {
        Self {
            origin: BlockPos::ORIGIN,
            view: None,
            cache: LightCache::new(fix_luminous_occlusion),
            mesh: ChunkMesh::new(),
        }
    }

    /// Binds `view` for a rebuild of the chunk at `origin` and drops cached light.
    pub fn prepare(&mut self, view: Arc<dyn BlockView>, origin: BlockPos) {
        self.view = Some(view);
        self.origin = origin;
        self.cache.clear();
        self.mesh = ChunkMesh::new();
    }

    /// Unbinds the world and hands back the finished mesh.
    pub fn release(&mut self) -> ChunkMesh {
        self.view = None;
        self.cache.clear();
        std::mem::take(&mut self.mesh)
    }

    #[inline]
    pub fn origin(&self) -> BlockPos {
        self.origin
    }

    #[inline]
    pub fn is_prepared(&self) -> bool {
        self.view.is_some()
    }

    #[inline]
    pub fn cache(&self) -> &LightCache {
        &self.cache
    }
}
