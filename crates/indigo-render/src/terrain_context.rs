use std::sync::Arc;

use indigo_geom::{BlockPos, Pose};
use indigo_lighting::{AoCalculator, Block, BlockRenderInfo, BlockView};
use indigo_quad::{MutableQuadView, TransformStack};

use crate::chunk_info::ChunkRenderInfo;
use crate::colors::BlockColors;
use crate::config::RendererConfig;
use crate::error::RenderCrash;
use crate::model::BlockModel;
use crate::renderer::{BlockTessellator, emit_block};
use crate::sink::{ChunkMesh, DEFAULT_OVERLAY};

/// Chunk rebuild state owned by one worker at a time.
///
/// `prepare` binds a world, `tessellate_block` is called for every block in
/// the chunk, `release` returns the mesh and unbinds the world.
pub struct TerrainRenderContext {
    info: BlockRenderInfo,
    chunk: ChunkRenderInfo,
    ao: AoCalculator,
    quad: MutableQuadView,
    transforms: TransformStack,
    colors: Arc<dyn BlockColors>,
}

impl TerrainRenderContext {
    pub fn new(config: &RendererConfig, colors: Arc<dyn BlockColors>) -> Self {
        Self {
            info: BlockRenderInfo::new(config.ambient_occlusion, config.cull_faces),
            chunk: ChunkRenderInfo::new(config.lighting.fix_luminous_occlusion),
            ao: AoCalculator::new(config.lighting),
            quad: MutableQuadView::new(),
            transforms: TransformStack::new(),
            colors,
        }
    }

    pub fn prepare(&mut self, view: Arc<dyn BlockView>, origin: BlockPos) {
        self.chunk.prepare(view, origin);
        log::debug!("terrain context prepared for chunk at {origin:?}");
    }

    /// Renders `block` at absolute `pos` into the chunk's layer buffers.
    ///
    /// Panics if called before `prepare`.
    pub fn tessellate_block(&mut self, model: &dyn BlockModel, block: Block, pos: BlockPos) -> Result<(), RenderCrash> {
        let view: &dyn BlockView = self
            .chunk
            .view
            .as_deref()
            .expect("terrain context used before prepare()");
        self.info
            .prepare_for_block(view, pos, block, model.use_ambient_occlusion());
        self.ao.clear();

        let mut pose = Pose::IDENTITY;
        pose.translate(pos.relative_to(self.chunk.origin) + view.model_offset(pos));
        let tess = BlockTessellator {
            view,
            info: &mut self.info,
            ao: &mut self.ao,
            sampler: &mut self.chunk.cache,
            transforms: &mut self.transforms,
            colors: &*self.colors,
            sinks: &mut self.chunk.mesh,
            pose,
            overlay: DEFAULT_OVERLAY,
            is_vanilla: model.is_vanilla_adapter(),
        };
        emit_block(model, &mut self.quad, tess, pos.render_seed()).map_err(|message| RenderCrash {
            pos,
            block,
            message,
        })
    }

    pub fn release(&mut self) -> ChunkMesh {
        self.ao.clear();
        self.chunk.release()
    }

    #[inline]
    pub fn chunk(&self) -> &ChunkRenderInfo {
        &self.chunk
    }
}
