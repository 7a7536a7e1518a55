use indigo_geom::{BlockPos, Pose};
use indigo_lighting::{AoCalculator, Block, BlockRenderInfo, BlockView, DirectSampler};
use indigo_quad::{MutableQuadView, TransformStack};

use crate::colors::BlockColors;
use crate::config::RendererConfig;
use crate::error::RenderCrash;
use crate::model::BlockModel;
use crate::renderer::{BlockTessellator, emit_block};
use crate::sink::{DEFAULT_OVERLAY, SingleSink, VertexSink};

/// Caller-supplied inputs for one `BlockRenderContext::render` call.
#[derive(Clone, Copy, Debug)]
pub struct BlockRenderParams {
    pub block: Block,
    pub pos: BlockPos,
    pub pose: Pose,
    pub overlay: u32,
    pub seed: u64,
    /// Skip faces hidden by neighbors.
    pub cull: bool,
}

impl BlockRenderParams {
    /// Identity pose, default overlay, culling on, seed derived from `pos`.
    pub fn new(block: Block, pos: BlockPos) -> Self {
        Self {
            block,
            pos,
            pose: Pose::IDENTITY,
            overlay: DEFAULT_OVERLAY,
            seed: pos.render_seed(),
            cull: true,
        }
    }
}

/// Renders single blocks outside chunk rebuilds: every layer goes to one sink.
pub struct BlockRenderContext {
    info: BlockRenderInfo,
    ao: AoCalculator,
    sampler: DirectSampler,
    quad: MutableQuadView,
    transforms: TransformStack,
}

impl BlockRenderContext {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            info: BlockRenderInfo::new(config.ambient_occlusion, true),
            ao: AoCalculator::new(config.lighting),
            sampler: DirectSampler::new(config.lighting.fix_luminous_occlusion),
            quad: MutableQuadView::new(),
            transforms: TransformStack::new(),
        }
    }

    pub fn render(
        &mut self,
        view: &dyn BlockView,
        model: &dyn BlockModel,
        colors: &dyn BlockColors,
        params: &BlockRenderParams,
        sink: &mut dyn VertexSink,
    ) -> Result<(), RenderCrash> {
        self.transforms.clear();
        self.quad.clear();
        self.info.cull_enabled = params.cull;
        self.info
            .prepare_for_block(view, params.pos, params.block, model.use_ambient_occlusion());
        self.ao.clear();

        let mut sinks = SingleSink(sink);
        let tess = BlockTessellator {
            view,
            info: &mut self.info,
            ao: &mut self.ao,
            sampler: &mut self.sampler,
            transforms: &mut self.transforms,
            colors,
            sinks: &mut sinks,
            pose: params.pose,
            overlay: params.overlay,
            is_vanilla: model.is_vanilla_adapter(),
        };
        let result = emit_block(model, &mut self.quad, tess, params.seed);
        self.ao.clear();
        result.map_err(|message| {
            log::warn!("block render at {:?} crashed: {message}", params.pos);
            RenderCrash {
                pos: params.pos,
                block: params.block,
                message,
            }
        })
    }
}
