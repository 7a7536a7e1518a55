use indigo_geom::{BlockPos, Face};
use indigo_quad::{BlendMode, RenderLayer};

use crate::view::{Block, BlockView};

/// Per-block render state, reset by `prepare_for_block`.
#[derive(Clone, Debug)]
pub struct BlockRenderInfo {
    pub pos: BlockPos,
    pub block: Block,
    /// Global AO switch.
    pub use_ao: bool,
    /// AO for materials that leave it at `TriState::Default`.
    pub default_ao: bool,
    pub default_layer: RenderLayer,
    pub cull_enabled: bool,
    cull_completion: u8,
    cull_result: u8,
}

impl BlockRenderInfo {
    pub fn new(use_ao: bool, cull_enabled: bool) -> Self {
        Self {
            pos: BlockPos::ORIGIN,
            block: Block::AIR,
            use_ao,
            default_ao: false,
            default_layer: RenderLayer::Solid,
            cull_enabled,
            cull_completion: 0,
            cull_result: 0,
        }
    }

    pub fn prepare_for_block(&mut self, view: &dyn BlockView, pos: BlockPos, block: Block, model_ao: bool) {
        self.pos = pos;
        self.block = block;
        self.default_ao = self.use_ao && model_ao && view.luminance(pos) == 0;
        self.default_layer = view.default_layer(block);
        self.cull_completion = 0;
        self.cull_result = 0;
    }

    /// Whether a quad declaring `cull_face` is visible. Memoized per face for the current block.
    pub fn should_draw_face(&mut self, view: &dyn BlockView, cull_face: Option<Face>) -> bool {
        let Some(face) = cull_face else {
            return true;
        };
        if !self.cull_enabled {
            return true;
        }
        let mask = 1u8 << face.index();
        if self.cull_completion & mask == 0 {
            self.cull_completion |= mask;
            if !view.is_fully_occluding(self.pos, face) {
                self.cull_result |= mask;
            }
        }
        self.cull_result & mask != 0
    }

    /// Render layer for `mode`, falling back to the block's own layer.
    #[inline]
    pub fn effective_layer(&self, mode: BlendMode) -> RenderLayer {
        mode.layer().unwrap_or(self.default_layer)
    }
}
