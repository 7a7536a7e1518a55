use indigo_geom::BlockPos;
use indigo_lighting::{Block, BlockView};

use crate::item_context::ItemStack;

/// Tint source for block quads, keyed by the quad's color index.
///
/// Returns `0x00RRGGBB`; the renderer forces opaque alpha before multiplying.
pub trait BlockColors: Send + Sync {
    fn color(&self, block: Block, view: Option<&dyn BlockView>, pos: Option<BlockPos>, tint_index: u32) -> u32;
}

/// Tint source for item quads.
pub trait ItemColors: Send + Sync {
    fn color(&self, stack: &ItemStack, tint_index: u32) -> u32;
}

/// Leaves every quad untinted.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTint;

impl BlockColors for NoTint {
    #[inline]
    fn color(&self, _: Block, _: Option<&dyn BlockView>, _: Option<BlockPos>, _: u32) -> u32 {
        0x00FF_FFFF
    }
}

impl ItemColors for NoTint {
    #[inline]
    fn color(&self, _: &ItemStack, _: u32) -> u32 {
        0x00FF_FFFF
    }
}
