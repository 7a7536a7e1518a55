use indigo_geom::{BlockPos, Face, Vec3};
use indigo_quad::RenderLayer;

/// Opaque block state handle: a block type and its state bits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: u16,
    pub state: u16,
}

impl Block {
    pub const AIR: Block = Block { id: 0, state: 0 };

    #[inline]
    pub const fn new(id: u16) -> Self {
        Self { id, state: 0 }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self.id == 0
    }
}

/// Vanilla diffuse table: down 0.5, up 1.0, north/south 0.8, east/west 0.6.
#[inline]
pub fn default_directional_shade(face: Face, shaded: bool) -> f32 {
    if !shaded {
        return 1.0;
    }
    match face {
        Face::NegY => 0.5,
        Face::PosY => 1.0,
        Face::NegZ | Face::PosZ => 0.8,
        Face::NegX | Face::PosX => 0.6,
    }
}

/// Read-only world queries consumed by the renderer. Shared across worker
/// threads for the duration of a rebuild.
pub trait BlockView: Send + Sync {
    fn block_at(&self, pos: BlockPos) -> Block;

    /// Packed world light at `pos`: `sky << 16 | block`, each `level * 16`.
    fn light_level(&self, pos: BlockPos) -> u32;

    /// Whether the neighbor across `face` of the block at `pos` fully covers that face.
    fn is_fully_occluding(&self, pos: BlockPos, face: Face) -> bool;

    fn is_full_cube(&self, pos: BlockPos) -> bool;

    fn is_opaque_full_cube(&self, pos: BlockPos) -> bool;

    fn blocks_vision(&self, pos: BlockPos) -> bool {
        self.is_opaque_full_cube(pos)
    }

    fn opacity(&self, pos: BlockPos) -> u8 {
        if self.is_opaque_full_cube(pos) { 15 } else { 0 }
    }

    /// Emitted light level, `0..=15`.
    fn luminance(&self, _pos: BlockPos) -> u8 {
        0
    }

    fn default_layer(&self, _block: Block) -> RenderLayer {
        RenderLayer::Solid
    }

    /// Per-position model jitter (e.g. for plants).
    fn model_offset(&self, _pos: BlockPos) -> Vec3 {
        Vec3::ZERO
    }

    fn directional_shade(&self, face: Face, shaded: bool) -> f32 {
        default_directional_shade(face, shaded)
    }
}
