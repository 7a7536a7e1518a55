#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use indigo_geom::{BlockPos, Face, Vec3};
use indigo_quad::{MutableQuadView, QuadEmitter, RenderLayer, RenderMaterial};
use indigo_render::{Block, BlockModel, BlockView, RenderContext};
use rand::rngs::StdRng;

pub const STONE: Block = Block::new(1);
pub const GLASS: Block = Block::new(2);

/// Sparse world: listed positions are solid, everything else is air lit by `ambient`.
#[derive(Default)]
pub struct TestWorld {
    pub solid: HashSet<BlockPos>,
    pub light: HashMap<BlockPos, u32>,
    pub luminous: HashMap<BlockPos, u8>,
    pub offsets: HashMap<BlockPos, Vec3>,
    pub ambient: u32,
    /// `light_level` calls per position.
    pub light_queries: Mutex<HashMap<BlockPos, usize>>,
}

impl TestWorld {
    pub fn lit(ambient: u32) -> Self {
        Self {
            ambient,
            ..Self::default()
        }
    }

    pub fn with_solid(mut self, positions: &[BlockPos]) -> Self {
        self.solid.extend(positions.iter().copied());
        self
    }

    pub fn light_queries_at(&self, pos: BlockPos) -> usize {
        self.light_queries.lock().unwrap().get(&pos).copied().unwrap_or(0)
    }
}

impl BlockView for TestWorld {
    fn block_at(&self, pos: BlockPos) -> Block {
        if self.solid.contains(&pos) { STONE } else { Block::AIR }
    }

    fn light_level(&self, pos: BlockPos) -> u32 {
        *self.light_queries.lock().unwrap().entry(pos).or_default() += 1;
        match self.light.get(&pos) {
            Some(&l) => l,
            None if self.solid.contains(&pos) => 0,
            None => self.ambient,
        }
    }

    fn is_fully_occluding(&self, pos: BlockPos, face: Face) -> bool {
        self.solid.contains(&pos.offset(face))
    }

    fn is_full_cube(&self, pos: BlockPos) -> bool {
        self.solid.contains(&pos)
    }

    fn is_opaque_full_cube(&self, pos: BlockPos) -> bool {
        self.solid.contains(&pos)
    }

    fn luminance(&self, pos: BlockPos) -> u8 {
        self.luminous.get(&pos).copied().unwrap_or(0)
    }

    fn default_layer(&self, block: Block) -> RenderLayer {
        if block == GLASS { RenderLayer::Translucent } else { RenderLayer::Solid }
    }

    fn model_offset(&self, pos: BlockPos) -> Vec3 {
        self.offsets.get(&pos).copied().unwrap_or(Vec3::ZERO)
    }
}

/// Block model backed by a closure over the render context.
pub struct FnModel<F>(pub F);

impl<F> BlockModel for FnModel<F>
where
    F: Fn(&mut dyn RenderContext) + Send + Sync,
{
    fn emit_block_quads(&self, _: &dyn BlockView, _: Block, _: BlockPos, _: &mut StdRng, ctx: &mut dyn RenderContext) {
        (self.0)(ctx)
    }
}

/// Full face quad on `face`, culled by it.
pub fn face_quad<'a, 'e>(
    e: &'e mut QuadEmitter<'a>,
    face: Face,
    material: RenderMaterial,
    color: u32,
    light: u32,
) -> &'e mut MutableQuadView {
    e.square(face, 0.0, 0.0, 1.0, 1.0, 0.0)
        .set_material(material)
        .set_colors(color)
        .set_lightmaps(light)
        .set_uv(0, 0.0, 0.0)
        .set_uv(1, 0.0, 1.0)
        .set_uv(2, 1.0, 1.0)
        .set_uv(3, 1.0, 0.0)
        .compute_geometry()
}

pub fn emit_face(ctx: &mut dyn RenderContext, face: Face, material: RenderMaterial, color: u32, light: u32) {
    let mut e = ctx.emitter();
    face_quad(&mut e, face, material, color, light);
    e.emit();
}
