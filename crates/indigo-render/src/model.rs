use std::sync::Arc;

use indigo_geom::{BlockPos, Face};
use indigo_lighting::{Block, BlockView};
use indigo_quad::sprite::BAKE_LOCK_UV;
use indigo_quad::{Mesh, MeshBuilder, QuadEmitter, QuadTransform, RenderMaterial, Sprite};
use rand::rngs::StdRng;

use crate::item_context::ItemStack;

/// What model code sees while emitting: an emitter plus the transform stack.
pub trait RenderContext {
    /// Cursor whose `emit()` sends the quad through transforms and tessellation.
    fn emitter(&mut self) -> QuadEmitter<'_>;

    /// Transforms apply to every quad emitted until the matching `pop_transform`.
    fn push_transform(&mut self, transform: Arc<dyn QuadTransform>);

    /// Panics when nothing was pushed.
    fn pop_transform(&mut self);

    fn has_transform(&self) -> bool;

    /// Emits every quad of `mesh` in order.
    fn accept_mesh(&mut self, mesh: &Mesh) {
        let mut emitter = self.emitter();
        mesh.for_each(|quad| {
            emitter.copy_from(&quad);
            emitter.emit();
        });
    }
}

/// Produces a block's quads. Called exactly once per render; quads are not retained.
pub trait BlockModel: Send + Sync {
    fn emit_block_quads(
        &self,
        view: &dyn BlockView,
        block: Block,
        pos: BlockPos,
        rng: &mut StdRng,
        ctx: &mut dyn RenderContext,
    );

    /// Whether smooth lighting may apply to quads with default AO.
    fn use_ambient_occlusion(&self) -> bool {
        true
    }

    /// Vanilla-equivalent geometry; selects the fast AO path in hybrid mode.
    fn is_vanilla_adapter(&self) -> bool {
        false
    }
}

pub trait ItemModel: Send + Sync {
    fn emit_item_quads(&self, stack: &ItemStack, rng: &mut StdRng, ctx: &mut dyn RenderContext);
}

/// A model that replays a prebuilt mesh.
#[derive(Clone, Debug)]
pub struct MeshModel {
    mesh: Mesh,
    ambient_occlusion: bool,
    vanilla: bool,
}

impl MeshModel {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            ambient_occlusion: true,
            vanilla: false,
        }
    }

    pub fn with_ambient_occlusion(mut self, ao: bool) -> Self {
        self.ambient_occlusion = ao;
        self
    }

    pub fn with_vanilla(mut self, vanilla: bool) -> Self {
        self.vanilla = vanilla;
        self
    }

    /// Full unit cube, every face culled against its neighbor.
    pub fn cube(material: RenderMaterial, sprite: &Sprite, color_index: Option<u32>) -> Self {
        let mut builder = MeshBuilder::new();
        let mut e = builder.emitter();
        for face in Face::ALL {
            e.square(face, 0.0, 0.0, 1.0, 1.0, 0.0)
                .set_material(material)
                .set_color_index(color_index)
                .set_colors(0xFFFF_FFFF)
                .sprite_bake(sprite, BAKE_LOCK_UV)
                .compute_geometry();
            e.emit();
        }
        drop(e);
        Self::new(builder.build())
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl BlockModel for MeshModel {
    fn emit_block_quads(&self, _: &dyn BlockView, _: Block, _: BlockPos, _: &mut StdRng, ctx: &mut dyn RenderContext) {
        ctx.accept_mesh(&self.mesh);
    }

    fn use_ambient_occlusion(&self) -> bool {
        self.ambient_occlusion
    }

    fn is_vanilla_adapter(&self) -> bool {
        self.vanilla
    }
}

impl ItemModel for MeshModel {
    fn emit_item_quads(&self, _: &ItemStack, _: &mut StdRng, ctx: &mut dyn RenderContext) {
        ctx.accept_mesh(&self.mesh);
    }
}
