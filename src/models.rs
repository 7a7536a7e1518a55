use std::sync::Arc;

use indigo_geom::{BlockPos, Face};
use indigo_quad::sprite::BAKE_LOCK_UV;
use indigo_quad::{MaterialRegistry, MeshBuilder, RenderMaterial, Sprite};
use indigo_render::{Block, BlockColors, BlockView, MeshModel};
use indigo_runtime::ModelTable;

use crate::world::blocks::*;

const ATLAS_TILES: f32 = 4.0;

/// Tile `index` of a 4x4 texture atlas.
fn atlas(index: u32) -> Sprite {
    let (col, row) = ((index % 4) as f32, (index / 4) as f32);
    Sprite::new(
        col / ATLAS_TILES,
        row / ATLAS_TILES,
        (col + 1.0) / ATLAS_TILES,
        (row + 1.0) / ATLAS_TILES,
    )
}

/// Grass: tinted top, plain sides and dirt bottom.
fn grass(material: RenderMaterial) -> MeshModel {
    let mut builder = MeshBuilder::new();
    let mut e = builder.emitter();
    for face in Face::ALL {
        let (tile, tint) = match face {
            Face::PosY => (2, Some(0)),
            Face::NegY => (1, None),
            _ => (3, None),
        };
        e.square(face, 0.0, 0.0, 1.0, 1.0, 0.0)
            .set_material(material)
            .set_color_index(tint)
            .set_colors(0xFFFF_FFFF)
            .sprite_bake(&atlas(tile), BAKE_LOCK_UV)
            .compute_geometry();
        e.emit();
    }
    drop(e);
    MeshModel::new(builder.build()).with_vanilla(true)
}

/// Water: top face sits below the block top, so it is never culled by the block above.
fn water(material: RenderMaterial) -> MeshModel {
    let mut builder = MeshBuilder::new();
    let mut e = builder.emitter();
    for face in Face::ALL {
        let depth = if face == Face::PosY { 0.125 } else { 0.0 };
        let top = if face == Face::PosY || face == Face::NegY { 1.0 } else { 0.875 };
        e.square(face, 0.0, 0.0, 1.0, top, depth)
            .set_material(material)
            .set_colors(0xB03F_76E4)
            .sprite_bake(&atlas(6), BAKE_LOCK_UV)
            .compute_geometry();
        e.emit();
    }
    drop(e);
    MeshModel::new(builder.build())
}

/// Every block model of the demo world, in block id order.
pub fn build_models(materials: &MaterialRegistry) -> Vec<(Block, Arc<MeshModel>)> {
    let standard = RenderMaterial::STANDARD;
    let material = |name: &str| {
        materials.get(name).unwrap_or_else(|| {
            log::warn!("material {name:?} not defined; using standard");
            standard
        })
    };
    let cube = |tile| MeshModel::cube(standard, &atlas(tile), None).with_vanilla(true);
    vec![
        (STONE, Arc::new(cube(0))),
        (DIRT, Arc::new(cube(1))),
        (GRASS, Arc::new(grass(standard))),
        (SAND, Arc::new(cube(4))),
        (SNOW, Arc::new(cube(5))),
        (WATER, Arc::new(water(material("water")))),
        (GLOWSTONE, Arc::new(MeshModel::cube(material("glow"), &atlas(7), None))),
    ]
}

pub fn model_table(models: &[(Block, Arc<MeshModel>)]) -> ModelTable {
    let mut table = ModelTable::new();
    for (block, model) in models {
        table.insert(block.id, model.clone());
    }
    table
}

/// Grass gets lusher toward the water line.
pub struct GrassTint {
    pub height: i32,
}

impl BlockColors for GrassTint {
    fn color(&self, _: Block, _: Option<&dyn BlockView>, pos: Option<BlockPos>, _: u32) -> u32 {
        let t = pos.map_or(0.5, |p| (p.y as f32 / self.height.max(1) as f32).clamp(0.0, 1.0));
        let lerp = |a: u32, b: u32| (a as f32 + (b as f32 - a as f32) * t) as u32;
        lerp(0x3A, 0x8F) << 16 | lerp(0x9D, 0xB3) << 8 | lerp(0x23, 0x6E)
    }
}
