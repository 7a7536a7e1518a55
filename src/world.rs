use fastnoise_lite::{FastNoiseLite, NoiseType};
use indigo_geom::{BlockPos, Face};
use indigo_quad::RenderLayer;
use indigo_quad::light::pack;
use indigo_render::{Block, BlockView};

use crate::config::WorldConfig;

pub mod blocks {
    use indigo_render::Block;

    pub const STONE: Block = Block::new(1);
    pub const DIRT: Block = Block::new(2);
    pub const GRASS: Block = Block::new(3);
    pub const SAND: Block = Block::new(4);
    pub const SNOW: Block = Block::new(5);
    pub const WATER: Block = Block::new(6);
    pub const GLOWSTONE: Block = Block::new(7);
}

use blocks::*;

/// Heightmap terrain with a water table, generated once up front.
pub struct NoiseWorld {
    size_x: i32,
    size_z: i32,
    height: i32,
    water_level: i32,
    heights: Vec<i32>,
}

impl NoiseWorld {
    pub fn generate(cfg: &WorldConfig) -> Self {
        let mut noise = FastNoiseLite::with_seed(cfg.seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(0.02));

        let (size_x, size_z) = (cfg.size_x(), cfg.size_z());
        let min_h = (cfg.height as f32 * 0.15) as i32;
        let max_h = (cfg.height as f32 * 0.7) as i32;
        let mut heights = Vec::with_capacity((size_x * size_z) as usize);
        for z in 0..size_z {
            for x in 0..size_x {
                let h = noise.get_noise_2d(x as f32, z as f32);
                // map [-1,1] -> [min_h, max_h]
                let hh = ((h + 1.0) * 0.5 * (max_h - min_h) as f32) as i32 + min_h;
                heights.push(hh.clamp(1, cfg.height - 1));
            }
        }
        Self {
            size_x,
            size_z,
            height: cfg.height,
            water_level: (cfg.height as f32 * 0.3) as i32,
            heights,
        }
    }

    /// Column height, or `None` outside the generated area.
    fn column(&self, x: i32, z: i32) -> Option<i32> {
        if x < 0 || z < 0 || x >= self.size_x || z >= self.size_z {
            return None;
        }
        Some(self.heights[(z * self.size_x + x) as usize])
    }

    fn is_solid(&self, pos: BlockPos) -> bool {
        let b = self.block_at(pos);
        !b.is_air() && b != WATER
    }

    fn surface(&self, pos: BlockPos, height: i32) -> Block {
        if (pos.x * 31 + pos.z * 17).rem_euclid(97) == 0 {
            GLOWSTONE
        } else if height as f32 >= self.height as f32 * 0.62 {
            SNOW
        } else if height <= self.water_level + 1 {
            SAND
        } else {
            GRASS
        }
    }
}

impl BlockView for NoiseWorld {
    fn block_at(&self, pos: BlockPos) -> Block {
        let Some(h) = self.column(pos.x, pos.z) else {
            return Block::AIR;
        };
        if pos.y < 0 {
            Block::AIR
        } else if pos.y == h - 1 {
            self.surface(pos, h)
        } else if pos.y < h - 1 {
            if pos.y + 3 >= h { DIRT } else { STONE }
        } else if pos.y < self.water_level {
            WATER
        } else {
            Block::AIR
        }
    }

    fn light_level(&self, pos: BlockPos) -> u32 {
        if self.is_solid(pos) {
            return 0;
        }
        let depth = (self.water_level - pos.y).max(0);
        match self.column(pos.x, pos.z) {
            Some(h) if pos.y >= h => pack(0, (15 - depth.min(15)) as u8),
            Some(_) => 0,
            None => pack(0, 15),
        }
    }

    fn is_fully_occluding(&self, pos: BlockPos, face: Face) -> bool {
        let n = pos.offset(face);
        self.is_solid(n) || (self.block_at(n) == WATER && self.block_at(pos) == WATER)
    }

    fn is_full_cube(&self, pos: BlockPos) -> bool {
        self.is_solid(pos)
    }

    fn is_opaque_full_cube(&self, pos: BlockPos) -> bool {
        self.is_solid(pos)
    }

    fn luminance(&self, pos: BlockPos) -> u8 {
        if self.block_at(pos) == GLOWSTONE { 15 } else { 0 }
    }

    fn default_layer(&self, block: Block) -> RenderLayer {
        if block == WATER { RenderLayer::Translucent } else { RenderLayer::Solid }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> NoiseWorld {
        NoiseWorld::generate(&WorldConfig {
            chunks_x: 2,
            chunks_z: 2,
            ..WorldConfig::default()
        })
    }

    #[test]
    fn columns_are_layered() {
        let w = world();
        for (x, z) in [(0, 0), (5, 9), (31, 31)] {
            let h = w.column(x, z).unwrap();
            assert!(w.block_at(BlockPos::new(x, 0, z)) != Block::AIR);
            assert!(w.is_solid(BlockPos::new(x, h - 1, z)));
            assert!(!w.is_solid(BlockPos::new(x, h, z)));
            assert_eq!(w.light_level(BlockPos::new(x, h - 1, z)), 0);
        }
    }

    #[test]
    fn outside_is_open_sky() {
        let w = world();
        let p = BlockPos::new(-1, 10, 0);
        assert_eq!(w.block_at(p), Block::AIR);
        assert_eq!(w.light_level(p), pack(0, 15));
        assert!(!w.is_fully_occluding(BlockPos::new(0, 10, 0), Face::NegX));
    }
}
