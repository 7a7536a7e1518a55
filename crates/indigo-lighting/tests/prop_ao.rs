use indigo_geom::{BlockPos, Face};
use indigo_lighting::{AoCalculator, AoMode, Block, BlockView, LightCache, LightingConfig};
use indigo_quad::MutableQuadView;
use proptest::prelude::*;

// 3x3x3 neighborhood around the origin: bit i of `solid` marks cell i opaque.
struct Neighborhood {
    solid: u32,
    light: Vec<u32>,
}

impl Neighborhood {
    fn cell(pos: BlockPos) -> Option<usize> {
        let (x, y, z) = (pos.x + 1, pos.y + 1, pos.z + 1);
        if (0..3).contains(&x) && (0..3).contains(&y) && (0..3).contains(&z) {
            Some((y * 9 + z * 3 + x) as usize)
        } else {
            None
        }
    }

    fn is_solid(&self, pos: BlockPos) -> bool {
        Self::cell(pos).is_some_and(|i| self.solid & (1 << i) != 0)
    }
}

impl BlockView for Neighborhood {
    fn block_at(&self, pos: BlockPos) -> Block {
        if self.is_solid(pos) { Block::new(1) } else { Block::AIR }
    }

    fn light_level(&self, pos: BlockPos) -> u32 {
        match Self::cell(pos) {
            Some(i) if !self.is_solid(pos) => self.light[i],
            Some(_) => 0,
            None => 0x00F0_0000,
        }
    }

    fn is_fully_occluding(&self, pos: BlockPos, face: Face) -> bool {
        self.is_solid(pos.offset(face))
    }

    fn is_full_cube(&self, pos: BlockPos) -> bool {
        self.is_solid(pos)
    }

    fn is_opaque_full_cube(&self, pos: BlockPos) -> bool {
        self.is_solid(pos)
    }
}

fn packed_light() -> impl Strategy<Value = u32> {
    (0u32..=15, 0u32..=15).prop_map(|(b, s)| (s << 4) << 16 | b << 4)
}

fn mode() -> impl Strategy<Value = AoMode> {
    prop_oneof![Just(AoMode::Emulate), Just(AoMode::Hybrid), Just(AoMode::Enhanced)]
}

proptest! {
    #[test]
    fn ao_and_light_stay_in_range(
        solid in any::<u32>(),
        light in proptest::collection::vec(packed_light(), 27),
        coords in proptest::collection::vec(0.0f32..=1.0, 12),
        mode in mode(),
        fix_mean in any::<bool>(),
        fix_offset in any::<bool>(),
    ) {
        let world = Neighborhood { solid: solid & ((1 << 27) - 1), light };
        let config = LightingConfig {
            ao_mode: mode,
            fix_mean_light_calculation: fix_mean,
            fix_smooth_lighting_offset: fix_offset,
            ..LightingConfig::default()
        };
        let mut calc = AoCalculator::new(config);
        let mut cache = LightCache::new(false);

        let mut quads = Vec::new();
        for face in Face::ALL {
            let mut q = MutableQuadView::new();
            q.square(face, coords[0] * 0.5, coords[1] * 0.5, 0.5 + coords[2] * 0.5, 0.5 + coords[3] * 0.5, coords[4] * 0.9);
            q.compute_geometry();
            quads.push(q);
        }
        let mut free = MutableQuadView::new();
        for i in 0..4 {
            free.set_pos(i, coords[i * 3], coords[i * 3 + 1], coords[i * 3 + 2]);
        }
        free.compute_geometry();
        quads.push(free);

        for q in &quads {
            for vanilla in [true, false] {
                calc.clear();
                calc.compute(&world, &mut cache, BlockPos::ORIGIN, q, vanilla);
                for i in 0..4 {
                    let ao = calc.ao()[i];
                    let l = calc.light()[i];
                    prop_assert!((0.0..=1.0 + 1e-5).contains(&ao), "ao {}", ao);
                    prop_assert!(l & 0xFFFF <= 0xF0, "block {:#x}", l);
                    prop_assert!(l >> 16 <= 0xF0, "sky {:#x}", l);
                }
            }
        }
    }
}
