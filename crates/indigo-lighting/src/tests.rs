use super::*;
use indigo_geom::{BlockPos, Face, Vec3};
use indigo_quad::light::{FULL_BRIGHTNESS, pack};
use indigo_quad::{MaterialFinder, MutableQuadView};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct TestWorld {
    solid: HashSet<BlockPos>,
    light: HashMap<BlockPos, u32>,
    luminous: HashMap<BlockPos, u8>,
    ambient: u32,
    light_queries: AtomicUsize,
    occlusion_queries: AtomicUsize,
}

impl TestWorld {
    fn open_sky() -> Self {
        Self {
            ambient: pack(0, 15),
            ..Self::default()
        }
    }

    fn with_solid(mut self, positions: impl IntoIterator<Item = BlockPos>) -> Self {
        self.solid.extend(positions);
        self
    }

    fn light_queries(&self) -> usize {
        self.light_queries.load(Ordering::Relaxed)
    }
}

impl BlockView for TestWorld {
    fn block_at(&self, pos: BlockPos) -> Block {
        if self.solid.contains(&pos) { Block::new(1) } else { Block::AIR }
    }

    fn light_level(&self, pos: BlockPos) -> u32 {
        self.light_queries.fetch_add(1, Ordering::Relaxed);
        if let Some(&l) = self.light.get(&pos) {
            return l;
        }
        if self.solid.contains(&pos) { 0 } else { self.ambient }
    }

    fn is_fully_occluding(&self, pos: BlockPos, face: Face) -> bool {
        self.occlusion_queries.fetch_add(1, Ordering::Relaxed);
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
}

fn cube(center: BlockPos) -> impl Iterator<Item = BlockPos> {
    (-1..=1).flat_map(move |dx| {
        (-1..=1).flat_map(move |dy| (-1..=1).map(move |dz| center.add(dx, dy, dz)))
    })
}

fn face_quad(face: Face, depth: f32) -> MutableQuadView {
    let mut q = MutableQuadView::new();
    q.square(face, 0.0, 0.0, 1.0, 1.0, depth).compute_geometry();
    q
}

fn emulate() -> LightingConfig {
    LightingConfig {
        ao_mode: AoMode::Emulate,
        ..LightingConfig::default()
    }
}

#[test]
fn enclosed_block_is_dark_in_both_paths() {
    let origin = BlockPos::new(4, 20, -7);
    let world = TestWorld::open_sky().with_solid(cube(origin));
    for config in [emulate(), LightingConfig { ao_mode: AoMode::Enhanced, ..emulate() }] {
        let mut calc = AoCalculator::new(config);
        let mut sampler = DirectSampler::default();
        for face in Face::ALL {
            let q = face_quad(face, 0.0);
            calc.clear();
            calc.compute(&world, &mut sampler, origin, &q, true);
            assert_eq!(calc.light(), [0; 4], "{face:?}");
            assert_eq!(flat_brightness(&world, &mut sampler, &q, origin), 0, "{face:?}");
        }
    }
}

#[test]
fn open_sky_top_face_is_fully_lit() {
    let origin = BlockPos::new(0, 10, 0);
    let world = TestWorld::open_sky().with_solid([origin]);
    let mut calc = AoCalculator::new(emulate());
    calc.compute(&world, &mut DirectSampler::default(), origin, &face_quad(Face::PosY, 0.0), true);
    assert_eq!(calc.ao(), [1.0; 4]);
    assert_eq!(calc.light(), [0x00F0_0000; 4]);
}

#[test]
fn neighbor_darkens_adjacent_corners() {
    let origin = BlockPos::new(0, 10, 0);
    let world = TestWorld::open_sky().with_solid([origin, origin.add(1, 1, 0)]);
    let mut calc = AoCalculator::new(emulate());
    calc.compute(&world, &mut DirectSampler::default(), origin, &face_quad(Face::PosY, 0.0), true);
    let ao = calc.ao();
    // Vertices 2 and 3 sit on the east edge of the top face.
    assert_eq!(ao[0], 1.0);
    assert_eq!(ao[1], 1.0);
    assert!((ao[2] - 0.8).abs() < 1e-6, "{ao:?}");
    assert!((ao[3] - 0.8).abs() < 1e-6, "{ao:?}");
    // The opaque neighbor has no light; the fixed mean ignores it.
    assert_eq!(calc.light()[2], 0x00F0_0000);
}

#[test]
fn vanilla_mean_lets_dark_neighbor_through_center() {
    let origin = BlockPos::new(0, 10, 0);
    let mut world = TestWorld::open_sky().with_solid([origin, origin.add(1, 1, 0)]);
    world.light.insert(origin.add(0, 1, 0), pack(0, 8));
    let config = LightingConfig {
        fix_mean_light_calculation: false,
        ..emulate()
    };
    let mut calc = AoCalculator::new(config);
    calc.compute(&world, &mut DirectSampler::default(), origin, &face_quad(Face::PosY, 0.0), true);
    // East edge sample is 0 and replaced by the center (sky 8).
    // (240 + 128 + 240 + 128) / 4 = 184 -> 0xB8
    assert_eq!(calc.light()[2], 0x00B8_0000);
}

#[test]
fn enhanced_matches_emulated_on_full_faces() {
    let origin = BlockPos::new(0, 10, 0);
    let mut world = TestWorld::open_sky().with_solid([origin, origin.add(1, 1, 0), origin.add(-1, 0, 1)]);
    world.light.insert(origin.add(0, 1, 1), pack(6, 12));
    for face in Face::ALL {
        let q = face_quad(face, 0.0);
        let mut a = AoCalculator::new(emulate());
        let mut b = AoCalculator::new(LightingConfig {
            ao_mode: AoMode::Enhanced,
            ..emulate()
        });
        a.compute(&world, &mut DirectSampler::default(), origin, &q, false);
        b.compute(&world, &mut DirectSampler::default(), origin, &q, false);
        for i in 0..4 {
            assert!((a.ao()[i] - b.ao()[i]).abs() < 1e-5, "{face:?} {i}");
        }
        assert_eq!(a.light(), b.light(), "{face:?}");
    }
}

#[test]
fn hybrid_routes_by_model_kind() {
    // An inset quad on a non-full block: vanilla sampling treats it as on
    // the inner cell, enhanced blends the two cells by depth.
    let origin = BlockPos::new(0, 10, 0);
    let mut world = TestWorld::open_sky();
    for face in [Face::PosX, Face::NegX, Face::PosZ, Face::NegZ] {
        world.light.insert(origin.offset(face), pack(0, 4));
    }
    let q = face_quad(Face::PosY, 0.5);
    let mut calc = AoCalculator::new(LightingConfig::default());
    calc.compute(&world, &mut DirectSampler::default(), origin, &q, true);
    let vanilla = calc.light();
    calc.clear();
    calc.compute(&world, &mut DirectSampler::default(), origin, &q, false);
    let enhanced = calc.light();
    // (0x40 + 0x40 + 0xF0 + 0xF0) / 4
    assert_eq!(vanilla, [0x0098_0000; 4]);
    assert_ne!(vanilla, enhanced);
}

#[test]
fn unshaded_quads_skip_directional_shade() {
    let origin = BlockPos::new(0, 10, 0);
    let world = TestWorld::open_sky().with_solid([origin]);
    let mut q = face_quad(Face::NegX, 0.0);
    let mut calc = AoCalculator::new(emulate());
    calc.compute(&world, &mut DirectSampler::default(), origin, &q, true);
    assert!((calc.ao()[0] - 0.6).abs() < 1e-6);

    q.set_material(MaterialFinder::new().disable_diffuse(true).find());
    calc.clear();
    calc.compute(&world, &mut DirectSampler::default(), origin, &q, true);
    assert_eq!(calc.ao(), [1.0; 4]);
}

#[test]
fn sloped_quad_takes_irregular_path() {
    let origin = BlockPos::new(0, 10, 0);
    let world = TestWorld::open_sky();
    let mut q = MutableQuadView::new();
    q.set_pos(0, 0.0, 1.0, 0.0)
        .set_pos(1, 0.0, 0.0, 1.0)
        .set_pos(2, 1.0, 0.0, 1.0)
        .set_pos(3, 1.0, 1.0, 0.0)
        .compute_geometry();
    let mut calc = AoCalculator::new(LightingConfig {
        ao_mode: AoMode::Enhanced,
        ..LightingConfig::default()
    });
    calc.compute(&world, &mut DirectSampler::default(), origin, &q, false);
    // Squared components of the packed diagonal normal sum to just under 1,
    // so the sky channel truncates one step below full.
    for i in 0..4 {
        assert_eq!(calc.light()[i], 0x00E0_0000);
        assert!(calc.ao()[i] > 0.9 && calc.ao()[i] < 1.0, "{:?}", calc.ao());
    }
}

#[test]
fn light_cache_queries_world_once_per_rebuild() {
    let world = TestWorld::open_sky();
    let pos = BlockPos::new(3, 70, 3);
    let mut cache = LightCache::new(false);

    assert_eq!(cache.brightness(&world, pos), 0x00F0_0000);
    assert_eq!(cache.brightness(&world, pos), 0x00F0_0000);
    assert_eq!(world.light_queries(), 1);

    cache.clear();
    assert!(cache.is_empty());
    cache.brightness(&world, pos);
    assert_eq!(world.light_queries(), 2);
}

#[test]
fn flat_brightness_reads_through_the_cache() {
    let world = TestWorld::open_sky().with_solid([BlockPos::new(0, 0, 0), BlockPos::new(2, 0, 0)]);
    let mut cache = LightCache::new(false);
    // Facing sides of two blocks share the air cell between them.
    let east = face_quad(Face::PosX, 0.0);
    let west = face_quad(Face::NegX, 0.0);
    assert_eq!(flat_brightness(&world, &mut cache, &east, BlockPos::new(0, 0, 0)), pack(0, 15));
    assert_eq!(flat_brightness(&world, &mut cache, &west, BlockPos::new(2, 0, 0)), pack(0, 15));
    assert_eq!(world.light_queries(), 1);
}

#[test]
fn direct_sampler_always_queries() {
    let world = TestWorld::open_sky();
    let pos = BlockPos::new(3, 70, 3);
    let mut direct = DirectSampler::default();
    direct.brightness(&world, pos);
    direct.brightness(&world, pos);
    assert_eq!(world.light_queries(), 2);
}

#[test]
fn luminance_floors_brightness_and_lifts_occlusion() {
    let pos = BlockPos::new(0, 0, 0);
    let mut world = TestWorld::default().with_solid([pos]);
    world.luminous.insert(pos, 10);
    assert_eq!(world_brightness(&world, pos), 0x00A0);
    assert_eq!(ao_level(&world, pos, false), 0.2);
    assert_eq!(ao_level(&world, pos, true), 1.0);
}

#[test]
fn cull_cache_is_order_independent() {
    let origin = BlockPos::new(0, 0, 0);
    let world = TestWorld::default().with_solid([origin.offset(Face::NegZ)]);
    let mut info = BlockRenderInfo::new(true, true);
    info.prepare_for_block(&world, origin, Block::new(1), true);

    let north = info.should_draw_face(&world, Some(Face::NegZ));
    let south = info.should_draw_face(&world, Some(Face::PosZ));
    let north_again = info.should_draw_face(&world, Some(Face::NegZ));
    assert!(!north);
    assert!(south);
    assert_eq!(north, north_again);
    assert_eq!(world.occlusion_queries.load(Ordering::Relaxed), 2);

    // Next block starts with an empty cache.
    info.prepare_for_block(&world, origin.add(0, 0, -2), Block::new(1), true);
    assert!(info.should_draw_face(&world, Some(Face::NegZ)));
    assert_eq!(world.occlusion_queries.load(Ordering::Relaxed), 3);
}

#[test]
fn culling_disabled_or_absent_face_always_draws() {
    let origin = BlockPos::new(0, 0, 0);
    let world = TestWorld::default().with_solid(cube(origin));
    let mut info = BlockRenderInfo::new(true, false);
    info.prepare_for_block(&world, origin, Block::new(1), true);
    assert!(info.should_draw_face(&world, Some(Face::PosY)));
    let mut info = BlockRenderInfo::new(true, true);
    info.prepare_for_block(&world, origin, Block::new(1), true);
    assert!(info.should_draw_face(&world, None));
    assert!(!info.should_draw_face(&world, Some(Face::PosY)));
}

#[test]
fn default_ao_requires_all_three_inputs() {
    let pos = BlockPos::new(0, 0, 0);
    let mut world = TestWorld::default();
    let mut info = BlockRenderInfo::new(true, true);
    info.prepare_for_block(&world, pos, Block::new(1), true);
    assert!(info.default_ao);
    info.prepare_for_block(&world, pos, Block::new(1), false);
    assert!(!info.default_ao);
    world.luminous.insert(pos, 3);
    info.prepare_for_block(&world, pos, Block::new(1), true);
    assert!(!info.default_ao);
    let mut off = BlockRenderInfo::new(false, true);
    off.prepare_for_block(&world, BlockPos::new(1, 0, 0), Block::new(1), true);
    assert!(!off.default_ao);
}

#[test]
fn flat_brightness_neighbor_rule() {
    let origin = BlockPos::new(0, 10, 0);
    let mut world = TestWorld::default();
    world.light.insert(origin, pack(2, 0));
    world.light.insert(origin.offset(Face::PosY), pack(9, 0));
    world.light.insert(origin.offset(Face::NegX), pack(5, 0));

    // Cull face wins.
    let mut q = face_quad(Face::PosY, 0.0);
    assert_eq!(flat_brightness(&world, &mut DirectSampler::default(), &q, origin), pack(9, 0));
    q.set_cull_face(Some(Face::NegX));
    assert_eq!(flat_brightness(&world, &mut DirectSampler::default(), &q, origin), pack(5, 0));

    // Inset slab top on a non-full block samples its own cell.
    let slab = face_quad(Face::PosY, 0.5);
    assert_eq!(flat_brightness(&world, &mut DirectSampler::default(), &slab, origin), pack(2, 0));

    // The same quad on a full cube samples across the light face.
    let world = TestWorld {
        light: world.light.clone(),
        ..TestWorld::default()
    }
    .with_solid([origin]);
    assert_eq!(flat_brightness(&world, &mut DirectSampler::default(), &slab, origin), pack(9, 0));
}

#[test]
fn flat_brightness_is_floored_by_own_luminance() {
    let origin = BlockPos::new(0, 10, 0);
    let mut world = TestWorld::default();
    world.luminous.insert(origin, 15);
    let q = face_quad(Face::PosY, 0.0);
    assert_eq!(flat_brightness(&world, &mut DirectSampler::default(), &q, origin), 0x00F0);
    assert_ne!(flat_brightness(&world, &mut DirectSampler::default(), &q, origin), FULL_BRIGHTNESS);
}

#[test]
fn diffuse_shade_blends_by_normal() {
    let world = TestWorld::default();
    assert_eq!(normal_shade(&world, Vec3::UP, true), 1.0);
    assert_eq!(normal_shade(&world, Vec3::new(-1.0, 0.0, 0.0), true), 0.6);
    let s = normal_shade(&world, Vec3::new(0.6, 0.8, 0.0), true);
    assert!((s - (0.36 + 0.8) / 1.4).abs() < 1e-6);
    assert_eq!(normal_shade(&world, Vec3::new(0.0, -1.0, 0.0), false), 1.0);
    assert_eq!(normal_shade(&world, Vec3::ZERO, true), 1.0);

    let q = face_quad(Face::NegY, 0.0);
    assert_eq!(flat_shade(&world, &q, true), [0.5; 4]);
    let mut bent = face_quad(Face::NegY, 0.0);
    bent.set_normal(1, 0.0, 1.0, 0.0);
    let shades = flat_shade(&world, &bent, true);
    assert_eq!(shades[1], 1.0);
    assert_eq!(shades[0], 0.5);
}

#[test]
fn lighting_config_reads_toml() {
    let cfg: LightingConfig = toml::from_str("ao_mode = \"enhanced\"\nfix_luminous_occlusion = true\n").unwrap();
    assert_eq!(cfg.ao_mode, AoMode::Enhanced);
    assert!(cfg.fix_luminous_occlusion);
    assert!(cfg.fix_smooth_lighting_offset);
}
