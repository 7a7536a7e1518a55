use hashbrown::HashMap;
use indigo_geom::BlockPos;
use indigo_quad::light::with_min_block;

use crate::view::BlockView;

/// Packed light at `pos`, with the block channel raised to the block's own luminance.
#[inline]
pub fn world_brightness(view: &dyn BlockView, pos: BlockPos) -> u32 {
    with_min_block(view.light_level(pos), view.luminance(pos))
}

/// Occlusion factor of the block at `pos`: 0.2 for opaque full cubes, else 1.0.
#[inline]
pub fn ao_level(view: &dyn BlockView, pos: BlockPos, fix_luminous_occlusion: bool) -> f32 {
    if fix_luminous_occlusion && view.luminance(pos) > 0 {
        return 1.0;
    }
    if view.is_opaque_full_cube(pos) { 0.2 } else { 1.0 }
}

/// Source of per-position brightness and AO levels for the AO calculator.
pub trait LightSampler {
    fn brightness(&mut self, view: &dyn BlockView, pos: BlockPos) -> u32;
    fn ao_level(&mut self, view: &dyn BlockView, pos: BlockPos) -> f32;
}

/// Queries the world on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectSampler {
    pub fix_luminous_occlusion: bool,
}

impl DirectSampler {
    pub fn new(fix_luminous_occlusion: bool) -> Self {
        Self {
            fix_luminous_occlusion,
        }
    }
}

impl LightSampler for DirectSampler {
    #[inline]
    fn brightness(&mut self, view: &dyn BlockView, pos: BlockPos) -> u32 {
        world_brightness(view, pos)
    }

    #[inline]
    fn ao_level(&mut self, view: &dyn BlockView, pos: BlockPos) -> f32 {
        ao_level(view, pos, self.fix_luminous_occlusion)
    }
}

/// Memoizes brightness and AO level per position for one chunk rebuild.
///
/// Entries are keyed by `BlockPos::as_key`, so positions must stay within
/// |x|, |z| < 2^25 and |y| < 2^11; `clear` must run before the next rebuild
/// reuses the cache.
#[derive(Debug, Default)]
pub struct LightCache {
    brightness: HashMap<i64, u32>,
    ao_level: HashMap<i64, f32>,
    fix_luminous_occlusion: bool,
}

impl LightCache {
    pub fn new(fix_luminous_occlusion: bool) -> Self {
        Self {
            brightness: HashMap::new(),
            ao_level: HashMap::new(),
            fix_luminous_occlusion,
        }
    }

    pub fn clear(&mut self) {
        self.brightness.clear();
        self.ao_level.clear();
    }

    pub fn len(&self) -> usize {
        self.brightness.len() + self.ao_level.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brightness.is_empty() && self.ao_level.is_empty()
    }
}

impl LightSampler for LightCache {
    fn brightness(&mut self, view: &dyn BlockView, pos: BlockPos) -> u32 {
        let key = pos.as_key();
        match self.brightness.get(&key) {
            Some(&v) => v,
            None => {
                let v = world_brightness(view, pos);
                self.brightness.insert(key, v);
                v
            }
        }
    }

    fn ao_level(&mut self, view: &dyn BlockView, pos: BlockPos) -> f32 {
        let key = pos.as_key();
        match self.ao_level.get(&key) {
            Some(&v) => v,
            None => {
                let v = ao_level(view, pos, self.fix_luminous_occlusion);
                self.ao_level.insert(key, v);
                v
            }
        }
    }
}
