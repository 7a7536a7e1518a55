use indigo_geom::{Axis, BlockPos, Face, approx_eq};
use indigo_quad::QuadView;
use indigo_quad::geometry::{AXIS_ALIGNED_FLAG, CUBIC_FLAG, LIGHT_FACE_FLAG};

use crate::ao_data::AoFaceData;
use crate::ao_face::ao_face;
use crate::config::{AoMode, LightingConfig};
use crate::sampler::LightSampler;
use crate::view::BlockView;

// Edge neighbor pairs meeting at each face corner.
const CORNERS: [(usize, usize); 4] = [(0, 2), (0, 3), (1, 2), (1, 3)];

struct Probe<'a> {
    view: &'a dyn BlockView,
    sampler: &'a mut dyn LightSampler,
    pos: BlockPos,
}

impl Probe<'_> {
    #[inline]
    fn brightness(&mut self, p: BlockPos) -> u32 {
        self.sampler.brightness(self.view, p)
    }

    #[inline]
    fn ao_level(&mut self, p: BlockPos) -> f32 {
        self.sampler.ao_level(self.view, p)
    }

    #[inline]
    fn is_clear(&self, p: BlockPos) -> bool {
        !self.view.blocks_vision(p) || self.view.opacity(p) == 0
    }
}

/// Smooth lighting for one block at a time.
///
/// `compute` fills per-vertex AO factors and lightmaps for a quad. Face
/// samples are memoized in 24 slots (face x on-face x shaded) until
/// `clear`, which must run before moving to another block.
pub struct AoCalculator {
    config: LightingConfig,
    face_data: [AoFaceData; 24],
    completion: u32,
    ao: [f32; 4],
    light: [u32; 4],
}

impl AoCalculator {
    pub fn new(config: LightingConfig) -> Self {
        Self {
            config,
            face_data: [AoFaceData::default(); 24],
            completion: 0,
            ao: [1.0; 4],
            light: [0; 4],
        }
    }

    #[inline]
    pub fn config(&self) -> &LightingConfig {
        &self.config
    }

    /// Per-vertex AO factors from the last `compute`.
    #[inline]
    pub fn ao(&self) -> [f32; 4] {
        self.ao
    }

    /// Per-vertex packed lightmaps from the last `compute`.
    #[inline]
    pub fn light(&self) -> [u32; 4] {
        self.light
    }

    /// Forgets memoized face samples.
    #[inline]
    pub fn clear(&mut self) {
        self.completion = 0;
    }

    pub fn compute(
        &mut self,
        view: &dyn BlockView,
        sampler: &mut dyn LightSampler,
        pos: BlockPos,
        quad: &dyn QuadView,
        is_vanilla: bool,
    ) {
        let mut probe = Probe { view, sampler, pos };
        let shade = !quad.material().disable_diffuse();
        match self.config.ao_mode {
            AoMode::Emulate => self.calc_fast_vanilla(&mut probe, quad, shade),
            AoMode::Hybrid if is_vanilla => self.calc_fast_vanilla(&mut probe, quad, shade),
            AoMode::Hybrid | AoMode::Enhanced => self.calc_enhanced(&mut probe, quad, shade),
        }
    }

    fn calc_fast_vanilla(&mut self, probe: &mut Probe<'_>, quad: &dyn QuadView, shade: bool) {
        let mut flags = quad.geometry_flags();
        // Axis aligned quads on full cubes light like the block face.
        if flags & LIGHT_FACE_FLAG == 0
            && flags & AXIS_ALIGNED_FLAG != 0
            && probe.view.is_full_cube(probe.pos)
        {
            flags |= LIGHT_FACE_FLAG;
        }
        let on_face = flags & LIGHT_FACE_FLAG != 0;
        if flags & CUBIC_FLAG == 0 {
            self.vanilla_partial_face(probe, quad, quad.light_face(), on_face, shade);
        } else {
            self.vanilla_full_face(probe, quad.light_face(), on_face, shade);
        }
    }

    fn calc_enhanced(&mut self, probe: &mut Probe<'_>, quad: &dyn QuadView, shade: bool) {
        let flags = quad.geometry_flags();
        if flags & AXIS_ALIGNED_FLAG == 0 {
            self.irregular_face(probe, quad, shade);
        } else if flags & LIGHT_FACE_FLAG != 0 {
            self.vanilla_partial_face(probe, quad, quad.light_face(), true, shade);
        } else {
            self.blended_partial_face(probe, quad, quad.light_face(), shade);
        }
    }

    fn vanilla_full_face(&mut self, probe: &mut Probe<'_>, face: Face, on_face: bool, shade: bool) {
        let fd = self.compute_face(probe, face, on_face, shade);
        fd.to_array(&mut self.ao, &mut self.light, &ao_face(face).vertex_map);
    }

    fn vanilla_partial_face(
        &mut self,
        probe: &mut Probe<'_>,
        quad: &dyn QuadView,
        face: Face,
        on_face: bool,
        shade: bool,
    ) {
        let fd = self.compute_face(probe, face, on_face, shade);
        self.interpolate(&fd, quad, face);
    }

    fn blended_partial_face(&mut self, probe: &mut Probe<'_>, quad: &dyn QuadView, face: Face, shade: bool) {
        let fd = self.blended_inset_face(probe, quad, 0, face, shade);
        self.interpolate(&fd, quad, face);
    }

    fn interpolate(&mut self, fd: &AoFaceData, quad: &dyn QuadView, face: Face) {
        let weights = ao_face(face).weights;
        let mut w = [0.0; 4];
        for i in 0..4 {
            weights(quad, i, &mut w);
            self.light[i] = fd.weighted_combined_light(&w);
            self.ao[i] = fd.weighted_ao(&w);
        }
    }

    // Linear blend of the on-face and inset samples by the vertex depth.
    fn blended_inset_face(
        &mut self,
        probe: &mut Probe<'_>,
        quad: &dyn QuadView,
        vertex: usize,
        face: Face,
        shade: bool,
    ) -> AoFaceData {
        let w1 = (ao_face(face).depth)(quad, vertex);
        let w0 = 1.0 - w1;
        let outer = self.compute_face(probe, face, true, shade);
        let inner = self.compute_face(probe, face, false, shade);
        AoFaceData::weighted_mean(&outer, w0, &inner, w1)
    }

    // Same as blended_inset_face, skipping the blend at depth 0 or 1.
    fn gather_inset_face(
        &mut self,
        probe: &mut Probe<'_>,
        quad: &dyn QuadView,
        vertex: usize,
        face: Face,
        shade: bool,
    ) -> AoFaceData {
        let w1 = (ao_face(face).depth)(quad, vertex);
        if approx_eq(w1, 0.0) {
            self.compute_face(probe, face, true, shade)
        } else if approx_eq(w1, 1.0) {
            self.compute_face(probe, face, false, shade)
        } else {
            self.blended_inset_face(probe, quad, vertex, face, shade)
        }
    }

    fn irregular_face(&mut self, probe: &mut Probe<'_>, quad: &dyn QuadView, shade: bool) {
        let face_normal = quad.face_normal();
        let mut w = [0.0; 4];
        for i in 0..4 {
            let n = quad.normal(i).unwrap_or(face_normal);
            let mut ao = 0.0f32;
            let mut sky = 0.0f32;
            let mut block = 0.0f32;
            let mut max_ao = 0.0f32;
            let mut max_sky = 0u32;
            let mut max_block = 0u32;

            for axis in [Axis::X, Axis::Y, Axis::Z] {
                let c = n.axis(axis);
                if approx_eq(0.0, c) {
                    continue;
                }
                let face = Face::from_axis(axis, c > 0.0);
                let fd = self.gather_inset_face(probe, quad, i, face, shade);
                (ao_face(face).weights)(quad, i, &mut w);
                let sq = c * c;
                let a = fd.weighted_ao(&w);
                let s = fd.weighted_sky_light(&w);
                let b = fd.weighted_block_light(&w);
                ao += sq * a;
                sky += sq * s as f32;
                block += sq * b as f32;
                if axis == Axis::X {
                    max_ao = a;
                    max_sky = s;
                    max_block = b;
                } else {
                    max_ao = fd.max_ao(max_ao);
                    max_sky = fd.max_sky_light(max_sky);
                    max_block = fd.max_block_light(max_block);
                }
            }

            self.ao[i] = (ao + max_ao) * 0.5;
            let sky = ((sky + max_sky as f32) * 0.5) as u32 & 0xF0;
            let block = ((block + max_block as f32) * 0.5) as u32 & 0xF0;
            self.light[i] = sky << 16 | block;
        }
    }

    fn compute_face(&mut self, probe: &mut Probe<'_>, face: Face, on_face: bool, shade: bool) -> AoFaceData {
        let id = face.index();
        let slot = match (shade, on_face) {
            (true, true) => id,
            (true, false) => id + 6,
            (false, true) => id + 12,
            (false, false) => id + 18,
        };
        let mask = 1u32 << slot;
        if self.completion & mask == 0 {
            self.completion |= mask;
            self.face_data[slot] = self.sample_face(probe, face, on_face, shade);
        }
        self.face_data[slot]
    }

    fn sample_face(&self, probe: &mut Probe<'_>, face: Face, on_face: bool, shade: bool) -> AoFaceData {
        let pos = probe.pos;
        let light_pos = if on_face { pos.offset(face) } else { pos };
        let table = ao_face(face);

        let mut light = [0u32; 4];
        let mut ao = [0.0f32; 4];
        let mut clear = [false; 4];
        for (k, &n) in table.neighbors.iter().enumerate() {
            let p = light_pos.offset(n);
            light[k] = probe.brightness(p);
            ao[k] = probe.ao_level(p);
            let clear_pos = if self.config.fix_smooth_lighting_offset {
                p
            } else {
                p.offset(face)
            };
            clear[k] = probe.is_clear(clear_pos);
        }

        // Both edges opaque: reuse the first edge. Otherwise look at the diagonal.
        let mut c_light = [0u32; 4];
        let mut c_ao = [0.0f32; 4];
        for (c, &(a, b)) in CORNERS.iter().enumerate() {
            if !clear[a] && !clear[b] {
                c_ao[c] = ao[a];
                c_light[c] = light[a];
            } else {
                let p = light_pos.offset(table.neighbors[a]).offset(table.neighbors[b]);
                c_ao[c] = probe.ao_level(p);
                c_light[c] = probe.brightness(p);
            }
        }

        let across = pos.offset(face);
        let light_center = if on_face || !probe.view.is_opaque_full_cube(across) {
            probe.brightness(across)
        } else {
            probe.brightness(pos)
        };
        let ao_center = probe.ao_level(light_pos);
        let wb = if shade {
            probe.view.directional_shade(face, true)
        } else {
            1.0
        };

        let fix = self.config.fix_mean_light_calculation;
        AoFaceData::new(
            [
                (ao[3] + ao[0] + c_ao[1] + ao_center) * 0.25 * wb,
                (ao[2] + ao[0] + c_ao[0] + ao_center) * 0.25 * wb,
                (ao[2] + ao[1] + c_ao[2] + ao_center) * 0.25 * wb,
                (ao[3] + ao[1] + c_ao[3] + ao_center) * 0.25 * wb,
            ],
            [
                mean_brightness(light[3], light[0], c_light[1], light_center, fix),
                mean_brightness(light[2], light[0], c_light[0], light_center, fix),
                mean_brightness(light[2], light[1], c_light[2], light_center, fix),
                mean_brightness(light[3], light[1], c_light[3], light_center, fix),
            ],
        )
    }
}

/// Mean of four packed lights. `d` is the center sample.
///
/// Zero samples would drag the mean down; the vanilla rule substitutes the
/// center, the fixed rule raises every sample to the non-zero minimum.
pub(crate) fn mean_brightness(a: u32, b: u32, c: u32, d: u32, fix: bool) -> u32 {
    if fix {
        if a == 0 || b == 0 || c == 0 || d == 0 {
            mean_edge_brightness(a, b, c, d)
        } else {
            mean_inner_brightness(a, b, c, d)
        }
    } else {
        let a = if a == 0 { d } else { a };
        let b = if b == 0 { d } else { b };
        let c = if c == 0 { d } else { c };
        mean_inner_brightness(a, b, c, d)
    }
}

#[inline]
fn mean_inner_brightness(a: u32, b: u32, c: u32, d: u32) -> u32 {
    (a + b + c + d) >> 2 & 0x00FF_00FF
}

#[inline]
fn non_zero_min(a: u32, b: u32) -> u32 {
    if a == 0 {
        b
    } else if b == 0 {
        a
    } else {
        a.min(b)
    }
}

fn mean_edge_brightness(a: u32, b: u32, c: u32, d: u32) -> u32 {
    let min = non_zero_min(non_zero_min(a, b), non_zero_min(c, d));
    mean_inner_brightness(a.max(min), b.max(min), c.max(min), d.max(min))
}
