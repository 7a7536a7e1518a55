//! Flat (unsmoothed) lighting: diffuse shade and single-sample brightness.

use indigo_geom::{BlockPos, Face, Vec3};
use indigo_quad::QuadView;
use indigo_quad::geometry::{AXIS_ALIGNED_FLAG, LIGHT_FACE_FLAG};
use indigo_quad::light::with_min_block;

use crate::sampler::LightSampler;
use crate::view::BlockView;

/// Directional shade blended by the absolute normal components.
pub fn normal_shade(view: &dyn BlockView, n: Vec3, shaded: bool) -> f32 {
    let mut sum = 0.0;
    let mut div = 0.0;
    let mut add = |c: f32, pos: Face, neg: Face| {
        if c > 0.0 {
            sum += c * view.directional_shade(pos, shaded);
            div += c;
        } else if c < 0.0 {
            sum -= c * view.directional_shade(neg, shaded);
            div -= c;
        }
    };
    add(n.x, Face::PosX, Face::NegX);
    add(n.y, Face::PosY, Face::NegY);
    add(n.z, Face::PosZ, Face::NegZ);
    if div == 0.0 { 1.0 } else { sum / div }
}

/// Per-vertex diffuse factors for flat shading.
///
/// Axis aligned quads without vertex normals take the light face's shade.
/// Everything else blends by the vertex normal, or the face normal.
pub fn flat_shade<Q: QuadView + ?Sized>(view: &dyn BlockView, quad: &Q, shaded: bool) -> [f32; 4] {
    let aligned = quad.geometry_flags() & AXIS_ALIGNED_FLAG != 0;
    if aligned && !quad.has_vertex_normals() {
        let s = view.directional_shade(quad.light_face(), shaded);
        return [s; 4];
    }
    let face_normal = quad.face_normal();
    let face_shade = normal_shade(view, face_normal, shaded);
    let mut out = [face_shade; 4];
    for (i, slot) in out.iter_mut().enumerate() {
        if let Some(n) = quad.normal(i) {
            *slot = normal_shade(view, n, shaded);
        }
    }
    out
}

/// Single brightness sample for a flat-lit quad on the block at `pos`, read
/// through `sampler`.
///
/// Samples across the cull face if there is one; otherwise across the light
/// face when the quad lies on it, or is axis aligned on a full cube;
/// otherwise at `pos` itself. The block's own luminance floors the result.
pub fn flat_brightness<Q: QuadView + ?Sized>(
    view: &dyn BlockView,
    sampler: &mut dyn LightSampler,
    quad: &Q,
    pos: BlockPos,
) -> u32 {
    let sample = match quad.cull_face() {
        Some(face) => pos.offset(face),
        None => {
            let flags = quad.geometry_flags();
            if flags & LIGHT_FACE_FLAG != 0
                || (flags & AXIS_ALIGNED_FLAG != 0 && view.is_full_cube(pos))
            {
                pos.offset(quad.light_face())
            } else {
                pos
            }
        }
    };
    with_min_block(sampler.brightness(view, sample), view.luminance(pos))
}

