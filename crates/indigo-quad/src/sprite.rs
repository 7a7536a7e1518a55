//! Texture coordinate baking against a sprite's atlas rectangle.

use indigo_geom::Face;

use crate::mutable::MutableQuadView;
use crate::view::QuadView;

pub const BAKE_ROTATE_NONE: u32 = 0;
pub const BAKE_ROTATE_90: u32 = 1;
pub const BAKE_ROTATE_180: u32 = 2;
pub const BAKE_ROTATE_270: u32 = 3;
/// Derive UVs from vertex positions on the nominal face, ignoring existing UVs.
pub const BAKE_LOCK_UV: u32 = 4;
pub const BAKE_FLIP_U: u32 = 8;
pub const BAKE_FLIP_V: u32 = 16;
/// Existing UVs are already 0..1 rather than 0..16.
pub const BAKE_NORMALIZED: u32 = 32;

const NORMALIZER: f32 = 1.0 / 16.0;

/// Sub-rectangle of a texture atlas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub min_u: f32,
    pub max_u: f32,
    pub min_v: f32,
    pub max_v: f32,
}

impl Sprite {
    /// The whole texture.
    pub const FULL: Sprite = Sprite {
        min_u: 0.0,
        max_u: 1.0,
        min_v: 0.0,
        max_v: 1.0,
    };

    pub fn new(min_u: f32, min_v: f32, max_u: f32, max_v: f32) -> Self {
        Self {
            min_u,
            max_u,
            min_v,
            max_v,
        }
    }
}

fn modify(quad: &mut MutableQuadView, f: impl Fn(&MutableQuadView, usize) -> (f32, f32)) {
    for i in 0..4 {
        let (u, v) = f(quad, i);
        quad.set_uv(i, u, v);
    }
}

fn lock_uv(face: Face, q: &MutableQuadView, i: usize) -> (f32, f32) {
    match face {
        Face::PosX => (1.0 - q.z(i), 1.0 - q.y(i)),
        Face::NegX => (q.z(i), 1.0 - q.y(i)),
        Face::NegZ => (1.0 - q.x(i), 1.0 - q.y(i)),
        Face::PosZ => (q.x(i), 1.0 - q.y(i)),
        Face::NegY => (q.x(i), 1.0 - q.z(i)),
        Face::PosY => (q.x(i), q.z(i)),
    }
}

pub(crate) fn bake(quad: &mut MutableQuadView, sprite: &Sprite, flags: u32) {
    match quad.nominal_face() {
        Some(face) if flags & BAKE_LOCK_UV != 0 => modify(quad, |q, i| lock_uv(face, q, i)),
        _ if flags & BAKE_NORMALIZED == 0 => {
            modify(quad, |q, i| (q.u(i) * NORMALIZER, q.v(i) * NORMALIZER))
        }
        _ => {}
    }
    match flags & 3 {
        BAKE_ROTATE_90 => modify(quad, |q, i| (q.v(i), 1.0 - q.u(i))),
        BAKE_ROTATE_180 => modify(quad, |q, i| (1.0 - q.u(i), 1.0 - q.v(i))),
        BAKE_ROTATE_270 => modify(quad, |q, i| (1.0 - q.v(i), q.u(i))),
        _ => {}
    }
    if flags & BAKE_FLIP_U != 0 {
        modify(quad, |q, i| (1.0 - q.u(i), q.v(i)));
    }
    if flags & BAKE_FLIP_V != 0 {
        modify(quad, |q, i| (q.u(i), 1.0 - q.v(i)));
    }
    let u_span = sprite.max_u - sprite.min_u;
    let v_span = sprite.max_v - sprite.min_v;
    modify(quad, |q, i| {
        (sprite.min_u + q.u(i) * u_span, sprite.min_v + q.v(i) * v_span)
    });
}
