//! Signed-byte normal packing and face normal computation.

use indigo_geom::{Face, Vec3};

use crate::view::QuadView;

#[inline]
fn pack_component(c: f32) -> u32 {
    ((c.clamp(-1.0, 1.0) * 127.0) as i32 & 0xFF) as u32
}

#[inline]
fn unpack_component(packed: u32, shift: u32) -> f32 {
    ((packed >> shift) as u8 as i8) as f32 / 127.0
}

/// Packs a normal into the low three signed bytes (x, y, z). Components are clamped to -1..=1.
#[inline]
pub fn pack_normal(n: Vec3) -> u32 {
    pack_component(n.x) | pack_component(n.y) << 8 | pack_component(n.z) << 16
}

#[inline]
pub fn unpack_normal(packed: u32) -> Vec3 {
    Vec3::new(
        unpack_component(packed, 0),
        unpack_component(packed, 8),
        unpack_component(packed, 16),
    )
}

/// Unit normal of the quad plane: the cross product of its two diagonals.
/// Zero for degenerate quads.
pub fn compute_face_normal<Q: QuadView + ?Sized>(quad: &Q) -> Vec3 {
    let d0 = quad.pos(2) - quad.pos(0);
    let d1 = quad.pos(3) - quad.pos(1);
    d0.cross(d1).normalized()
}

/// Face whose normal is closest to `n`.
#[inline]
pub fn light_face(n: Vec3) -> Face {
    Face::nearest(n)
}
