//! Fixed-stride packed layout of one quad.
//!
//! A quad is `TOTAL_STRIDE` words: a four word header followed by four
//! vertices of `VERTEX_STRIDE` words each. Floats are stored as raw bits.

use indigo_geom::Face;

pub const HEADER_BITS: usize = 0;
pub const HEADER_FACE_NORMAL: usize = 1;
pub const HEADER_COLOR_INDEX: usize = 2;
pub const HEADER_TAG: usize = 3;
pub const HEADER_STRIDE: usize = 4;

pub const VERTEX_X: usize = 0;
pub const VERTEX_Y: usize = 1;
pub const VERTEX_Z: usize = 2;
pub const VERTEX_COLOR: usize = 3;
pub const VERTEX_U: usize = 4;
pub const VERTEX_V: usize = 5;
pub const VERTEX_LIGHTMAP: usize = 6;
pub const VERTEX_NORMAL: usize = 7;
pub const VERTEX_STRIDE: usize = 8;

pub const QUAD_STRIDE: usize = VERTEX_STRIDE * 4;
pub const TOTAL_STRIDE: usize = HEADER_STRIDE + QUAD_STRIDE;

/// Stored in `HEADER_COLOR_INDEX` when the quad has no tint.
pub const NO_COLOR_INDEX: u32 = u32::MAX;

// Face slots hold a face index, or NO_FACE.
pub(crate) const NO_FACE: u32 = 6;
const FACE_MASK: u32 = 0b111;

const CULL_SHIFT: u32 = 0;
const LIGHT_SHIFT: u32 = CULL_SHIFT + 3;
const NOMINAL_SHIFT: u32 = LIGHT_SHIFT + 3;
const NORMALS_SHIFT: u32 = NOMINAL_SHIFT + 3;
const NORMALS_MASK: u32 = 0b1111;
const GEOMETRY_SHIFT: u32 = NORMALS_SHIFT + 4;
const GEOMETRY_MASK: u32 = 0b111;
const MATERIAL_SHIFT: u32 = GEOMETRY_SHIFT + 3;
const MATERIAL_MASK: u32 = (1 << 10) - 1;

/// Word offset of `field` for vertex `vertex`. Panics for vertex indices outside `0..4`.
#[inline]
pub fn vertex_index(vertex: usize, field: usize) -> usize {
    assert!(vertex < 4, "vertex index {vertex} out of range 0..4");
    HEADER_STRIDE + vertex * VERTEX_STRIDE + field
}

#[inline]
fn face_to_bits(face: Option<Face>) -> u32 {
    face.map_or(NO_FACE, |f| f.index() as u32)
}

#[inline]
fn bits_to_face(bits: u32) -> Option<Face> {
    Face::from_index(bits as usize)
}

#[inline]
fn get(bits: u32, shift: u32, mask: u32) -> u32 {
    (bits >> shift) & mask
}

#[inline]
fn set(bits: u32, shift: u32, mask: u32, value: u32) -> u32 {
    (bits & !(mask << shift)) | ((value & mask) << shift)
}

#[inline]
pub fn cull_face(bits: u32) -> Option<Face> {
    bits_to_face(get(bits, CULL_SHIFT, FACE_MASK))
}

#[inline]
pub fn with_cull_face(bits: u32, face: Option<Face>) -> u32 {
    set(bits, CULL_SHIFT, FACE_MASK, face_to_bits(face))
}

/// Light face is always present once geometry has been computed.
#[inline]
pub fn light_face(bits: u32) -> Face {
    bits_to_face(get(bits, LIGHT_SHIFT, FACE_MASK)).unwrap_or(Face::PosY)
}

#[inline]
pub fn with_light_face(bits: u32, face: Face) -> u32 {
    set(bits, LIGHT_SHIFT, FACE_MASK, face.index() as u32)
}

#[inline]
pub fn nominal_face(bits: u32) -> Option<Face> {
    bits_to_face(get(bits, NOMINAL_SHIFT, FACE_MASK))
}

#[inline]
pub fn with_nominal_face(bits: u32, face: Option<Face>) -> u32 {
    set(bits, NOMINAL_SHIFT, FACE_MASK, face_to_bits(face))
}

/// One bit per vertex that carries its own normal.
#[inline]
pub fn normal_flags(bits: u32) -> u32 {
    get(bits, NORMALS_SHIFT, NORMALS_MASK)
}

#[inline]
pub fn with_normal_flags(bits: u32, flags: u32) -> u32 {
    set(bits, NORMALS_SHIFT, NORMALS_MASK, flags)
}

#[inline]
pub fn geometry_flags(bits: u32) -> u32 {
    get(bits, GEOMETRY_SHIFT, GEOMETRY_MASK)
}

#[inline]
pub fn with_geometry_flags(bits: u32, flags: u32) -> u32 {
    set(bits, GEOMETRY_SHIFT, GEOMETRY_MASK, flags)
}

#[inline]
pub fn material_bits(bits: u32) -> u32 {
    get(bits, MATERIAL_SHIFT, MATERIAL_MASK)
}

#[inline]
pub fn with_material_bits(bits: u32, material: u32) -> u32 {
    set(bits, MATERIAL_SHIFT, MATERIAL_MASK, material)
}

/// Header bits of a freshly cleared quad: no faces, no normals, default material.
pub const EMPTY_HEADER_BITS: u32 = (NO_FACE << CULL_SHIFT) | (NO_FACE << LIGHT_SHIFT) | (NO_FACE << NOMINAL_SHIFT);
