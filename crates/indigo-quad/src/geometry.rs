//! Shape classification of a quad from its vertex positions.

use indigo_geom::{Axis, Face, approx_eq};

use crate::view::QuadView;

/// All four vertices sit on the corners of the light face's unit square.
pub const CUBIC_FLAG: u32 = 1;
/// All four vertices share the coordinate on the light face's axis.
pub const AXIS_ALIGNED_FLAG: u32 = 1 << 1;
/// Axis aligned and lying on the block boundary of the light face.
pub const LIGHT_FACE_FLAG: u32 = 1 << 2;

pub const EPS_MIN: f32 = 0.0001;
pub const EPS_MAX: f32 = 1.0 - EPS_MIN;

pub fn compute_shape_flags<Q: QuadView + ?Sized>(quad: &Q, light_face: Face) -> u32 {
    let mut bits = 0;
    if is_quad_parallel_to_face(light_face, quad) {
        bits |= AXIS_ALIGNED_FLAG;
        if is_parallel_quad_on_face(light_face, quad) {
            bits |= LIGHT_FACE_FLAG;
        }
    }
    if is_quad_cubic(light_face, quad) {
        bits |= CUBIC_FLAG;
    }
    bits
}

pub fn is_quad_parallel_to_face<Q: QuadView + ?Sized>(face: Face, quad: &Q) -> bool {
    let axis = face.axis();
    let first = quad.pos_by_index(0, axis);
    (1..4).all(|i| approx_eq(first, quad.pos_by_index(i, axis)))
}

/// Assumes the quad is parallel to `face`; checks only the first vertex.
pub fn is_parallel_quad_on_face<Q: QuadView + ?Sized>(face: Face, quad: &Q) -> bool {
    let x = quad.pos_by_index(0, face.axis());
    if face.is_positive() { x >= EPS_MAX } else { x <= EPS_MIN }
}

pub fn is_quad_cubic<Q: QuadView + ?Sized>(face: Face, quad: &Q) -> bool {
    let (a, b) = match face.axis() {
        Axis::X => (Axis::Y, Axis::Z),
        Axis::Y => (Axis::X, Axis::Z),
        Axis::Z => (Axis::Y, Axis::X),
    };
    confirm_square_corners(a, b, quad)
}

// Each vertex must land on a distinct corner of the unit square spanned by (a, b).
fn confirm_square_corners<Q: QuadView + ?Sized>(a: Axis, b: Axis, quad: &Q) -> bool {
    let mut corners = 0u32;
    for i in 0..4 {
        let av = quad.pos_by_index(i, a);
        let bv = quad.pos_by_index(i, b);
        let row = if av <= EPS_MIN {
            0
        } else if av >= EPS_MAX {
            2
        } else {
            return false;
        };
        let col = if bv <= EPS_MIN {
            0
        } else if bv >= EPS_MAX {
            1
        } else {
            return false;
        };
        corners |= 1 << (row + col);
    }
    corners == 0b1111
}
