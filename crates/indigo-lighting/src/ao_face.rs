//! Per-face neighbor tables and interpolation weights for AO sampling.
//!
//! For each light face: the four edge neighbors in sampling order, the
//! depth of a vertex below the face, the bilinear weights of a vertex
//! against the four face corners, and the corner-to-vertex map of a full
//! face in standard vertex order.

use indigo_geom::Face;
use indigo_quad::QuadView;

pub(crate) type DepthFn = fn(&dyn QuadView, usize) -> f32;
pub(crate) type WeightFn = fn(&dyn QuadView, usize, &mut [f32; 4]);

pub(crate) struct AoFace {
    pub neighbors: [Face; 4],
    pub depth: DepthFn,
    pub weights: WeightFn,
    pub vertex_map: [usize; 4],
}

const UP: Face = Face::PosY;
const DOWN: Face = Face::NegY;
const EAST: Face = Face::PosX;
const WEST: Face = Face::NegX;
const SOUTH: Face = Face::PosZ;
const NORTH: Face = Face::NegZ;

// Indexed by Face::index().
static AO_FACES: [AoFace; 6] = [
    // PosY
    AoFace {
        neighbors: [EAST, WEST, NORTH, SOUTH],
        depth: |q, i| 1.0 - q.y(i),
        weights: |q, i, w| {
            let u = q.x(i);
            let v = q.z(i);
            w[0] = u * v;
            w[1] = u * (1.0 - v);
            w[2] = (1.0 - u) * (1.0 - v);
            w[3] = (1.0 - u) * v;
        },
        vertex_map: [2, 3, 0, 1],
    },
    // NegY
    AoFace {
        neighbors: [WEST, EAST, NORTH, SOUTH],
        depth: |q, i| q.y(i),
        weights: |q, i, w| {
            let u = q.x(i);
            let v = q.z(i);
            w[0] = (1.0 - u) * v;
            w[1] = (1.0 - u) * (1.0 - v);
            w[2] = u * (1.0 - v);
            w[3] = u * v;
        },
        vertex_map: [0, 1, 2, 3],
    },
    // PosX
    AoFace {
        neighbors: [DOWN, UP, NORTH, SOUTH],
        depth: |q, i| 1.0 - q.x(i),
        weights: |q, i, w| {
            let u = q.y(i);
            let v = q.z(i);
            w[0] = (1.0 - u) * v;
            w[1] = (1.0 - u) * (1.0 - v);
            w[2] = u * (1.0 - v);
            w[3] = u * v;
        },
        vertex_map: [1, 2, 3, 0],
    },
    // NegX
    AoFace {
        neighbors: [UP, DOWN, NORTH, SOUTH],
        depth: |q, i| q.x(i),
        weights: |q, i, w| {
            let u = q.y(i);
            let v = q.z(i);
            w[0] = u * v;
            w[1] = u * (1.0 - v);
            w[2] = (1.0 - u) * (1.0 - v);
            w[3] = (1.0 - u) * v;
        },
        vertex_map: [3, 0, 1, 2],
    },
    // PosZ
    AoFace {
        neighbors: [WEST, EAST, DOWN, UP],
        depth: |q, i| 1.0 - q.z(i),
        weights: |q, i, w| {
            let u = q.y(i);
            let v = q.x(i);
            w[0] = u * (1.0 - v);
            w[1] = (1.0 - u) * (1.0 - v);
            w[2] = (1.0 - u) * v;
            w[3] = u * v;
        },
        vertex_map: [0, 1, 2, 3],
    },
    // NegZ
    AoFace {
        neighbors: [UP, DOWN, EAST, WEST],
        depth: |q, i| q.z(i),
        weights: |q, i, w| {
            let u = q.y(i);
            let v = q.x(i);
            w[0] = u * (1.0 - v);
            w[1] = u * v;
            w[2] = (1.0 - u) * v;
            w[3] = (1.0 - u) * (1.0 - v);
        },
        vertex_map: [3, 0, 1, 2],
    },
];

#[inline]
pub(crate) fn ao_face(face: Face) -> &'static AoFace {
    &AO_FACES[face.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use indigo_quad::MutableQuadView;

    // A full-face quad's vertex v must put all of its weight on the corner
    // that the vertex map sends to v.
    #[test]
    fn vertex_map_agrees_with_weights() {
        for face in Face::ALL {
            let mut q = MutableQuadView::new();
            q.square(face, 0.0, 0.0, 1.0, 1.0, 0.0).compute_geometry();
            let table = ao_face(face);
            for corner in 0..4 {
                let vertex = table.vertex_map[corner];
                let mut w = [0.0; 4];
                (table.weights)(&q, vertex, &mut w);
                assert_eq!(w[corner], 1.0, "{face:?} corner {corner}");
                assert_eq!(w.iter().sum::<f32>(), 1.0, "{face:?} corner {corner}");
            }
        }
    }

    #[test]
    fn depth_is_zero_on_face_and_one_across() {
        for face in Face::ALL {
            let table = ao_face(face);
            let mut q = MutableQuadView::new();
            q.square(face, 0.0, 0.0, 1.0, 1.0, 0.0);
            assert_eq!((table.depth)(&q, 0), 0.0, "{face:?}");
            q.square(face, 0.0, 0.0, 1.0, 1.0, 1.0);
            assert_eq!((table.depth)(&q, 0), 1.0, "{face:?}");
        }
    }
}
