use indigo_geom::{Axis, Face, Vec3};

use crate::encoding::{self, *};
use crate::material::RenderMaterial;
use crate::normal;

/// Read access to one packed quad record.
///
/// Implementors only provide `data()`, a `TOTAL_STRIDE` word slice; every
/// getter decodes from it. Vertex getters panic for indices outside `0..4`.
pub trait QuadView {
    fn data(&self) -> &[u32];

    /// Whether the cached geometry header is current.
    fn geometry_valid(&self) -> bool {
        true
    }

    #[inline]
    fn x(&self, vertex: usize) -> f32 {
        f32::from_bits(self.data()[vertex_index(vertex, VERTEX_X)])
    }

    #[inline]
    fn y(&self, vertex: usize) -> f32 {
        f32::from_bits(self.data()[vertex_index(vertex, VERTEX_Y)])
    }

    #[inline]
    fn z(&self, vertex: usize) -> f32 {
        f32::from_bits(self.data()[vertex_index(vertex, VERTEX_Z)])
    }

    #[inline]
    fn pos(&self, vertex: usize) -> Vec3 {
        Vec3::new(self.x(vertex), self.y(vertex), self.z(vertex))
    }

    #[inline]
    fn pos_by_index(&self, vertex: usize, axis: Axis) -> f32 {
        f32::from_bits(self.data()[vertex_index(vertex, VERTEX_X + axis.index())])
    }

    #[inline]
    fn color(&self, vertex: usize) -> u32 {
        self.data()[vertex_index(vertex, VERTEX_COLOR)]
    }

    #[inline]
    fn u(&self, vertex: usize) -> f32 {
        f32::from_bits(self.data()[vertex_index(vertex, VERTEX_U)])
    }

    #[inline]
    fn v(&self, vertex: usize) -> f32 {
        f32::from_bits(self.data()[vertex_index(vertex, VERTEX_V)])
    }

    #[inline]
    fn lightmap(&self, vertex: usize) -> u32 {
        self.data()[vertex_index(vertex, VERTEX_LIGHTMAP)]
    }

    #[inline]
    fn has_normal(&self, vertex: usize) -> bool {
        assert!(vertex < 4, "vertex index {vertex} out of range 0..4");
        encoding::normal_flags(self.data()[HEADER_BITS]) & (1 << vertex) != 0
    }

    /// The vertex's own normal, if one was set.
    #[inline]
    fn normal(&self, vertex: usize) -> Option<Vec3> {
        if self.has_normal(vertex) {
            Some(normal::unpack_normal(self.data()[vertex_index(vertex, VERTEX_NORMAL)]))
        } else {
            None
        }
    }

    #[inline]
    fn packed_normal(&self, vertex: usize) -> u32 {
        self.data()[vertex_index(vertex, VERTEX_NORMAL)]
    }

    #[inline]
    fn has_vertex_normals(&self) -> bool {
        encoding::normal_flags(self.data()[HEADER_BITS]) != 0
    }

    #[inline]
    fn face_normal(&self) -> Vec3 {
        normal::unpack_normal(self.data()[HEADER_FACE_NORMAL])
    }

    #[inline]
    fn packed_face_normal(&self) -> u32 {
        self.data()[HEADER_FACE_NORMAL]
    }

    #[inline]
    fn cull_face(&self) -> Option<Face> {
        encoding::cull_face(self.data()[HEADER_BITS])
    }

    #[inline]
    fn nominal_face(&self) -> Option<Face> {
        encoding::nominal_face(self.data()[HEADER_BITS])
    }

    #[inline]
    fn light_face(&self) -> Face {
        encoding::light_face(self.data()[HEADER_BITS])
    }

    #[inline]
    fn geometry_flags(&self) -> u32 {
        encoding::geometry_flags(self.data()[HEADER_BITS])
    }

    #[inline]
    fn material(&self) -> RenderMaterial {
        RenderMaterial::from_bits(encoding::material_bits(self.data()[HEADER_BITS]))
    }

    #[inline]
    fn color_index(&self) -> Option<u32> {
        match self.data()[HEADER_COLOR_INDEX] {
            NO_COLOR_INDEX => None,
            idx => Some(idx),
        }
    }

    #[inline]
    fn tag(&self) -> u32 {
        self.data()[HEADER_TAG]
    }
}
