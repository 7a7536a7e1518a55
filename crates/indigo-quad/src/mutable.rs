use indigo_geom::{Face, Vec3};

use crate::color::WHITE;
use crate::encoding::{self, *};
use crate::geometry::compute_shape_flags;
use crate::material::RenderMaterial;
use crate::normal::{compute_face_normal, light_face, pack_normal};
use crate::sprite::{self, Sprite};
use crate::view::QuadView;

/// Depth below which `square` treats a quad as lying on the block face.
const CULL_FACE_EPSILON: f32 = 0.00001;

/// Write cursor over one packed quad.
///
/// Setters panic for vertex indices outside `0..4`. Moving any vertex
/// invalidates the cached geometry until `compute_geometry` runs again.
#[derive(Clone, Debug)]
pub struct MutableQuadView {
    data: [u32; TOTAL_STRIDE],
    geometry_invalid: bool,
}

impl Default for MutableQuadView {
    fn default() -> Self {
        let mut q = Self {
            data: [0; TOTAL_STRIDE],
            geometry_invalid: true,
        };
        q.clear();
        q
    }
}

impl QuadView for MutableQuadView {
    #[inline]
    fn data(&self) -> &[u32] {
        &self.data
    }

    #[inline]
    fn geometry_valid(&self) -> bool {
        !self.geometry_invalid
    }
}

impl MutableQuadView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every field to its default: white, lightmap 0, no faces,
    /// no color index, standard material, tag 0.
    pub fn clear(&mut self) -> &mut Self {
        self.data = [0; TOTAL_STRIDE];
        self.data[HEADER_BITS] = EMPTY_HEADER_BITS;
        self.data[HEADER_COLOR_INDEX] = NO_COLOR_INDEX;
        for i in 0..4 {
            self.data[vertex_index(i, VERTEX_COLOR)] = WHITE;
        }
        self.geometry_invalid = true;
        self
    }

    #[inline]
    pub fn set_pos(&mut self, vertex: usize, x: f32, y: f32, z: f32) -> &mut Self {
        let base = vertex_index(vertex, VERTEX_X);
        self.data[base] = x.to_bits();
        self.data[base + 1] = y.to_bits();
        self.data[base + 2] = z.to_bits();
        self.geometry_invalid = true;
        self
    }

    #[inline]
    pub fn set_pos_vec(&mut self, vertex: usize, p: Vec3) -> &mut Self {
        self.set_pos(vertex, p.x, p.y, p.z)
    }

    #[inline]
    pub fn set_color(&mut self, vertex: usize, argb: u32) -> &mut Self {
        self.data[vertex_index(vertex, VERTEX_COLOR)] = argb;
        self
    }

    pub fn set_colors(&mut self, argb: u32) -> &mut Self {
        for i in 0..4 {
            self.set_color(i, argb);
        }
        self
    }

    #[inline]
    pub fn set_uv(&mut self, vertex: usize, u: f32, v: f32) -> &mut Self {
        self.data[vertex_index(vertex, VERTEX_U)] = u.to_bits();
        self.data[vertex_index(vertex, VERTEX_V)] = v.to_bits();
        self
    }

    #[inline]
    pub fn set_lightmap(&mut self, vertex: usize, packed: u32) -> &mut Self {
        self.data[vertex_index(vertex, VERTEX_LIGHTMAP)] = packed;
        self
    }

    pub fn set_lightmaps(&mut self, packed: u32) -> &mut Self {
        for i in 0..4 {
            self.set_lightmap(i, packed);
        }
        self
    }

    pub fn set_normal(&mut self, vertex: usize, x: f32, y: f32, z: f32) -> &mut Self {
        self.data[vertex_index(vertex, VERTEX_NORMAL)] = pack_normal(Vec3::new(x, y, z));
        let flags = encoding::normal_flags(self.data[HEADER_BITS]) | (1 << vertex);
        self.data[HEADER_BITS] = encoding::with_normal_flags(self.data[HEADER_BITS], flags);
        self
    }

    #[inline]
    pub fn set_material(&mut self, material: RenderMaterial) -> &mut Self {
        self.data[HEADER_BITS] = encoding::with_material_bits(self.data[HEADER_BITS], material.bits());
        self
    }

    #[inline]
    pub fn set_color_index(&mut self, index: Option<u32>) -> &mut Self {
        self.data[HEADER_COLOR_INDEX] = index.unwrap_or(NO_COLOR_INDEX);
        self
    }

    /// Sets the cull face. The nominal face follows it.
    #[inline]
    pub fn set_cull_face(&mut self, face: Option<Face>) -> &mut Self {
        let bits = encoding::with_cull_face(self.data[HEADER_BITS], face);
        self.data[HEADER_BITS] = encoding::with_nominal_face(bits, face);
        self
    }

    #[inline]
    pub fn set_nominal_face(&mut self, face: Option<Face>) -> &mut Self {
        self.data[HEADER_BITS] = encoding::with_nominal_face(self.data[HEADER_BITS], face);
        self
    }

    #[inline]
    pub fn set_tag(&mut self, tag: u32) -> &mut Self {
        self.data[HEADER_TAG] = tag;
        self
    }

    /// Positions the quad on a face of the unit cube. `left`, `bottom`,
    /// `right` and `top` are measured looking at the face from outside; `depth`
    /// is the inset from the face. A quad with depth ~0 is culled by `face`.
    pub fn square(
        &mut self,
        face: Face,
        mut left: f32,
        mut bottom: f32,
        mut right: f32,
        mut top: f32,
        mut depth: f32,
    ) -> &mut Self {
        if depth.abs() < CULL_FACE_EPSILON {
            self.set_cull_face(Some(face));
            depth = 0.0;
        } else {
            self.set_cull_face(None);
        }
        self.set_nominal_face(Some(face));

        match face {
            Face::PosY | Face::NegY => {
                if face == Face::PosY {
                    depth = 1.0 - depth;
                    top = 1.0 - top;
                    bottom = 1.0 - bottom;
                }
                self.set_pos(0, left, depth, top);
                self.set_pos(1, left, depth, bottom);
                self.set_pos(2, right, depth, bottom);
                self.set_pos(3, right, depth, top);
            }
            Face::PosX | Face::NegX => {
                if face == Face::PosX {
                    depth = 1.0 - depth;
                    left = 1.0 - left;
                    right = 1.0 - right;
                }
                self.set_pos(0, depth, top, left);
                self.set_pos(1, depth, bottom, left);
                self.set_pos(2, depth, bottom, right);
                self.set_pos(3, depth, top, right);
            }
            Face::PosZ | Face::NegZ => {
                if face == Face::PosZ {
                    depth = 1.0 - depth;
                    left = 1.0 - left;
                    right = 1.0 - right;
                }
                self.set_pos(0, 1.0 - left, top, depth);
                self.set_pos(1, 1.0 - left, bottom, depth);
                self.set_pos(2, 1.0 - right, bottom, depth);
                self.set_pos(3, 1.0 - right, top, depth);
            }
        }
        self
    }

    /// Assigns UVs from `sprite`. See the `sprite::BAKE_*` flags.
    pub fn sprite_bake(&mut self, sprite: &Sprite, flags: u32) -> &mut Self {
        sprite::bake(self, sprite, flags);
        self
    }

    /// Imports four vertices in the legacy layout: x, y, z, color (ABGR), u,
    /// v, lightmap, normal. Reads `QUAD_STRIDE` words from `start`; vertex
    /// normals are not carried over.
    pub fn from_vanilla(&mut self, vertices: &[u32], start: usize) -> &mut Self {
        let src = &vertices[start..start + QUAD_STRIDE];
        self.data[HEADER_STRIDE..].copy_from_slice(src);
        for i in 0..4 {
            let idx = vertex_index(i, VERTEX_COLOR);
            self.data[idx] = swap_red_blue(self.data[idx]);
        }
        self.data[HEADER_BITS] = encoding::with_normal_flags(self.data[HEADER_BITS], 0);
        self.geometry_invalid = true;
        self
    }

    /// Copies every field, including the cached geometry, from `other`.
    pub fn copy_from<Q: QuadView + ?Sized>(&mut self, other: &Q) -> &mut Self {
        self.data.copy_from_slice(&other.data()[..TOTAL_STRIDE]);
        self.geometry_invalid = !other.geometry_valid();
        self
    }

    /// Recomputes face normal, light face and shape flags if any vertex moved.
    /// Leaves every other field alone.
    pub fn compute_geometry(&mut self) -> &mut Self {
        if self.geometry_invalid {
            self.geometry_invalid = false;
            let n = compute_face_normal(self);
            self.data[HEADER_FACE_NORMAL] = pack_normal(n);
            let face = light_face(n);
            let bits = encoding::with_light_face(self.data[HEADER_BITS], face);
            self.data[HEADER_BITS] = bits;
            let shape = compute_shape_flags(self, face);
            self.data[HEADER_BITS] = encoding::with_geometry_flags(bits, shape);
        }
        self
    }

    #[inline]
    pub fn is_geometry_valid(&self) -> bool {
        !self.geometry_invalid
    }

    #[inline]
    pub(crate) fn raw(&self) -> &[u32; TOTAL_STRIDE] {
        &self.data
    }
}

#[inline]
fn swap_red_blue(color: u32) -> u32 {
    (color & 0xFF00_FF00) | ((color >> 16) & 0xFF) | ((color & 0xFF) << 16)
}
