use crate::Vec3;

/// Column-major 4x4 affine matrix. `m[col * 4 + row]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub m: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    #[inline]
    pub fn translation(t: Vec3) -> Mat4 {
        let mut r = Mat4::IDENTITY;
        r.m[12] = t.x;
        r.m[13] = t.y;
        r.m[14] = t.z;
        r
    }

    #[inline]
    pub fn scale(s: Vec3) -> Mat4 {
        let mut r = Mat4::IDENTITY;
        r.m[0] = s.x;
        r.m[5] = s.y;
        r.m[10] = s.z;
        r
    }

    /// Rotation about the Y axis, `radians` counter-clockwise looking down -Y.
    pub fn rotation_y(radians: f32) -> Mat4 {
        let (s, c) = radians.sin_cos();
        let mut r = Mat4::IDENTITY;
        r.m[0] = c;
        r.m[2] = -s;
        r.m[8] = s;
        r.m[10] = c;
        r
    }

    pub fn mul(&self, rhs: &Mat4) -> Mat4 {
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.m[k * 4 + row] * rhs.m[col * 4 + k];
                }
                out[col * 4 + row] = acc;
            }
        }
        Mat4 { m: out }
    }

    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * p.x + m[4] * p.y + m[8] * p.z + m[12],
            m[1] * p.x + m[5] * p.y + m[9] * p.z + m[13],
            m[2] * p.x + m[6] * p.y + m[10] * p.z + m[14],
        )
    }

    /// Upper-left 3x3 block.
    pub fn linear(&self) -> Mat3 {
        let m = &self.m;
        Mat3 {
            m: [m[0], m[1], m[2], m[4], m[5], m[6], m[8], m[9], m[10]],
        }
    }
}

/// Column-major 3x3 matrix used for normals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    pub m: [f32; 9],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    pub fn mul(&self, rhs: &Mat3) -> Mat3 {
        let mut out = [0.0f32; 9];
        for col in 0..3 {
            for row in 0..3 {
                let mut acc = 0.0;
                for k in 0..3 {
                    acc += self.m[k * 3 + row] * rhs.m[col * 3 + k];
                }
                out[col * 3 + row] = acc;
            }
        }
        Mat3 { m: out }
    }

    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * v.x + m[3] * v.y + m[6] * v.z,
            m[1] * v.x + m[4] * v.y + m[7] * v.z,
            m[2] * v.x + m[5] * v.y + m[8] * v.z,
        )
    }
}

/// Position matrix plus the matrix applied to normals, kept in step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub position: Mat4,
    pub normal: Mat3,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Mat4::IDENTITY,
        normal: Mat3::IDENTITY,
    };

    pub fn translate(&mut self, t: Vec3) {
        self.position = self.position.mul(&Mat4::translation(t));
    }

    pub fn rotate_y(&mut self, radians: f32) {
        let r = Mat4::rotation_y(radians);
        self.position = self.position.mul(&r);
        self.normal = self.normal.mul(&r.linear());
    }

    /// Scales positions; normals receive the inverse scale (renormalized at use).
    pub fn scale(&mut self, s: Vec3) {
        self.position = self.position.mul(&Mat4::scale(s));
        if s.x == s.y && s.y == s.z {
            if s.x < 0.0 {
                self.normal = self.normal.mul(&Mat4::scale(Vec3::new(-1.0, -1.0, -1.0)).linear());
            }
            return;
        }
        let inv = Vec3::new(1.0 / s.x, 1.0 / s.y, 1.0 / s.z);
        self.normal = self.normal.mul(&Mat4::scale(inv).linear());
    }
}
