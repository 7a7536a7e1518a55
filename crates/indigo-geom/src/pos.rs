use crate::{Face, Vec3};

// Packed key layout: x in the top 26 bits, z in the next 26, y in the low 12.
const XZ_BITS: u32 = 26;
const Y_BITS: u32 = 12;
const X_SHIFT: u32 = Y_BITS + XZ_BITS;
const Z_SHIFT: u32 = Y_BITS;
const XZ_MASK: i64 = (1 << XZ_BITS) - 1;
const Y_MASK: i64 = (1 << Y_BITS) - 1;
const XZ_LIMIT: i32 = 1 << (XZ_BITS - 1);
const Y_LIMIT: i32 = 1 << (Y_BITS - 1);

/// Integer block coordinate in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, face: Face) -> BlockPos {
        let (dx, dy, dz) = face.delta();
        BlockPos::new(self.x + dx, self.y + dy, self.z + dz)
    }

    #[inline]
    pub fn add(self, dx: i32, dy: i32, dz: i32) -> BlockPos {
        BlockPos::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Position relative to `origin`, as floats.
    #[inline]
    pub fn relative_to(self, origin: BlockPos) -> Vec3 {
        Vec3::new(
            (self.x - origin.x) as f32,
            (self.y - origin.y) as f32,
            (self.z - origin.z) as f32,
        )
    }

    /// Packs the position into a single `i64` cache key.
    /// Distinct for |x|,|z| < 2^25 and |y| < 2^11.
    #[inline]
    pub fn as_key(self) -> i64 {
        debug_assert!(
            (-XZ_LIMIT..XZ_LIMIT).contains(&self.x)
                && (-XZ_LIMIT..XZ_LIMIT).contains(&self.z)
                && (-Y_LIMIT..Y_LIMIT).contains(&self.y),
            "{self:?} is outside the packed key range"
        );
        ((self.x as i64 & XZ_MASK) << X_SHIFT)
            | ((self.z as i64 & XZ_MASK) << Z_SHIFT)
            | (self.y as i64 & Y_MASK)
    }

    #[inline]
    pub fn from_key(key: i64) -> BlockPos {
        let x = (key << (64 - X_SHIFT - XZ_BITS)) >> (64 - XZ_BITS);
        let z = (key << (64 - Z_SHIFT - XZ_BITS)) >> (64 - XZ_BITS);
        let y = (key << (64 - Y_BITS)) >> (64 - Y_BITS);
        BlockPos::new(x as i32, y as i32, z as i32)
    }

    /// Stable per-position hash used to seed block model randomness.
    #[inline]
    pub fn render_seed(self) -> u64 {
        let mut l = (self.x as i64).wrapping_mul(3_129_871)
            ^ (self.z as i64).wrapping_mul(116_129_781)
            ^ self.y as i64;
        l = l
            .wrapping_mul(l)
            .wrapping_mul(42_317_861)
            .wrapping_add(l.wrapping_mul(11));
        (l >> 16) as u64
    }
}
