//! Packed `0xAARRGGBB` color helpers.

pub const WHITE: u32 = 0xFFFF_FFFF;

#[inline]
pub fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[inline]
pub fn alpha(color: u32) -> u8 {
    (color >> 24) as u8
}

/// Component-wise product of two colors, each channel scaled to 0..=255.
/// White is the identity.
#[inline]
pub fn multiply_color(a: u32, b: u32) -> u32 {
    if a == WHITE {
        return b;
    }
    if b == WHITE {
        return a;
    }
    let mut out = 0u32;
    for shift in [0, 8, 16, 24] {
        let x = (a >> shift) & 0xFF;
        let y = (b >> shift) & 0xFF;
        out |= ((x * y) / 0xFF) << shift;
    }
    out
}

/// Scales RGB by `shade`, truncating. Alpha is untouched.
#[inline]
pub fn multiply_rgb(color: u32, shade: f32) -> u32 {
    let scale = |c: u32| ((c as f32 * shade) as u32).min(0xFF);
    let r = scale((color >> 16) & 0xFF);
    let g = scale((color >> 8) & 0xFF);
    let b = scale(color & 0xFF);
    (color & 0xFF00_0000) | r << 16 | g << 8 | b
}

/// ARGB to the RGBA byte order used by `MeshBuild`.
#[inline]
pub fn to_rgba_bytes(color: u32) -> [u8; 4] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8, (color >> 24) as u8]
}
