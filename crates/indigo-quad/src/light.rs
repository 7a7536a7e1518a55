//! Packed lightmap helpers. A lightmap is `sky << 16 | block`, each channel
//! holding `level * 16` for a light level in `0..=15`.

pub const FULL_BRIGHTNESS: u32 = 0x00F0_00F0;

#[inline]
pub fn pack(block_level: u8, sky_level: u8) -> u32 {
    ((sky_level.min(15) as u32) << 4) << 16 | (block_level.min(15) as u32) << 4
}

#[inline]
pub fn block(light: u32) -> u32 {
    light & 0xFFFF
}

#[inline]
pub fn sky(light: u32) -> u32 {
    light >> 16
}

/// Per-channel maximum. `FULL_BRIGHTNESS` is absorbing.
#[inline]
pub fn max_light(a: u32, b: u32) -> u32 {
    if a == FULL_BRIGHTNESS || b == FULL_BRIGHTNESS {
        return FULL_BRIGHTNESS;
    }
    if a == 0 {
        return b;
    }
    if b == 0 {
        return a;
    }
    block(a).max(block(b)) | sky(a).max(sky(b)) << 16
}

/// Raises the block channel of `light` to at least `luminance` (a light level).
#[inline]
pub fn with_min_block(light: u32, luminance: u8) -> u32 {
    let floor = (luminance.min(15) as u32) << 4;
    if block(light) >= floor {
        light
    } else {
        (light & 0xFFFF_0000) | floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_channels() {
        assert_eq!(pack(15, 15), FULL_BRIGHTNESS);
        assert_eq!(pack(10, 0), 0x00A0);
        assert_eq!(pack(0, 5), 0x0050_0000);
        assert_eq!(block(pack(3, 7)), 0x30);
        assert_eq!(sky(pack(3, 7)), 0x70);
    }

    #[test]
    fn max_per_channel() {
        assert_eq!(max_light(0x00A0, 0x0050), 0x00A0);
        assert_eq!(max_light(0x0030_0010, 0x0010_0030), 0x0030_0030);
        assert_eq!(max_light(0x0000_0010, FULL_BRIGHTNESS), FULL_BRIGHTNESS);
        assert_eq!(max_light(0, 0x0040_0020), 0x0040_0020);
    }

    #[test]
    fn luminance_floors_block_channel() {
        assert_eq!(with_min_block(0x0050_0020, 4), 0x0050_0040);
        assert_eq!(with_min_block(0x0050_00A0, 4), 0x0050_00A0);
    }
}
