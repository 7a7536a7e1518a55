/// AO factors and split lightmap channels at the four corners of one face sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AoFaceData {
    pub ao: [f32; 4],
    block: [u32; 4],
    sky: [u32; 4],
}

impl AoFaceData {
    pub fn new(ao: [f32; 4], light: [u32; 4]) -> Self {
        let mut out = Self {
            ao,
            ..Self::default()
        };
        for (i, l) in light.into_iter().enumerate() {
            out.set_light(i, l);
        }
        out
    }

    #[inline]
    pub fn set_light(&mut self, corner: usize, packed: u32) {
        self.block[corner] = packed & 0xFFFF;
        self.sky[corner] = (packed >> 16) & 0xFFFF;
    }

    #[inline]
    pub fn light(&self, corner: usize) -> u32 {
        self.sky[corner] << 16 | self.block[corner]
    }

    #[inline]
    fn weighted(channel: &[u32; 4], w: &[f32; 4]) -> u32 {
        let sum: f32 = channel.iter().zip(w).map(|(&c, &w)| c as f32 * w).sum();
        (sum as i32 & 0xFF) as u32
    }

    #[inline]
    pub fn weighted_block_light(&self, w: &[f32; 4]) -> u32 {
        Self::weighted(&self.block, w)
    }

    #[inline]
    pub fn weighted_sky_light(&self, w: &[f32; 4]) -> u32 {
        Self::weighted(&self.sky, w)
    }

    #[inline]
    pub fn weighted_combined_light(&self, w: &[f32; 4]) -> u32 {
        self.weighted_sky_light(w) << 16 | self.weighted_block_light(w)
    }

    #[inline]
    pub fn weighted_ao(&self, w: &[f32; 4]) -> f32 {
        self.ao.iter().zip(w).map(|(&a, &w)| a * w).sum()
    }

    #[inline]
    pub fn max_block_light(&self, old_max: u32) -> u32 {
        self.block.iter().copied().fold(old_max, u32::max)
    }

    #[inline]
    pub fn max_sky_light(&self, old_max: u32) -> u32 {
        self.sky.iter().copied().fold(old_max, u32::max)
    }

    #[inline]
    pub fn max_ao(&self, old_max: f32) -> f32 {
        self.ao.iter().copied().fold(old_max, f32::max)
    }

    /// Writes corner values to vertex slots through `vertex_map`.
    pub fn to_array(&self, ao: &mut [f32; 4], light: &mut [u32; 4], vertex_map: &[usize; 4]) {
        for (corner, &vertex) in vertex_map.iter().enumerate() {
            ao[vertex] = self.ao[corner];
            light[vertex] = self.light(corner);
        }
    }

    /// Per-corner linear blend `in0 * w0 + in1 * w1`; light channels truncate.
    pub fn weighted_mean(in0: &AoFaceData, w0: f32, in1: &AoFaceData, w1: f32) -> AoFaceData {
        let mut out = AoFaceData::default();
        for i in 0..4 {
            out.ao[i] = in0.ao[i] * w0 + in1.ao[i] * w1;
            out.block[i] = (in0.block[i] as f32 * w0 + in1.block[i] as f32 * w1) as u32;
            out.sky[i] = (in0.sky[i] as f32 * w0 + in1.sky[i] as f32 * w1) as u32;
        }
        out
    }
}
