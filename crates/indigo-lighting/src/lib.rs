//! World light sampling, face culling and ambient occlusion for packed quads.
#![forbid(unsafe_code)]

mod ao;
mod ao_data;
mod ao_face;
mod block_info;
mod config;
mod sampler;
mod shade;
mod view;

pub use ao::AoCalculator;
pub use ao_data::AoFaceData;
pub use block_info::BlockRenderInfo;
pub use config::{AoMode, LightingConfig};
pub use sampler::{DirectSampler, LightCache, LightSampler, ao_level, world_brightness};
pub use shade::{flat_brightness, flat_shade, normal_shade};
pub use view::{Block, BlockView, default_directional_shade};

#[cfg(test)]
mod tests;
