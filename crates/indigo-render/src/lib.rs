//! Quad tessellation: turns emitted quads into vertex data for block, item and terrain rendering.
#![forbid(unsafe_code)]

mod block_context;
mod chunk_info;
mod colors;
mod config;
mod error;
mod item_context;
mod model;
mod renderer;
mod sink;
mod terrain_context;

pub use block_context::{BlockRenderContext, BlockRenderParams};
pub use chunk_info::ChunkRenderInfo;
pub use colors::{BlockColors, ItemColors, NoTint};
pub use config::{ConfigError, RendererConfig};
pub use error::RenderCrash;
pub use item_context::{ItemDisplay, ItemRenderContext, ItemRenderParams, ItemSinkKey, ItemSinks, ItemStack};
pub use model::{BlockModel, ItemModel, MeshModel, RenderContext};
pub use sink::{ChunkMesh, DEFAULT_OVERLAY, LayerSinks, MeshBuild, Vertex, VertexSink};
pub use terrain_context::TerrainRenderContext;

// Re-exported so model code only needs this crate.
pub use indigo_lighting::{Block, BlockView};
