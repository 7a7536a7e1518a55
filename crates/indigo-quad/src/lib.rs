//! Packed quad data model: encoding, materials, views, emitters, transforms and meshes.
#![forbid(unsafe_code)]

pub mod color;
pub mod encoding;
pub mod geometry;
pub mod light;
pub mod material;
pub mod mesh;
pub mod normal;
pub mod sprite;
pub mod transform;

mod emitter;
mod mutable;
mod view;

pub use emitter::{QuadEmitter, QuadSink};
pub use material::{BlendMode, MaterialError, MaterialFinder, MaterialRegistry, RenderLayer, RenderMaterial, TriState};
pub use mesh::{Mesh, MeshBuilder, MeshQuad};
pub use mutable::MutableQuadView;
pub use sprite::Sprite;
pub use transform::{QuadTransform, TransformStack};
pub use view::QuadView;
