//! Per-quad tessellation shared by the render contexts.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use indigo_geom::Pose;
use indigo_lighting::{AoCalculator, BlockRenderInfo, BlockView, LightSampler, flat_brightness, flat_shade};
use indigo_quad::color::{multiply_color, multiply_rgb};
use indigo_quad::light::{FULL_BRIGHTNESS, max_light};
use indigo_quad::{MutableQuadView, QuadEmitter, QuadSink, QuadTransform, QuadView, TransformStack};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::colors::BlockColors;
use crate::error::panic_message;
use crate::model::{BlockModel, RenderContext};
use crate::sink::{LayerSinks, Vertex, VertexSink};

/// Writes the quad's four vertices through `pose`.
pub(crate) fn buffer_quad(quad: &MutableQuadView, pose: &Pose, overlay: u32, sink: &mut dyn VertexSink) {
    let face_normal = quad.face_normal();
    for i in 0..4 {
        let normal = quad.normal(i).unwrap_or(face_normal);
        sink.vertex(&Vertex {
            pos: pose.position.transform_point(quad.pos(i)),
            color: quad.color(i),
            uv: [quad.u(i), quad.v(i)],
            overlay,
            light: quad.lightmap(i),
            normal: pose.normal.transform(normal).normalized(),
        });
    }
}

/// Multiplies every vertex color by an opaque tint.
pub(crate) fn colorize(quad: &mut MutableQuadView, tint: u32) {
    let tint = 0xFF00_0000 | tint;
    for i in 0..4 {
        let c = multiply_color(quad.color(i), tint);
        quad.set_color(i, c);
    }
}

fn shade_smooth(quad: &mut MutableQuadView, ao: [f32; 4], light: [u32; 4], emissive: bool) {
    for i in 0..4 {
        let c = multiply_rgb(quad.color(i), ao[i]);
        quad.set_color(i, c);
        let l = if emissive {
            FULL_BRIGHTNESS
        } else {
            max_light(quad.lightmap(i), light[i])
        };
        quad.set_lightmap(i, l);
    }
}

fn shade_flat(quad: &mut MutableQuadView, shade: [f32; 4], brightness: u32, emissive: bool) {
    for i in 0..4 {
        if shade[i] != 1.0 {
            let c = multiply_rgb(quad.color(i), shade[i]);
            quad.set_color(i, c);
        }
        let l = if emissive {
            FULL_BRIGHTNESS
        } else {
            max_light(quad.lightmap(i), brightness)
        };
        quad.set_lightmap(i, l);
    }
}

/// Tessellates block quads: transform, cull, shade, tint, buffer.
pub(crate) struct BlockTessellator<'a> {
    pub view: &'a dyn BlockView,
    pub info: &'a mut BlockRenderInfo,
    pub ao: &'a mut AoCalculator,
    pub sampler: &'a mut dyn LightSampler,
    pub transforms: &'a mut TransformStack,
    pub colors: &'a dyn BlockColors,
    pub sinks: &'a mut dyn LayerSinks,
    pub pose: Pose,
    pub overlay: u32,
    pub is_vanilla: bool,
}

impl QuadSink for BlockTessellator<'_> {
    fn accept(&mut self, quad: &mut MutableQuadView) {
        if !self.transforms.apply(quad) {
            return;
        }
        quad.compute_geometry();
        if !self.info.should_draw_face(self.view, quad.cull_face()) {
            return;
        }

        let material = quad.material();
        let emissive = material.emissive();
        let smooth = self.info.use_ao && material.ambient_occlusion().get(self.info.default_ao);
        if smooth {
            self.ao
                .compute(self.view, &mut *self.sampler, self.info.pos, &*quad, self.is_vanilla);
            shade_smooth(quad, self.ao.ao(), self.ao.light(), emissive);
        } else {
            let shade = flat_shade(self.view, &*quad, !material.disable_diffuse());
            let brightness = flat_brightness(self.view, &mut *self.sampler, &*quad, self.info.pos);
            shade_flat(quad, shade, brightness, emissive);
        }

        if !material.disable_color_index() {
            if let Some(index) = quad.color_index() {
                let tint = self
                    .colors
                    .color(self.info.block, Some(self.view), Some(self.info.pos), index);
                colorize(quad, tint);
            }
        }

        let layer = self.info.effective_layer(material.blend_mode());
        buffer_quad(quad, &self.pose, self.overlay, self.sinks.sink(layer));
    }
}

/// `RenderContext` handed to block models for one block.
pub(crate) struct BlockPass<'a> {
    pub quad: &'a mut MutableQuadView,
    pub tess: BlockTessellator<'a>,
}

impl RenderContext for BlockPass<'_> {
    fn emitter(&mut self) -> QuadEmitter<'_> {
        QuadEmitter::new(&mut *self.quad, &mut self.tess)
    }

    fn push_transform(&mut self, transform: Arc<dyn QuadTransform>) {
        self.tess.transforms.push(transform);
    }

    fn pop_transform(&mut self) {
        self.tess.transforms.pop();
    }

    fn has_transform(&self) -> bool {
        !self.tess.transforms.is_empty()
    }
}

/// Runs `model` for the block described by `tess.info`.
///
/// A panic inside the model or the tessellator is returned as its message,
/// with the transform stack, quad cursor and AO memo reset. Leaving the
/// transform stack unbalanced panics.
pub(crate) fn emit_block<'a>(
    model: &dyn BlockModel,
    quad: &'a mut MutableQuadView,
    tess: BlockTessellator<'a>,
    seed: u64,
) -> Result<(), String> {
    let view = tess.view;
    let block = tess.info.block;
    let pos = tess.info.pos;
    let depth = tess.transforms.depth();
    let mut pass = BlockPass { quad, tess };
    let mut rng = StdRng::seed_from_u64(seed);

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        model.emit_block_quads(view, block, pos, &mut rng, &mut pass);
    }));
    match outcome {
        Ok(()) => {
            assert_eq!(
                pass.tess.transforms.depth(),
                depth,
                "block model left the transform stack unbalanced"
            );
            Ok(())
        }
        Err(payload) => {
            pass.tess.transforms.clear();
            pass.quad.clear();
            pass.tess.ao.clear();
            Err(panic_message(payload))
        }
    }
}
