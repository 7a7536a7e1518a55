use std::sync::Arc;

use indigo_geom::Pose;
use indigo_quad::light::{FULL_BRIGHTNESS, max_light};
use indigo_quad::{BlendMode, MutableQuadView, QuadEmitter, QuadSink, QuadTransform, QuadView, RenderLayer, TransformStack};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::colors::ItemColors;
use crate::model::{ItemModel, RenderContext};
use crate::renderer::{buffer_quad, colorize};
use crate::sink::VertexSink;

const ITEM_SEED: u64 = 42;

/// The item being drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemStack {
    pub item: u32,
    pub count: u8,
    /// Render layer of the placed block, for block items.
    pub block_layer: Option<RenderLayer>,
    pub has_glint: bool,
}

impl ItemStack {
    pub fn new(item: u32) -> Self {
        Self {
            item,
            count: 1,
            block_layer: None,
            has_glint: false,
        }
    }

    /// Non-block items and blocks on the translucent layer draw translucent by default.
    pub fn is_default_translucent(&self) -> bool {
        self.block_layer.is_none_or(|l| l == RenderLayer::Translucent)
    }
}

/// Where the item is being displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ItemDisplay {
    #[default]
    None,
    ThirdPersonLeftHand,
    ThirdPersonRightHand,
    FirstPersonLeftHand,
    FirstPersonRightHand,
    Head,
    Gui,
    Ground,
    Fixed,
}

impl ItemDisplay {
    /// Translucent output bypasses sorting for these displays.
    #[inline]
    pub fn is_direct(self) -> bool {
        matches!(
            self,
            ItemDisplay::Gui | ItemDisplay::FirstPersonLeftHand | ItemDisplay::FirstPersonRightHand
        )
    }
}

/// Output routing for one class of item quads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemSinkKey {
    pub translucent: bool,
    pub glint: bool,
    pub direct: bool,
}

/// Supplies vertex sinks for item rendering.
///
/// `open` is called at most once per distinct key during one render call and
/// returns a slot; later quads with the same key go straight to `sink(slot)`.
pub trait ItemSinks {
    fn open(&mut self, key: ItemSinkKey) -> usize;
    fn sink(&mut self, slot: usize) -> &mut dyn VertexSink;
}

#[derive(Clone, Copy, Debug)]
pub struct ItemRenderParams {
    pub display: ItemDisplay,
    pub pose: Pose,
    /// Packed light at the item; quads never go darker than this.
    pub light: u32,
    pub overlay: u32,
}

struct ItemTessellator<'a> {
    transforms: &'a mut TransformStack,
    stack: &'a ItemStack,
    colors: &'a dyn ItemColors,
    sinks: &'a mut dyn ItemSinks,
    slots: [Option<usize>; 4],
    params: &'a ItemRenderParams,
}

impl ItemTessellator<'_> {
    fn slot(&mut self, translucent: bool, glint: bool) -> usize {
        let i = (translucent as usize) << 1 | glint as usize;
        match self.slots[i] {
            Some(slot) => slot,
            None => {
                let slot = self.sinks.open(ItemSinkKey {
                    translucent,
                    glint,
                    direct: translucent && self.params.display.is_direct(),
                });
                self.slots[i] = Some(slot);
                slot
            }
        }
    }
}

impl QuadSink for ItemTessellator<'_> {
    fn accept(&mut self, quad: &mut MutableQuadView) {
        if !self.transforms.apply(quad) {
            return;
        }
        quad.compute_geometry();

        let material = quad.material();
        let light = if material.emissive() {
            FULL_BRIGHTNESS
        } else {
            self.params.light
        };
        for i in 0..4 {
            let l = max_light(quad.lightmap(i), light);
            quad.set_lightmap(i, l);
        }

        if !material.disable_color_index() {
            if let Some(index) = quad.color_index() {
                colorize(quad, self.colors.color(self.stack, index));
            }
        }

        let translucent = match material.blend_mode() {
            BlendMode::Default => self.stack.is_default_translucent(),
            BlendMode::Translucent => true,
            _ => false,
        };
        let glint = material.glint().get(self.stack.has_glint);
        let slot = self.slot(translucent, glint);
        buffer_quad(quad, &self.params.pose, self.params.overlay, self.sinks.sink(slot));
    }
}

struct ItemPass<'a> {
    quad: &'a mut MutableQuadView,
    tess: ItemTessellator<'a>,
}

impl RenderContext for ItemPass<'_> {
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

/// Renders held, dropped and GUI items. No culling, AO or diffuse shading.
#[derive(Default)]
pub struct ItemRenderContext {
    quad: MutableQuadView,
    transforms: TransformStack,
}

impl ItemRenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        model: &dyn ItemModel,
        stack: &ItemStack,
        colors: &dyn ItemColors,
        params: &ItemRenderParams,
        sinks: &mut dyn ItemSinks,
    ) {
        self.transforms.clear();
        self.quad.clear();
        let mut pass = ItemPass {
            quad: &mut self.quad,
            tess: ItemTessellator {
                transforms: &mut self.transforms,
                stack,
                colors,
                sinks,
                slots: [None; 4],
                params,
            },
        };
        let mut rng = StdRng::seed_from_u64(ITEM_SEED);
        model.emit_item_quads(stack, &mut rng, &mut pass);
        assert!(
            pass.tess.transforms.is_empty(),
            "item model left the transform stack unbalanced"
        );
    }
}
