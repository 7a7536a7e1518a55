mod common;

use std::sync::{Arc, Mutex};

use common::emit_face;
use indigo_geom::{Face, Pose};
use indigo_quad::light::FULL_BRIGHTNESS;
use indigo_quad::{BlendMode, MaterialFinder, MutableQuadView, RenderLayer, RenderMaterial, TriState};
use indigo_render::{
    DEFAULT_OVERLAY, ItemColors, ItemDisplay, ItemModel, ItemRenderContext, ItemRenderParams, ItemSinkKey,
    ItemSinks, ItemStack, MeshBuild, NoTint, RenderContext, VertexSink,
};
use rand::RngCore;
use rand::rngs::StdRng;

#[derive(Default)]
struct RecordingSinks {
    keys: Vec<ItemSinkKey>,
    builds: Vec<MeshBuild>,
}

impl ItemSinks for RecordingSinks {
    fn open(&mut self, key: ItemSinkKey) -> usize {
        self.keys.push(key);
        self.builds.push(MeshBuild::default());
        self.builds.len() - 1
    }

    fn sink(&mut self, slot: usize) -> &mut dyn VertexSink {
        &mut self.builds[slot]
    }
}

struct FnItem<F>(F);

impl<F> ItemModel for FnItem<F>
where
    F: Fn(&mut StdRng, &mut dyn RenderContext) + Send + Sync,
{
    fn emit_item_quads(&self, _: &ItemStack, rng: &mut StdRng, ctx: &mut dyn RenderContext) {
        (self.0)(rng, ctx)
    }
}

fn params(display: ItemDisplay, light: u32) -> ItemRenderParams {
    ItemRenderParams {
        display,
        pose: Pose::IDENTITY,
        light,
        overlay: DEFAULT_OVERLAY,
    }
}

fn render(model: &dyn ItemModel, stack: &ItemStack, colors: &dyn ItemColors, p: &ItemRenderParams) -> RecordingSinks {
    let mut sinks = RecordingSinks::default();
    ItemRenderContext::new().render(model, stack, colors, p, &mut sinks);
    sinks
}

#[test]
fn plain_item_is_translucent_and_direct_in_gui() {
    let model = FnItem(|_: &mut StdRng, ctx: &mut dyn RenderContext| {
        emit_face(ctx, Face::PosZ, RenderMaterial::STANDARD, 0xFFFF_FFFF, 0);
        emit_face(ctx, Face::NegZ, RenderMaterial::STANDARD, 0xFFFF_FFFF, 0);
    });
    let stack = ItemStack::new(7);

    let gui = render(&model, &stack, &NoTint, &params(ItemDisplay::Gui, 0));
    assert_eq!(
        gui.keys,
        vec![ItemSinkKey {
            translucent: true,
            glint: false,
            direct: true
        }]
    );
    assert_eq!(gui.builds[0].quad_count(), 2);

    let ground = render(&model, &stack, &NoTint, &params(ItemDisplay::Ground, 0));
    assert!(!ground.keys[0].direct);
}

#[test]
fn block_items_route_by_layer_material_and_glint() {
    let translucent = MaterialFinder::new().blend_mode(BlendMode::Translucent).find();
    let no_glint = MaterialFinder::new().glint(TriState::False).find();
    let model = FnItem(move |_: &mut StdRng, ctx: &mut dyn RenderContext| {
        emit_face(ctx, Face::PosY, RenderMaterial::STANDARD, 0xFFFF_FFFF, 0);
        emit_face(ctx, Face::PosY, translucent, 0xFFFF_FFFF, 0);
        emit_face(ctx, Face::NegY, RenderMaterial::STANDARD, 0xFFFF_FFFF, 0);
        emit_face(ctx, Face::NegY, no_glint, 0xFFFF_FFFF, 0);
    });
    let stack = ItemStack {
        block_layer: Some(RenderLayer::Solid),
        has_glint: true,
        ..ItemStack::new(1)
    };
    let out = render(&model, &stack, &NoTint, &params(ItemDisplay::FirstPersonRightHand, 0));
    let key = |translucent, glint, direct| ItemSinkKey {
        translucent,
        glint,
        direct,
    };
    assert_eq!(
        out.keys,
        vec![key(false, true, false), key(true, true, true), key(false, false, false)]
    );
    assert_eq!(out.builds[0].quad_count(), 2);
    assert_eq!(out.builds[1].quad_count(), 1);
    assert_eq!(out.builds[2].quad_count(), 1);
}

#[test]
fn light_is_floored_by_caller_and_emissive_is_full() {
    let emissive = MaterialFinder::new().emissive(true).find();
    let model = FnItem(move |_: &mut StdRng, ctx: &mut dyn RenderContext| {
        emit_face(ctx, Face::PosY, RenderMaterial::STANDARD, 0xFFFF_FFFF, 0x0000_00F0);
        emit_face(ctx, Face::PosY, emissive, 0xFFFF_FFFF, 0);
    });
    let out = render(&model, &ItemStack::new(3), &NoTint, &params(ItemDisplay::Gui, 0x0080_0040));
    let light = &out.builds[0].light;
    assert_eq!(&light[..4], &[0x0080_00F0; 4]);
    assert_eq!(&light[4..], &[FULL_BRIGHTNESS; 4]);
}

#[test]
fn no_diffuse_shading_or_culling() {
    let model = FnItem(|_: &mut StdRng, ctx: &mut dyn RenderContext| {
        emit_face(ctx, Face::NegY, RenderMaterial::STANDARD, 0xFF80_8080, 0);
    });
    let out = render(&model, &ItemStack::new(3), &NoTint, &params(ItemDisplay::Gui, 0));
    assert_eq!(out.builds[0].rgba(0), [0x80, 0x80, 0x80, 0xFF]);
    assert_eq!(out.builds[0].overlay, vec![DEFAULT_OVERLAY; 4]);
}

struct Dye(u32);

impl ItemColors for Dye {
    fn color(&self, stack: &ItemStack, tint_index: u32) -> u32 {
        assert_eq!(stack.item, 9);
        assert_eq!(tint_index, 2);
        self.0
    }
}

#[test]
fn item_tint_uses_item_colors() {
    let model = FnItem(|_: &mut StdRng, ctx: &mut dyn RenderContext| {
        let mut e = ctx.emitter();
        common::face_quad(&mut e, Face::PosY, RenderMaterial::STANDARD, 0xFFFF_FFFF, 0).set_color_index(Some(2));
        e.emit();
    });
    let out = render(&model, &ItemStack::new(9), &Dye(0x0000_00FF), &params(ItemDisplay::Gui, 0));
    assert_eq!(out.builds[0].rgba(0), [0, 0, 0xFF, 0xFF]);
}

#[test]
fn seed_is_fixed_and_transforms_apply() {
    let draws = Arc::new(Mutex::new(Vec::new()));
    let seen = draws.clone();
    let model = FnItem(move |rng: &mut StdRng, ctx: &mut dyn RenderContext| {
        seen.lock().unwrap().push(rng.next_u64());
        ctx.push_transform(Arc::new(|q: &mut MutableQuadView| {
            q.set_colors(0xFF00_0000);
            true
        }));
        emit_face(ctx, Face::PosY, RenderMaterial::STANDARD, 0xFFFF_FFFF, 0);
        ctx.pop_transform();
    });
    let a = render(&model, &ItemStack::new(1), &NoTint, &params(ItemDisplay::Gui, 0));
    let _ = render(&model, &ItemStack::new(1), &NoTint, &params(ItemDisplay::Gui, 0));
    let draws = draws.lock().unwrap();
    assert_eq!(draws[0], draws[1]);
    assert_eq!(a.builds[0].rgba(0), [0, 0, 0, 0xFF]);
}
