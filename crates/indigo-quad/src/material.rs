use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// GPU pipeline bucket a quad is routed to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderLayer {
    Solid,
    CutoutMipped,
    Cutout,
    Translucent,
}

impl RenderLayer {
    pub const ALL: [RenderLayer; 4] = [
        RenderLayer::Solid,
        RenderLayer::CutoutMipped,
        RenderLayer::Cutout,
        RenderLayer::Translucent,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Blend mode of a material. `Default` defers to the block's or item's own layer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Default = 0,
    Solid = 1,
    CutoutMipped = 2,
    Cutout = 3,
    Translucent = 4,
}

impl BlendMode {
    #[inline]
    pub fn layer(self) -> Option<RenderLayer> {
        match self {
            BlendMode::Default => None,
            BlendMode::Solid => Some(RenderLayer::Solid),
            BlendMode::CutoutMipped => Some(RenderLayer::CutoutMipped),
            BlendMode::Cutout => Some(RenderLayer::Cutout),
            BlendMode::Translucent => Some(RenderLayer::Translucent),
        }
    }

    #[inline]
    fn from_bits(bits: u16) -> BlendMode {
        match bits {
            1 => BlendMode::Solid,
            2 => BlendMode::CutoutMipped,
            3 => BlendMode::Cutout,
            4 => BlendMode::Translucent,
            _ => BlendMode::Default,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TriState {
    #[default]
    Default = 0,
    True = 1,
    False = 2,
}

impl TriState {
    #[inline]
    pub fn of(value: bool) -> TriState {
        if value { TriState::True } else { TriState::False }
    }

    #[inline]
    pub fn get(self, fallback: bool) -> bool {
        match self {
            TriState::Default => fallback,
            TriState::True => true,
            TriState::False => false,
        }
    }

    #[inline]
    fn from_bits(bits: u16) -> TriState {
        match bits {
            1 => TriState::True,
            2 => TriState::False,
            _ => TriState::Default,
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(TriState::Default, TriState::of)
    }
}

const BLEND_SHIFT: u16 = 0;
const BLEND_MASK: u16 = 0b111;
const COLOR_DISABLE_FLAG: u16 = 1 << 3;
const EMISSIVE_FLAG: u16 = 1 << 4;
const DIFFUSE_DISABLE_FLAG: u16 = 1 << 5;
const AO_SHIFT: u16 = 6;
const GLINT_SHIFT: u16 = 8;
const TRI_MASK: u16 = 0b11;

/// Immutable shading policy shared by many quads. Packs into 10 bits.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct RenderMaterial(u16);

impl RenderMaterial {
    pub const STANDARD: RenderMaterial = RenderMaterial(0);

    #[inline]
    pub fn bits(self) -> u32 {
        self.0 as u32
    }

    /// Rebuilds a material from bits produced by `bits()`.
    #[inline]
    pub fn from_bits(bits: u32) -> RenderMaterial {
        RenderMaterial((bits & 0x3FF) as u16)
    }

    #[inline]
    pub fn blend_mode(self) -> BlendMode {
        BlendMode::from_bits((self.0 >> BLEND_SHIFT) & BLEND_MASK)
    }

    #[inline]
    pub fn disable_color_index(self) -> bool {
        self.0 & COLOR_DISABLE_FLAG != 0
    }

    #[inline]
    pub fn emissive(self) -> bool {
        self.0 & EMISSIVE_FLAG != 0
    }

    #[inline]
    pub fn disable_diffuse(self) -> bool {
        self.0 & DIFFUSE_DISABLE_FLAG != 0
    }

    #[inline]
    pub fn ambient_occlusion(self) -> TriState {
        TriState::from_bits((self.0 >> AO_SHIFT) & TRI_MASK)
    }

    #[inline]
    pub fn glint(self) -> TriState {
        TriState::from_bits((self.0 >> GLINT_SHIFT) & TRI_MASK)
    }
}

/// Builder for `RenderMaterial`. Reusable: `find()` does not reset it.
#[derive(Clone, Debug, Default)]
pub struct MaterialFinder {
    bits: u16,
}

impl MaterialFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blend_mode(&mut self, mode: BlendMode) -> &mut Self {
        self.bits = (self.bits & !(BLEND_MASK << BLEND_SHIFT)) | ((mode as u16) << BLEND_SHIFT);
        self
    }

    pub fn disable_color_index(&mut self, disable: bool) -> &mut Self {
        self.flag(COLOR_DISABLE_FLAG, disable)
    }

    pub fn emissive(&mut self, emissive: bool) -> &mut Self {
        self.flag(EMISSIVE_FLAG, emissive)
    }

    pub fn disable_diffuse(&mut self, disable: bool) -> &mut Self {
        self.flag(DIFFUSE_DISABLE_FLAG, disable)
    }

    pub fn ambient_occlusion(&mut self, ao: TriState) -> &mut Self {
        self.bits = (self.bits & !(TRI_MASK << AO_SHIFT)) | ((ao as u16) << AO_SHIFT);
        self
    }

    pub fn glint(&mut self, glint: TriState) -> &mut Self {
        self.bits = (self.bits & !(TRI_MASK << GLINT_SHIFT)) | ((glint as u16) << GLINT_SHIFT);
        self
    }

    pub fn copy_from(&mut self, material: RenderMaterial) -> &mut Self {
        self.bits = material.0;
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.bits = 0;
        self
    }

    pub fn find(&self) -> RenderMaterial {
        RenderMaterial(self.bits)
    }

    fn flag(&mut self, flag: u16, on: bool) -> &mut Self {
        if on {
            self.bits |= flag;
        } else {
            self.bits &= !flag;
        }
        self
    }
}

#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("duplicate material name: {0}")]
    DuplicateName(String),
}

/// Named materials. `"standard"` is always present.
#[derive(Clone, Debug)]
pub struct MaterialRegistry {
    by_name: HashMap<String, RenderMaterial>,
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialRegistry {
    pub const STANDARD_NAME: &'static str = "standard";

    pub fn new() -> Self {
        let mut by_name = HashMap::new();
        by_name.insert(Self::STANDARD_NAME.to_string(), RenderMaterial::STANDARD);
        Self { by_name }
    }

    /// Registers `material` under `name`. Returns false and leaves the
    /// existing entry in place if the name is taken.
    pub fn register(&mut self, name: &str, material: RenderMaterial) -> bool {
        if self.by_name.contains_key(name) {
            return false;
        }
        self.by_name.insert(name.to_string(), material);
        true
    }

    pub fn get(&self, name: &str) -> Option<RenderMaterial> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, MaterialError> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut registry = MaterialRegistry::new();
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        // Sorted so duplicate errors are reported deterministically.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let mut finder = MaterialFinder::new();
        for (name, entry) in entries {
            finder
                .clear()
                .blend_mode(entry.blend_mode)
                .emissive(entry.emissive)
                .disable_color_index(entry.disable_color_index)
                .disable_diffuse(entry.disable_diffuse)
                .ambient_occlusion(entry.ambient_occlusion.into())
                .glint(entry.glint.into());
            if !registry.register(&name, finder.find()) {
                return Err(MaterialError::DuplicateName(name));
            }
        }
        Ok(registry)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MaterialError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
struct MaterialsConfig {
    #[serde(default)]
    materials: HashMap<String, MaterialEntry>,
}

// glow = { emissive = true, blend_mode = "translucent", ambient_occlusion = false }
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MaterialEntry {
    #[serde(default)]
    blend_mode: BlendMode,
    #[serde(default)]
    emissive: bool,
    #[serde(default)]
    disable_color_index: bool,
    #[serde(default)]
    disable_diffuse: bool,
    ambient_occlusion: Option<bool>,
    glint: Option<bool>,
}
