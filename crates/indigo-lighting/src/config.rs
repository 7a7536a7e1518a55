use serde::Deserialize;

/// Which AO sampler handles which models.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AoMode {
    /// Vanilla-equivalent sampling for every quad.
    Emulate,
    /// Vanilla-equivalent for vanilla models, enhanced for the rest.
    #[default]
    Hybrid,
    /// Enhanced sampling for every quad.
    Enhanced,
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ao_mode: AoMode,
    /// Test corner clearness at the light position rather than one step further out.
    pub fix_smooth_lighting_offset: bool,
    /// Replace zero samples by the non-zero minimum instead of the center.
    pub fix_mean_light_calculation: bool,
    /// Luminous blocks cast no ambient occlusion.
    pub fix_luminous_occlusion: bool,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ao_mode: AoMode::Hybrid,
            fix_smooth_lighting_offset: true,
            fix_mean_light_calculation: true,
            fix_luminous_occlusion: false,
        }
    }
}
