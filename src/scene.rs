//! Scene files: texture environment state written with GL enum names
//!
//! ```toml
//! [[unit]]
//! enabled = true
//! env_color = [1.0, 0.0, 0.0, 1.0]
//!
//! [unit.rgb]
//! mode = "GL_MODULATE"
//! sources = ["GL_TEXTURE", "GL_PREVIOUS"]
//! operands = ["GL_SRC_COLOR", "GL_SRC_COLOR"]
//! ```
//!
//! Omitted channels and arguments keep their GL initial values. Values may
//! also be given as hex (`"0x8574"`) to feed raw enums through.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use nc_nv04::combiner::MAX_ARGS;
use nc_nv04::gl;
use nc_nv04::methods::TEXTURE_UNITS;
use nc_nv04::state::{ChannelCombine, TexUnitState};
use nc_nv04::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitScene>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnitScene {
    pub enabled: bool,
    pub env_color: [f32; 4],
    pub rgb: Option<ChannelScene>,
    pub alpha: Option<ChannelScene>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelScene {
    pub mode: Option<String>,
    pub sources: Vec<String>,
    pub operands: Vec<String>,
    pub scale_shift: u32,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let scene: Self = toml::from_str(content)?;
        if scene.units.len() > TEXTURE_UNITS {
            bail!(
                "scene has {} texture units, hardware has {}",
                scene.units.len(),
                TEXTURE_UNITS
            );
        }
        Ok(scene)
    }

    /// Write the scene into the context's texture units
    pub fn apply(&self, ctx: &mut Context) -> Result<()> {
        for (unit, (scene, state)) in self.units.iter().zip(ctx.tex_units.iter_mut()).enumerate() {
            *state = scene
                .to_state()
                .with_context(|| format!("texture unit {}", unit))?;
        }
        Ok(())
    }
}

impl UnitScene {
    fn to_state(&self) -> Result<TexUnitState> {
        let mut state = TexUnitState {
            enabled: self.enabled,
            env_color: self.env_color,
            ..TexUnitState::default()
        };
        if let Some(rgb) = &self.rgb {
            state.combine.rgb = rgb.apply_to(state.combine.rgb).context("rgb")?;
        }
        if let Some(alpha) = &self.alpha {
            state.combine.alpha = alpha.apply_to(state.combine.alpha).context("alpha")?;
        }
        Ok(state)
    }
}

impl ChannelScene {
    fn apply_to(&self, mut combine: ChannelCombine) -> Result<ChannelCombine> {
        if self.sources.len() > MAX_ARGS || self.operands.len() > MAX_ARGS {
            bail!("at most {} arguments per channel", MAX_ARGS);
        }
        if let Some(mode) = &self.mode {
            combine.mode = parse_enum(mode)?;
        }
        for (slot, name) in combine.source.iter_mut().zip(&self.sources) {
            *slot = parse_enum(name)?;
        }
        for (slot, name) in combine.operand.iter_mut().zip(&self.operands) {
            *slot = parse_enum(name)?;
        }
        combine.scale_shift = self.scale_shift;
        Ok(combine)
    }
}

fn parse_enum(value: &str) -> Result<u32> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        return u32::from_str_radix(hex, 16).with_context(|| format!("bad hex enum {:?}", value));
    }
    match gl::enum_by_name(value) {
        Some(v) => Ok(v),
        None => bail!("unknown GL enum {:?}", value),
    }
}
