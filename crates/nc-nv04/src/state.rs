//! Texture environment state read by the translator

use bitflags::bitflags;
use nc_core::config::{HardwareConfig, TriangleClass};

use crate::combiner::types::{Channel, MAX_ARGS};
use crate::gl;
use crate::methods::{NV04_MULTITEX_TRIANGLE, NV04_TEXTURED_TRIANGLE, TEXTURE_UNITS};

/// Raw GL combine state of one channel (`*_RGB` or `*_ALPHA`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelCombine {
    pub mode: u32,
    pub source: [u32; MAX_ARGS],
    pub operand: [u32; MAX_ARGS],
    /// log2 of the output scale (`GL_RGB_SCALE` / `GL_ALPHA_SCALE`)
    pub scale_shift: u32,
}

impl ChannelCombine {
    /// Combine state with `mode` and the given (source, operand) pairs.
    ///
    /// Arguments not listed keep their defaults.
    pub fn new(mode: u32, args: &[(u32, u32)]) -> Self {
        let mut state = Self {
            mode,
            ..Self::default()
        };
        for (i, &(source, operand)) in args.iter().take(MAX_ARGS).enumerate() {
            state.source[i] = source;
            state.operand[i] = operand;
        }
        state
    }

    pub fn with_scale_shift(mut self, scale_shift: u32) -> Self {
        self.scale_shift = scale_shift;
        self
    }

    fn default_alpha() -> Self {
        Self {
            operand: [gl::GL_SRC_ALPHA; MAX_ARGS],
            ..Self::default()
        }
    }
}

impl Default for ChannelCombine {
    /// GL initial values for the RGB channel
    fn default() -> Self {
        Self {
            mode: gl::GL_MODULATE,
            source: [gl::GL_TEXTURE, gl::GL_PREVIOUS, gl::GL_CONSTANT],
            operand: [gl::GL_SRC_COLOR, gl::GL_SRC_COLOR, gl::GL_SRC_ALPHA],
            scale_shift: 0,
        }
    }
}

/// Combine state of both channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombineState {
    pub rgb: ChannelCombine,
    pub alpha: ChannelCombine,
}

impl CombineState {
    pub fn channel(&self, channel: Channel) -> &ChannelCombine {
        match channel {
            Channel::Color => &self.rgb,
            Channel::Alpha => &self.alpha,
        }
    }
}

impl Default for CombineState {
    fn default() -> Self {
        Self {
            rgb: ChannelCombine::default(),
            alpha: ChannelCombine::default_alpha(),
        }
    }
}

/// Per texture unit state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexUnitState {
    /// A complete texture is bound and sampling is enabled
    pub enabled: bool,
    pub combine: CombineState,
    /// `GL_TEXTURE_ENV_COLOR`, RGBA in [0, 1]
    pub env_color: [f32; 4],
}

impl Default for TexUnitState {
    fn default() -> Self {
        Self {
            enabled: false,
            combine: CombineState::default(),
            env_color: [0.0; 4],
        }
    }
}

/// 3D engine object bound on the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    pub class: u32,
    pub subchannel: u8,
}

impl Engine {
    pub fn new(class: u32, subchannel: u8) -> Self {
        Self { class, subchannel }
    }

    pub fn from_config(config: &HardwareConfig) -> Self {
        let class = match config.triangle_class {
            TriangleClass::MultitexTriangle => NV04_MULTITEX_TRIANGLE,
            TriangleClass::TexturedTriangle => NV04_TEXTURED_TRIANGLE,
        };
        Self::new(class, config.subchannel)
    }

    /// Whether the object exposes the multitexture register combiners
    pub fn has_multitex(&self) -> bool {
        self.class == NV04_MULTITEX_TRIANGLE
    }
}

bitflags! {
    /// State groups that need to be re-emitted before the next draw
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyState: u32 {
        const BLEND = 1 << 0;
        const TEX_ENV0 = 1 << 1;
        const TEX_ENV1 = 1 << 2;
    }
}

impl DirtyState {
    /// Dirty bit of texture unit `unit`'s environment
    pub fn tex_env(unit: usize) -> Self {
        match unit {
            0 => DirtyState::TEX_ENV0,
            1 => DirtyState::TEX_ENV1,
            _ => DirtyState::empty(),
        }
    }
}

/// Rendering context as seen by the translator
#[derive(Debug, Clone)]
pub struct Context {
    pub engine: Engine,
    pub tex_units: [TexUnitState; TEXTURE_UNITS],
    pub dirty: DirtyState,
}

impl Context {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            tex_units: [TexUnitState::default(); TEXTURE_UNITS],
            dirty: DirtyState::empty(),
        }
    }

    /// Mark state groups for re-emission
    pub fn mark_dirty(&mut self, state: DirtyState) {
        self.dirty |= state;
    }

    /// Take and clear the dirty set
    pub fn take_dirty(&mut self) -> DirtyState {
        std::mem::replace(&mut self.dirty, DirtyState::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_defaults() {
        let state = CombineState::default();
        assert_eq!(state.rgb.mode, gl::GL_MODULATE);
        assert_eq!(state.rgb.source, [gl::GL_TEXTURE, gl::GL_PREVIOUS, gl::GL_CONSTANT]);
        assert_eq!(state.rgb.operand[2], gl::GL_SRC_ALPHA);
        assert_eq!(state.alpha.operand, [gl::GL_SRC_ALPHA; 3]);
        assert_eq!(state.channel(Channel::Alpha).scale_shift, 0);
    }

    #[test]
    fn test_channel_combine_new_keeps_defaults() {
        let state = ChannelCombine::new(gl::GL_REPLACE, &[(gl::GL_CONSTANT, gl::GL_SRC_ALPHA)]);
        assert_eq!(state.source, [gl::GL_CONSTANT, gl::GL_PREVIOUS, gl::GL_CONSTANT]);
        assert_eq!(state.operand[0], gl::GL_SRC_ALPHA);
    }

    #[test]
    fn test_engine_capability() {
        assert!(Engine::new(NV04_MULTITEX_TRIANGLE, 3).has_multitex());
        assert!(!Engine::new(NV04_TEXTURED_TRIANGLE, 3).has_multitex());

        let config = HardwareConfig {
            triangle_class: TriangleClass::TexturedTriangle,
            ..HardwareConfig::default()
        };
        assert!(!Engine::from_config(&config).has_multitex());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut ctx = Context::new(Engine::new(NV04_MULTITEX_TRIANGLE, 3));
        ctx.mark_dirty(DirtyState::BLEND | DirtyState::tex_env(1));
        assert_eq!(ctx.take_dirty(), DirtyState::BLEND | DirtyState::TEX_ENV1);
        assert!(ctx.dirty.is_empty());
        assert_eq!(DirtyState::tex_env(5), DirtyState::empty());
    }
}
