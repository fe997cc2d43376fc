//! Combiner request: one channel of one unit's combine state, typed

use nc_core::CombinerError;

use super::types::{Arg, ArgOperand, ArgSource, Channel, CombineMode, MAX_ARGS};
use crate::methods::TEXTURE_UNITS;
use crate::state::TexUnitState;

/// Everything the synthesizer needs to build one combiner word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinerRequest {
    pub unit: usize,
    pub channel: Channel,
    pub mode: CombineMode,
    /// Arguments `0..mode.arity()`; the rest are `None`
    pub args: [Option<Arg>; MAX_ARGS],
    /// Double the combiner output
    pub double_scale: bool,
}

impl CombinerRequest {
    /// Create a request from typed arguments.
    ///
    /// `args` must hold at least `mode.arity()` entries; anything past the
    /// arity is ignored.
    pub fn new(
        unit: usize,
        channel: Channel,
        mode: CombineMode,
        args: &[Arg],
        double_scale: bool,
    ) -> Result<Self, CombinerError> {
        check_unit(unit)?;
        let arity = mode.arity();
        if args.len() < arity {
            return Err(CombinerError::MissingArgument {
                index: args.len(),
                arity,
            });
        }

        let mut slots = [None; MAX_ARGS];
        for (slot, arg) in slots.iter_mut().zip(args.iter().take(arity)) {
            *slot = Some(*arg);
        }

        Ok(Self {
            unit,
            channel,
            mode,
            args: slots,
            double_scale,
        })
    }

    /// Extract the request for `channel` from a texture unit's raw GL state.
    ///
    /// Only the arguments the mode consumes are read, so stale values left
    /// in unused argument registers never cause a failure.
    pub fn build(state: &TexUnitState, unit: usize, channel: Channel) -> Result<Self, CombinerError> {
        check_unit(unit)?;
        let raw = state.combine.channel(channel);
        let mode = CombineMode::try_from(raw.mode)?;

        let mut args = [None; MAX_ARGS];
        for (i, slot) in args.iter_mut().enumerate().take(mode.arity()) {
            let source = ArgSource::try_from(raw.source[i])?;
            let operand = ArgOperand::try_from(raw.operand[i])?;
            *slot = Some(Arg::new(source, operand));
        }

        Ok(Self {
            unit,
            channel,
            mode,
            args,
            double_scale: raw.scale_shift != 0,
        })
    }

    /// Argument `index`
    pub fn arg(&self, index: usize) -> Result<Arg, CombinerError> {
        self.args
            .get(index)
            .copied()
            .flatten()
            .ok_or(CombinerError::MissingArgument {
                index,
                arity: self.mode.arity(),
            })
    }
}

fn check_unit(unit: usize) -> Result<(), CombinerError> {
    if unit < TEXTURE_UNITS {
        Ok(())
    } else {
        Err(CombinerError::InvalidUnit(unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl;
    use crate::state::ChannelCombine;

    fn unit_with(rgb: ChannelCombine, alpha: ChannelCombine) -> TexUnitState {
        let mut state = TexUnitState::default();
        state.enabled = true;
        state.combine.rgb = rgb;
        state.combine.alpha = alpha;
        state
    }

    #[test]
    fn test_build_reads_requested_channel() {
        let state = unit_with(
            ChannelCombine::new(
                gl::GL_MODULATE,
                &[(gl::GL_TEXTURE, gl::GL_SRC_COLOR), (gl::GL_PRIMARY_COLOR, gl::GL_SRC_COLOR)],
            ),
            ChannelCombine::new(gl::GL_REPLACE, &[(gl::GL_CONSTANT, gl::GL_SRC_ALPHA)])
                .with_scale_shift(1),
        );

        let color = CombinerRequest::build(&state, 0, Channel::Color).unwrap();
        assert_eq!(color.mode, CombineMode::Modulate);
        assert_eq!(
            color.arg(1).unwrap(),
            Arg::new(ArgSource::PrimaryColor, ArgOperand::SrcColor)
        );
        assert!(!color.double_scale);

        let alpha = CombinerRequest::build(&state, 0, Channel::Alpha).unwrap();
        assert_eq!(alpha.mode, CombineMode::Replace);
        assert_eq!(alpha.args[1], None);
        assert!(alpha.double_scale);
    }

    #[test]
    fn test_build_ignores_arguments_past_arity() {
        let mut rgb = ChannelCombine::new(gl::GL_REPLACE, &[(gl::GL_TEXTURE, gl::GL_SRC_COLOR)]);
        rgb.source[1] = 0xDEAD;
        rgb.operand[2] = 0xBEEF;
        let state = unit_with(rgb, ChannelCombine::default());

        let request = CombinerRequest::build(&state, 1, Channel::Color).unwrap();
        assert_eq!(request.args[0], Some(Arg::new(ArgSource::Texture, ArgOperand::SrcColor)));
        assert_eq!(request.args[1], None);
        assert_eq!(request.args[2], None);
    }

    #[test]
    fn test_build_rejects_unsupported_values() {
        let state = unit_with(
            ChannelCombine::new(gl::GL_DOT3_RGB, &[]),
            ChannelCombine::default(),
        );
        assert_eq!(
            CombinerRequest::build(&state, 0, Channel::Color),
            Err(CombinerError::UnsupportedMode(gl::GL_DOT3_RGB))
        );

        let mut rgb = ChannelCombine::new(
            gl::GL_ADD,
            &[(gl::GL_TEXTURE, gl::GL_SRC_COLOR), (gl::GL_TEXTURE, gl::GL_SRC_COLOR)],
        );
        rgb.source[1] = gl::GL_SRC_ALPHA;
        let state = unit_with(rgb, ChannelCombine::default());
        assert_eq!(
            CombinerRequest::build(&state, 0, Channel::Color),
            Err(CombinerError::UnsupportedSource(gl::GL_SRC_ALPHA))
        );
    }

    #[test]
    fn test_unit_out_of_range() {
        let state = TexUnitState::default();
        assert_eq!(
            CombinerRequest::build(&state, 2, Channel::Alpha),
            Err(CombinerError::InvalidUnit(2))
        );
    }

    #[test]
    fn test_new_requires_arity() {
        let tex = Arg::new(ArgSource::Texture, ArgOperand::SrcColor);
        let err = CombinerRequest::new(0, Channel::Color, CombineMode::Interpolate, &[tex, tex], false)
            .unwrap_err();
        assert_eq!(err, CombinerError::MissingArgument { index: 2, arity: 3 });

        let request =
            CombinerRequest::new(0, Channel::Color, CombineMode::Replace, &[tex, tex], true).unwrap();
        assert_eq!(request.args, [Some(tex), None, None]);
        assert!(request.arg(1).is_err());
    }
}
