//! Combiner vocabulary: GL-side inputs and hardware-side tokens

use bitflags::bitflags;
use nc_core::CombinerError;

use crate::gl;

/// Maximum number of combine arguments of any mode
pub const MAX_ARGS: usize = 3;

/// Number of hardware inputs on one combiner
pub const SLOT_COUNT: usize = 4;

/// Which half of the texture environment a combiner word is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Color,
    Alpha,
}

impl Channel {
    pub fn is_alpha(self) -> bool {
        self == Channel::Alpha
    }
}

/// Combine function supported by the NV04 combiner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineMode {
    Replace,
    Modulate,
    Add,
    AddSigned,
    Interpolate,
}

impl CombineMode {
    pub const ALL: [CombineMode; 5] = [
        CombineMode::Replace,
        CombineMode::Modulate,
        CombineMode::Add,
        CombineMode::AddSigned,
        CombineMode::Interpolate,
    ];

    /// Number of arguments the mode consumes. Independent of the channel.
    pub fn arity(self) -> usize {
        match self {
            CombineMode::Replace => 1,
            CombineMode::Modulate | CombineMode::Add | CombineMode::AddSigned => 2,
            CombineMode::Interpolate => 3,
        }
    }
}

impl TryFrom<u32> for CombineMode {
    type Error = CombinerError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            gl::GL_REPLACE => Ok(CombineMode::Replace),
            gl::GL_MODULATE => Ok(CombineMode::Modulate),
            gl::GL_ADD => Ok(CombineMode::Add),
            gl::GL_ADD_SIGNED => Ok(CombineMode::AddSigned),
            gl::GL_INTERPOLATE => Ok(CombineMode::Interpolate),
            other => Err(CombinerError::UnsupportedMode(other)),
        }
    }
}

/// Where a combine argument reads its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgSource {
    /// The texture bound to the unit being combined
    Texture,
    Texture0,
    Texture1,
    /// The unit's environment color
    Constant,
    PrimaryColor,
    /// Output of the previous unit's combiner
    Previous,
}

impl TryFrom<u32> for ArgSource {
    type Error = CombinerError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            gl::GL_TEXTURE => Ok(ArgSource::Texture),
            gl::GL_TEXTURE0 => Ok(ArgSource::Texture0),
            gl::GL_TEXTURE1 => Ok(ArgSource::Texture1),
            gl::GL_CONSTANT => Ok(ArgSource::Constant),
            gl::GL_PRIMARY_COLOR => Ok(ArgSource::PrimaryColor),
            gl::GL_PREVIOUS => Ok(ArgSource::Previous),
            other => Err(CombinerError::UnsupportedSource(other)),
        }
    }
}

/// How an argument's source is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgOperand {
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
}

impl ArgOperand {
    /// Reads the alpha component of the source
    pub fn is_alpha(self) -> bool {
        matches!(self, ArgOperand::SrcAlpha | ArgOperand::OneMinusSrcAlpha)
    }

    /// Reads `1 - x` instead of `x`
    pub fn is_one_minus(self) -> bool {
        matches!(
            self,
            ArgOperand::OneMinusSrcColor | ArgOperand::OneMinusSrcAlpha
        )
    }
}

impl TryFrom<u32> for ArgOperand {
    type Error = CombinerError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            gl::GL_SRC_COLOR => Ok(ArgOperand::SrcColor),
            gl::GL_ONE_MINUS_SRC_COLOR => Ok(ArgOperand::OneMinusSrcColor),
            gl::GL_SRC_ALPHA => Ok(ArgOperand::SrcAlpha),
            gl::GL_ONE_MINUS_SRC_ALPHA => Ok(ArgOperand::OneMinusSrcAlpha),
            other => Err(CombinerError::UnsupportedOperand(other)),
        }
    }
}

/// One combine argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arg {
    pub source: ArgSource,
    pub operand: ArgOperand,
}

impl Arg {
    pub const fn new(source: ArgSource, operand: ArgOperand) -> Self {
        Self { source, operand }
    }
}

/// Source selector of a combiner input, in hardware encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HwSource {
    Zero = 1,
    Constant = 2,
    PrimaryColor = 3,
    Previous = 4,
    Texture0 = 5,
    Texture1 = 6,
}

impl HwSource {
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(HwSource::Zero),
            2 => Some(HwSource::Constant),
            3 => Some(HwSource::PrimaryColor),
            4 => Some(HwSource::Previous),
            5 => Some(HwSource::Texture0),
            6 => Some(HwSource::Texture1),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HwSource::Zero => "ZERO",
            HwSource::Constant => "CONSTANT",
            HwSource::PrimaryColor => "PRIMARY_COLOR",
            HwSource::Previous => "PREVIOUS",
            HwSource::Texture0 => "TEXTURE0",
            HwSource::Texture1 => "TEXTURE1",
        }
    }
}

bitflags! {
    /// Per-input modifier bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SlotModifiers: u8 {
        /// Feed `1 - x` into the combiner
        const INVERT = 1 << 0;
        /// Replicate the source's alpha into the color combiner
        const ALPHA = 1 << 1;
    }
}

/// A fully resolved combiner input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotInput {
    pub source: HwSource,
    pub modifiers: SlotModifiers,
}

impl SlotInput {
    pub const fn new(source: HwSource, modifiers: SlotModifiers) -> Self {
        Self { source, modifiers }
    }

    /// Constant zero, optionally inverted to constant one
    pub const fn zero(invert: bool) -> Self {
        Self {
            source: HwSource::Zero,
            modifiers: if invert {
                SlotModifiers::INVERT
            } else {
                SlotModifiers::empty()
            },
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.modifiers.contains(SlotModifiers::INVERT)
    }

    pub fn is_alpha(&self) -> bool {
        self.modifiers.contains(SlotModifiers::ALPHA)
    }
}

/// Output mapping applied after the combiner sums its products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OutputMap {
    Identity = 1,
    Scale2 = 2,
    Bias = 4,
    BiasScale2 = 7,
}

impl OutputMap {
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(OutputMap::Identity),
            2 => Some(OutputMap::Scale2),
            4 => Some(OutputMap::Bias),
            7 => Some(OutputMap::BiasScale2),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputMap::Identity => "IDENTITY",
            OutputMap::Scale2 => "SCALE2",
            OutputMap::Bias => "BIAS",
            OutputMap::BiasScale2 => "BIAS_SCALE2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_arity() {
        assert_eq!(CombineMode::Replace.arity(), 1);
        assert_eq!(CombineMode::Modulate.arity(), 2);
        assert_eq!(CombineMode::Add.arity(), 2);
        assert_eq!(CombineMode::AddSigned.arity(), 2);
        assert_eq!(CombineMode::Interpolate.arity(), 3);
    }

    #[test]
    fn test_mode_from_gl() {
        assert_eq!(CombineMode::try_from(gl::GL_ADD_SIGNED), Ok(CombineMode::AddSigned));
        assert_eq!(
            CombineMode::try_from(gl::GL_SUBTRACT),
            Err(CombinerError::UnsupportedMode(gl::GL_SUBTRACT))
        );
        assert_eq!(
            CombineMode::try_from(gl::GL_DOT3_RGBA),
            Err(CombinerError::UnsupportedMode(gl::GL_DOT3_RGBA))
        );
    }

    #[test]
    fn test_source_and_operand_from_gl() {
        assert_eq!(ArgSource::try_from(gl::GL_PREVIOUS), Ok(ArgSource::Previous));
        assert_eq!(
            ArgSource::try_from(gl::GL_SRC_COLOR),
            Err(CombinerError::UnsupportedSource(gl::GL_SRC_COLOR))
        );
        assert_eq!(
            ArgOperand::try_from(gl::GL_ONE_MINUS_SRC_ALPHA),
            Ok(ArgOperand::OneMinusSrcAlpha)
        );
        assert_eq!(
            ArgOperand::try_from(gl::GL_TEXTURE),
            Err(CombinerError::UnsupportedOperand(gl::GL_TEXTURE))
        );
    }

    #[test]
    fn test_operand_classification() {
        assert!(!ArgOperand::SrcColor.is_alpha());
        assert!(ArgOperand::OneMinusSrcAlpha.is_alpha());
        assert!(ArgOperand::OneMinusSrcColor.is_one_minus());
        assert!(!ArgOperand::SrcAlpha.is_one_minus());
    }

    #[test]
    fn test_hw_source_bits() {
        for source in [
            HwSource::Zero,
            HwSource::Constant,
            HwSource::PrimaryColor,
            HwSource::Previous,
            HwSource::Texture0,
            HwSource::Texture1,
        ] {
            assert_eq!(HwSource::from_bits(source as u8), Some(source));
        }
        assert_eq!(HwSource::from_bits(0), None);
        assert_eq!(HwSource::from_bits(7), None);
    }

    #[test]
    fn test_output_map_bits() {
        assert_eq!(OutputMap::from_bits(7), Some(OutputMap::BiasScale2));
        // SCALE4 exists in hardware but is never produced here.
        assert_eq!(OutputMap::from_bits(3), None);
    }
}
