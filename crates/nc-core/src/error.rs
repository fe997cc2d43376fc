//! Error types for nvcombine

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum NvError {
    #[error("Combiner error: {0}")]
    Combiner(#[from] CombinerError),

    #[error("Push buffer error: {0}")]
    PushBuf(#[from] PushBufError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

/// Texture environment combiner errors.
///
/// These are contract violations: the GL layer only hands the translator
/// combine state it has already validated against what the hardware can do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombinerError {
    #[error("Unsupported combine mode: 0x{0:04x}")]
    UnsupportedMode(u32),

    #[error("Unsupported combine source: 0x{0:04x}")]
    UnsupportedSource(u32),

    #[error("Unsupported combine operand: 0x{0:04x}")]
    UnsupportedOperand(u32),

    #[error("Invalid texture unit: {0}")]
    InvalidUnit(usize),

    #[error("Argument {index} missing for a mode of arity {arity}")]
    MissingArgument { index: usize, arity: usize },
}

/// Push buffer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PushBufError {
    #[error("Method of {needed} words can never fit a push buffer of {capacity} words")]
    Overflow { needed: usize, capacity: usize },

    #[error("Invalid method count: {0}")]
    InvalidCount(u32),

    #[error("Data written outside of a method (expected {expected} more words)")]
    UnexpectedData { expected: u32 },

    #[error("Method stream truncated: header wants {expected} words, {found} left")]
    Truncated { expected: u32, found: usize },
}

/// Result type alias for nvcombine operations
pub type Result<T> = std::result::Result<T, NvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CombinerError::UnsupportedMode(0x84E7);
        assert_eq!(format!("{}", err), "Unsupported combine mode: 0x84e7");

        let err = PushBufError::Overflow {
            needed: 9,
            capacity: 8,
        };
        assert_eq!(
            format!("{}", err),
            "Method of 9 words can never fit a push buffer of 8 words"
        );
    }

    #[test]
    fn test_error_conversion() {
        let comb_err = CombinerError::InvalidUnit(2);
        let err: NvError = comb_err.into();
        assert!(matches!(err, NvError::Combiner(CombinerError::InvalidUnit(2))));

        let push_err = PushBufError::InvalidCount(0);
        let err: NvError = push_err.into();
        assert!(matches!(err, NvError::PushBuf(_)));
    }
}
