//! Argument source resolution
//!
//! The two unit-dependent aliases live here and nowhere else: `GL_TEXTURE`
//! names the sampler of the unit being combined, and `GL_PREVIOUS` on the
//! first unit has no upstream combiner, so it reads the fragment color.

use super::types::{ArgSource, HwSource};

/// Resolve a GL combine source to the hardware selector for texture unit `unit`
pub fn resolve_source(source: ArgSource, unit: usize) -> HwSource {
    match source {
        ArgSource::Texture => {
            if unit == 0 {
                HwSource::Texture0
            } else {
                HwSource::Texture1
            }
        }
        ArgSource::Texture0 => HwSource::Texture0,
        ArgSource::Texture1 => HwSource::Texture1,
        ArgSource::Constant => HwSource::Constant,
        ArgSource::PrimaryColor => HwSource::PrimaryColor,
        ArgSource::Previous => {
            if unit == 0 {
                HwSource::PrimaryColor
            } else {
                HwSource::Previous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_follows_unit() {
        assert_eq!(resolve_source(ArgSource::Texture, 0), HwSource::Texture0);
        assert_eq!(resolve_source(ArgSource::Texture, 1), HwSource::Texture1);
    }

    #[test]
    fn test_previous_on_first_unit() {
        assert_eq!(resolve_source(ArgSource::Previous, 0), HwSource::PrimaryColor);
        assert_eq!(resolve_source(ArgSource::Previous, 1), HwSource::Previous);
    }

    #[test]
    fn test_literal_sources() {
        for unit in 0..2 {
            assert_eq!(resolve_source(ArgSource::Texture0, unit), HwSource::Texture0);
            assert_eq!(resolve_source(ArgSource::Texture1, unit), HwSource::Texture1);
            assert_eq!(resolve_source(ArgSource::Constant, unit), HwSource::Constant);
            assert_eq!(
                resolve_source(ArgSource::PrimaryColor, unit),
                HwSource::PrimaryColor
            );
        }
    }

    #[test]
    fn test_resolution_is_stable() {
        let first = resolve_source(ArgSource::Texture, 1);
        assert_eq!(resolve_source(ArgSource::Texture, 1), first);
    }
}
