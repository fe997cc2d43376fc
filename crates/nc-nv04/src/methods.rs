//! NV04 3D object classes and methods
//!
//! The NV04 has two 3D classes: the plain textured triangle (0x54) and the
//! multitexture triangle (0x55). Only the latter exposes the register
//! combiners driven by this crate.

pub const NV04_TEXTURED_TRIANGLE: u32 = 0x0054;
pub const NV04_MULTITEX_TRIANGLE: u32 = 0x0055;

// Multitexture triangle methods
pub const NV04_MULTITEX_TRIANGLE_NOP: u32 = 0x0100;
pub const NV04_MULTITEX_TRIANGLE_COMBINE_FACTOR: u32 = 0x0334;
pub const NV04_MULTITEX_TRIANGLE_BLEND: u32 = 0x0338;
pub const NV04_MULTITEX_TRIANGLE_CONTROL0: u32 = 0x033C;

/// Stride between the per-unit combiner register pairs
pub const COMBINE_UNIT_STRIDE: u32 = 12;

/// Number of texture units on the multitexture triangle
pub const TEXTURE_UNITS: usize = 2;

/// Alpha combiner register of texture unit `unit`
pub const fn combine_alpha(unit: usize) -> u32 {
    0x0310 + (unit as u32) * COMBINE_UNIT_STRIDE
}

/// Color combiner register of texture unit `unit`
pub const fn combine_color(unit: usize) -> u32 {
    0x0314 + (unit as u32) * COMBINE_UNIT_STRIDE
}

/// Human-readable name of a multitexture triangle method
pub fn method_name(method: u32) -> String {
    match method {
        NV04_MULTITEX_TRIANGLE_NOP => "NOP".to_string(),
        NV04_MULTITEX_TRIANGLE_COMBINE_FACTOR => "COMBINE_FACTOR".to_string(),
        NV04_MULTITEX_TRIANGLE_BLEND => "BLEND".to_string(),
        NV04_MULTITEX_TRIANGLE_CONTROL0 => "CONTROL0".to_string(),
        _ => {
            for unit in 0..TEXTURE_UNITS {
                if method == combine_alpha(unit) {
                    return format!("COMBINE_ALPHA({})", unit);
                }
                if method == combine_color(unit) {
                    return format!("COMBINE_COLOR({})", unit);
                }
            }
            format!("UNKNOWN_0x{:04X}", method)
        }
    }
}

/// Which combiner register `method` addresses, as `(unit, is_alpha)`
pub fn combine_register(method: u32) -> Option<(usize, bool)> {
    (0..TEXTURE_UNITS).find_map(|unit| {
        if method == combine_alpha(unit) {
            Some((unit, true))
        } else if method == combine_color(unit) {
            Some((unit, false))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_register_addresses() {
        assert_eq!(combine_alpha(0), 0x0310);
        assert_eq!(combine_color(0), 0x0314);
        assert_eq!(combine_alpha(1), 0x031C);
        assert_eq!(combine_color(1), 0x0320);
        // The second unit's pair ends before the shared factor register.
        assert!(combine_color(1) < NV04_MULTITEX_TRIANGLE_COMBINE_FACTOR);
    }

    #[test]
    fn test_method_name() {
        assert_eq!(method_name(0x0310), "COMBINE_ALPHA(0)");
        assert_eq!(method_name(0x0320), "COMBINE_COLOR(1)");
        assert_eq!(method_name(0x0334), "COMBINE_FACTOR");
        assert_eq!(method_name(0x0400), "UNKNOWN_0x0400");
    }

    #[test]
    fn test_combine_register_lookup() {
        assert_eq!(combine_register(0x031C), Some((1, true)));
        assert_eq!(combine_register(0x0314), Some((0, false)));
        assert_eq!(combine_register(0x0334), None);
    }
}
