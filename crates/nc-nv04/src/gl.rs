//! GL enum values consumed by the texture environment translator
//!
//! Only the subset reachable through `GL_COMBINE` texture environments is
//! listed, plus the combine modes the NV04 combiner cannot express so they
//! can be named in diagnostics.

// Combine modes
pub const GL_REPLACE: u32 = 0x1E01;
pub const GL_MODULATE: u32 = 0x2100;
pub const GL_ADD: u32 = 0x0104;
pub const GL_ADD_SIGNED: u32 = 0x8574;
pub const GL_INTERPOLATE: u32 = 0x8575;
pub const GL_SUBTRACT: u32 = 0x84E7;
pub const GL_DOT3_RGB: u32 = 0x86AE;
pub const GL_DOT3_RGBA: u32 = 0x86AF;

// Combine sources
pub const GL_TEXTURE: u32 = 0x1702;
pub const GL_TEXTURE0: u32 = 0x84C0;
pub const GL_TEXTURE1: u32 = 0x84C1;
pub const GL_CONSTANT: u32 = 0x8576;
pub const GL_PRIMARY_COLOR: u32 = 0x8577;
pub const GL_PREVIOUS: u32 = 0x8578;

// Combine operands
pub const GL_SRC_COLOR: u32 = 0x0300;
pub const GL_ONE_MINUS_SRC_COLOR: u32 = 0x0301;
pub const GL_SRC_ALPHA: u32 = 0x0302;
pub const GL_ONE_MINUS_SRC_ALPHA: u32 = 0x0303;

const NAMES: &[(&str, u32)] = &[
    ("GL_REPLACE", GL_REPLACE),
    ("GL_MODULATE", GL_MODULATE),
    ("GL_ADD", GL_ADD),
    ("GL_ADD_SIGNED", GL_ADD_SIGNED),
    ("GL_INTERPOLATE", GL_INTERPOLATE),
    ("GL_SUBTRACT", GL_SUBTRACT),
    ("GL_DOT3_RGB", GL_DOT3_RGB),
    ("GL_DOT3_RGBA", GL_DOT3_RGBA),
    ("GL_TEXTURE", GL_TEXTURE),
    ("GL_TEXTURE0", GL_TEXTURE0),
    ("GL_TEXTURE1", GL_TEXTURE1),
    ("GL_CONSTANT", GL_CONSTANT),
    ("GL_PRIMARY_COLOR", GL_PRIMARY_COLOR),
    ("GL_PREVIOUS", GL_PREVIOUS),
    ("GL_SRC_COLOR", GL_SRC_COLOR),
    ("GL_ONE_MINUS_SRC_COLOR", GL_ONE_MINUS_SRC_COLOR),
    ("GL_SRC_ALPHA", GL_SRC_ALPHA),
    ("GL_ONE_MINUS_SRC_ALPHA", GL_ONE_MINUS_SRC_ALPHA),
];

/// Look up a GL enum by its name. The `GL_` prefix is optional.
pub fn enum_by_name(name: &str) -> Option<u32> {
    let name = name.trim();
    let full = if name.starts_with("GL_") {
        name.to_string()
    } else {
        format!("GL_{}", name)
    };
    NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(&full))
        .map(|&(_, v)| v)
}

/// Name of a GL enum, if it is one the translator knows about
pub fn enum_name(value: u32) -> Option<&'static str> {
    NAMES.iter().find(|&&(_, v)| v == value).map(|&(n, _)| n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_by_name() {
        assert_eq!(enum_by_name("GL_MODULATE"), Some(GL_MODULATE));
        assert_eq!(enum_by_name("previous"), Some(GL_PREVIOUS));
        assert_eq!(enum_by_name(" GL_one_minus_src_alpha "), Some(GL_ONE_MINUS_SRC_ALPHA));
        assert_eq!(enum_by_name("GL_BLEND"), None);
    }

    #[test]
    fn test_enum_name() {
        assert_eq!(enum_name(GL_TEXTURE1), Some("GL_TEXTURE1"));
        assert_eq!(enum_name(GL_DOT3_RGB), Some("GL_DOT3_RGB"));
        assert_eq!(enum_name(0xDEAD), None);
    }
}
