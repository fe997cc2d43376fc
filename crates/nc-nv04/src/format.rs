//! Color packing for combiner registers

/// Convert a normalized channel to 8 bits, clamping out-of-range input
fn float_to_ubyte(value: f32) -> u32 {
    (value.clamp(0.0, 1.0) * 255.0) as u32
}

/// Pack an RGBA color in [0, 1] as A8R8G8B8
pub fn pack_argb8888(color: [f32; 4]) -> u32 {
    let [r, g, b, a] = color.map(float_to_ubyte);
    (a << 24) | (r << 16) | (g << 8) | b
}
