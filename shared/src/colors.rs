/// Alpha byte of a packed ARGB value.
pub const ALPHA_MASK: u32 = 0xFF00_0000;
/// RGB bytes of a packed ARGB value.
pub const RGB_MASK: u32 = 0x00FF_FFFF;

/// Convert one normalized channel to a byte. Missing channels read as full
/// intensity, out-of-range values are clamped, NaN becomes 0.
pub fn channel_byte(channels: &[f32], index: usize) -> u8 {
    let value = channels.get(index).copied().unwrap_or(1.0);
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Pack normalized channels into `0xRRGGBB`.
pub fn pack_color(channels: &[f32]) -> u32 {
    let r = channel_byte(channels, 0) as u32;
    let g = channel_byte(channels, 1) as u32;
    let b = channel_byte(channels, 2) as u32;
    (r << 16) | (g << 8) | b
}

/// Pack normalized channels plus an alpha into `0xAARRGGBB`. Alpha is clamped
/// to a byte.
pub fn pack_argb(channels: &[f32], alpha: i32) -> u32 {
    let alpha = alpha.clamp(0, 255) as u32;
    (alpha << 24) | pack_color(channels)
}

/// Replace the RGB bytes of every entry with `rgb`, keeping each entry's alpha.
/// An empty buffer is left as is.
pub fn apply_tint(colors: &mut [u32], rgb: u32) {
    let rgb = rgb & RGB_MASK;
    for color in colors.iter_mut() {
        *color = (*color & ALPHA_MASK) | rgb;
    }
}

/// Tint a host-owned buffer with an owner color. An absent buffer stays absent.
pub fn tint_buffer(colors: Option<Vec<u32>>, owner_color: &[f32]) -> Option<Vec<u32>> {
    let mut colors = colors?;
    apply_tint(&mut colors, pack_color(owner_color));
    Some(colors)
}

/// Split a packed color into `(r, g, b)` bytes.
pub const fn unpack_rgb(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}
