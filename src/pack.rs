//! Conversion of noise rows into 8-bit texture uploads.

/// Scale a `[0, 1)` sample to a byte, truncating.
pub fn to_byte(value: f32) -> u8 {
    // `as` saturates, so out-of-range input clamps to 0 or 255.
    (value * 255.0).floor() as u8
}

/// Interleave three channels into RGBA8 with opaque alpha.
///
/// Channels are expected to be the same length; only the shortest length is
/// packed.
pub fn pack_rgba(r: &[f32], g: &[f32], b: &[f32]) -> Vec<u8> {
    debug_assert!(
        r.len() == g.len() && g.len() == b.len(),
        "channel lengths differ: {} {} {}",
        r.len(),
        g.len(),
        b.len()
    );
    let mut out = Vec::with_capacity(r.len() * 4);
    for ((&r, &g), &b) in r.iter().zip(g).zip(b) {
        out.extend_from_slice(&[to_byte(r), to_byte(g), to_byte(b), u8::MAX]);
    }
    out
}

/// Single-channel R8 buffer.
pub fn pack_red(values: &[f32]) -> Vec<u8> {
    values.iter().copied().map(to_byte).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_channel_major_per_pixel() {
        let out = pack_rgba(&[0.0, 0.5], &[0.25, 0.999], &[0.1, 0.0]);
        assert_eq!(out, vec![0, 63, 25, 255, 127, 254, 0, 255]);
    }

    #[test]
    fn red_is_one_byte_per_column() {
        assert_eq!(pack_red(&[0.0, 0.5, 0.999]), vec![0, 127, 254]);
    }
}
