/// Largest index representable in the 24 color bits of a pick pixel.
pub const MAX_INDEX: u32 = (1 << 24) - 1;

/// Index reserved for "no proxy"; the target is cleared to its color.
pub const NOTHING: u32 = 0;

/// Identity color for `index`: R is the most significant byte, B the least,
/// A is always opaque so blending and alpha tests never alter the value.
///
/// Bits above `MAX_INDEX` are discarded.
pub const fn encode(index: u32) -> [u8; 4] {
    let [_, r, g, b] = index.to_be_bytes();
    [r, g, b, 0xFF]
}

/// Inverse of [`encode`]; alpha is ignored.
pub const fn decode(rgba: [u8; 4]) -> u32 {
    u32::from_be_bytes([0, rgba[0], rgba[1], rgba[2]])
}
