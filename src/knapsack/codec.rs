// Bit Codec
// Converts text to a stream of bits (8 per character, MSB first) and back

use super::error::{KnapsackError, Result};

/// Width of one character in the bit stream
pub const BITS_PER_CHAR: usize = 8;

/// Encode text as bits, 8 per character, most significant bit first.
///
/// Characters above U+00FF are rejected.
pub fn text_to_bits(text: &str) -> Result<Vec<u8>> {
    let mut bits = Vec::with_capacity(text.chars().count() * BITS_PER_CHAR);

    for (position, ch) in text.chars().enumerate() {
        let byte = u8::try_from(u32::from(ch))
            .map_err(|_| KnapsackError::UnsupportedCharacter { ch, position })?;
        bits.extend((0..BITS_PER_CHAR).rev().map(|shift| (byte >> shift) & 1));
    }

    Ok(bits)
}

/// Decode bits back into text.
///
/// Bits are read in groups of 8. A trailing group shorter than 8 is still
/// read as a (narrower) big-endian number. Any non-zero entry counts as a 1.
pub fn bits_to_text(bits: &[u8]) -> String {
    bits.chunks(BITS_PER_CHAR)
        .map(|group| {
            let value = group
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit != 0));
            char::from(value)
        })
        .collect()
}
