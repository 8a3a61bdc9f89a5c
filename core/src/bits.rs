//! Byte and text representations of bit sequences
//!
//! Bits are ordered most-significant first within each byte.

/// Expand bytes into 8 bits each, MSB first
pub fn bytes_to_bits(data: &[u8]) -> Vec<bool> {
    data.iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}

/// Number of bits left over after grouping `len` bits into bytes
pub fn trailing_bits(len: usize) -> usize {
    len % 8
}

/// Pack bits into bytes, MSB first
///
/// A trailing group shorter than 8 bits is discarded, never padded.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    let remainder = trailing_bits(bits.len());
    if remainder != 0 {
        log::warn!(
            "Bit sequence length {} is not a multiple of 8, discarding {} trailing bits",
            bits.len(),
            remainder
        );
    }

    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | bit as u8))
        .collect()
}

/// Parse a textual bit string, ignoring everything but '0' and '1'
pub fn parse_bit_string(text: &str) -> Vec<bool> {
    text.chars()
        .filter_map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}

/// Render bits as '0'/'1' characters, optionally with a space between bytes
pub fn format_bit_string(bits: &[bool], grouped: bool) -> String {
    let mut out = String::with_capacity(bits.len() + bits.len() / 8);
    for (i, &bit) in bits.iter().enumerate() {
        if grouped && i > 0 && i % 8 == 0 {
            out.push(' ');
        }
        out.push(if bit { '1' } else { '0' });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_bits_msb_first() {
        let bits = bytes_to_bits(b"h");
        assert_eq!(format_bit_string(&bits, false), "01101000");
        assert!(bytes_to_bits(&[]).is_empty());
    }

    #[test]
    fn test_bits_to_bytes() {
        let bits = parse_bit_string("01101000 01101001");
        assert_eq!(bits_to_bytes(&bits), b"hi");
    }

    #[test]
    fn test_trailing_bits_discarded() {
        let mut bits = bytes_to_bits(&[0xA5]);
        bits.extend_from_slice(&[true, true, false]);
        assert_eq!(trailing_bits(bits.len()), 3);
        assert_eq!(bits_to_bytes(&bits), vec![0xA5]);
        assert!(bits_to_bytes(&[true; 7]).is_empty());
    }

    #[test]
    fn test_utf8_text() {
        let text = "Hello 世界!";
        let bits = bytes_to_bits(text.as_bytes());
        assert_eq!(bits.len(), text.len() * 8);
        assert_eq!(bits_to_bytes(&bits), text.as_bytes());
    }

    #[test]
    fn test_parse_ignores_noise() {
        let bits = parse_bit_string("0b1 0\n1x2 1");
        assert_eq!(bits, vec![false, true, false, true, true]);
        assert!(parse_bit_string("hello").is_empty());
    }

    #[test]
    fn test_format_grouped() {
        let bits = bytes_to_bits(b"hello");
        assert_eq!(
            format_bit_string(&bits, true),
            "01101000 01100101 01101100 01101100 01101111"
        );
        assert_eq!(format_bit_string(&[true, false], true), "10");
        assert_eq!(format_bit_string(&[], true), "");
    }
}
