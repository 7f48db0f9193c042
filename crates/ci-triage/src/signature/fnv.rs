//! 32-bit FNV-1a.
//!
//! Non-cryptographic: signatures exist for deduplication, not tamper
//! resistance.

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 16_777_619;

/// Hash `bytes` with 32-bit FNV-1a.
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Hash `input` and render as 8 lowercase hex digits.
pub fn fnv1a_hex(input: &str) -> String {
    format!("{:08x}", fnv1a_32(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_offset_basis() {
        assert_eq!(fnv1a_32(b""), FNV_OFFSET_BASIS);
        assert_eq!(fnv1a_hex(""), "811c9dc5");
    }

    #[test]
    fn test_known_vectors() {
        // Reference values for FNV-1a 32.
        assert_eq!(fnv1a_32(b"a"), 0xe40c292c);
        assert_eq!(fnv1a_32(b"foobar"), 0xbf9cf968);
    }

    #[test]
    fn test_hex_is_eight_lowercase_digits() {
        let hex = fnv1a_hex("foobar");
        assert_eq!(hex, "bf9cf968");
        assert_eq!(fnv1a_hex("a").len(), 8);
        assert!(fnv1a_hex("x")
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
