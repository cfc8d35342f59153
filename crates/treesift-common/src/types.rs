//! Identifier types shared between the keyword dictionary and the bit-sets.

/// Dense identifier of a distinct keyword.
///
/// Identifiers are assigned 1, 2, 3, ... in lexicographic order of the
/// keywords when the dictionary is finished. Zero is never assigned.
pub type KeywordId = u32;

/// Number of identifiers a three-level keyword bit-set can address: 64 x 64 x 64.
pub const KEYWORD_CAPACITY: u32 = 64 * 64 * 64;

/// Largest identifier that fits in a keyword bit-set.
pub const MAX_KEYWORD_ID: KeywordId = KEYWORD_CAPACITY - 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_constants() {
        assert_eq!(KEYWORD_CAPACITY, 262_144);
        assert_eq!(MAX_KEYWORD_ID, 262_143);
    }
}
