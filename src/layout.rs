use crate::error::{KeyvolveError, KvResult};
use fastrand::Rng;

/// A layout: one character per key index. Invariant: every alphabet
/// character appears exactly once and the length equals the key count.
pub type Layout = Vec<u8>;

/// Character -> key index lookup. Sized for the full byte range; uppercase
/// letters alias to their lowercase slot.
pub type PosMap = [u8; 256];

/// Sentinel for "character not placed on this layout".
pub const NOT_PLACED: u8 = 255;

/// Largest supported key count; index 255 is reserved for the sentinel.
pub const MAX_KEYS: usize = 254;

pub fn build_pos_map(layout: &[u8]) -> PosMap {
    let mut map = [NOT_PLACED; 256];
    for (i, &c) in layout.iter().enumerate() {
        map[c as usize] = i as u8;
        if c.is_ascii_lowercase() {
            map[c.to_ascii_uppercase() as usize] = i as u8;
        } else if c.is_ascii_uppercase() {
            map[c.to_ascii_lowercase() as usize] = i as u8;
        }
    }
    map
}

/// Membership mask over the layout's characters (lowercase-folded), used to
/// restrict corpus n-gram counting to placed characters.
pub fn alphabet_mask(layout: &[u8]) -> [bool; 256] {
    let mut mask = [false; 256];
    for &c in layout {
        mask[c.to_ascii_lowercase() as usize] = true;
    }
    mask
}

/// Uniform random permutation of the given keys.
pub fn random_layout(keys: &[u8], rng: &mut Rng) -> Layout {
    let mut shuffled = keys.to_vec();
    rng.shuffle(&mut shuffled);
    shuffled
}

/// Checks the permutation invariant against a key count: ASCII characters,
/// no duplicates, exact length.
pub fn validate_layout(layout: &[u8], key_count: usize) -> KvResult<()> {
    if layout.len() != key_count {
        return Err(KeyvolveError::Config(format!(
            "layout has {} characters but the geometry has {} keys",
            layout.len(),
            key_count
        )));
    }
    if key_count > MAX_KEYS {
        return Err(KeyvolveError::Config(format!(
            "at most {} keys are supported, got {}",
            MAX_KEYS, key_count
        )));
    }
    let mut seen = [false; 256];
    for &c in layout {
        if !c.is_ascii() {
            return Err(KeyvolveError::Config(
                "layout characters must be ASCII".to_string(),
            ));
        }
        let folded = c.to_ascii_lowercase() as usize;
        if seen[folded] {
            return Err(KeyvolveError::Config(format!(
                "duplicated character '{}' in layout",
                c as char
            )));
        }
        seen[folded] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_map_aliases_uppercase() {
        let map = build_pos_map(b"abc");
        assert_eq!(map[b'b' as usize], 1);
        assert_eq!(map[b'B' as usize], 1);
        assert_eq!(map[b'z' as usize], NOT_PLACED);
    }

    #[test]
    fn random_layout_is_a_permutation() {
        let keys = b"abcdefgh";
        let mut rng = Rng::with_seed(7);
        let shuffled = random_layout(keys, &mut rng);
        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, keys.to_vec());
    }

    #[test]
    fn duplicate_characters_are_rejected() {
        assert!(validate_layout(b"aba", 3).is_err());
        // Case-folded duplicates collide too.
        assert!(validate_layout(b"aA", 2).is_err());
        assert!(validate_layout(b"ab", 2).is_ok());
    }
}
