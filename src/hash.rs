//! Case-folded two-lane DJB2 hash used to key the TLD dictionary.
//!
//! Characters alternate between two lanes; each lane is updated as
//! `h = (h * 33) ^ c` with 32-bit wraparound and the lanes are combined as
//! `h1 + h2 * 1566083941`. The scanner needs the hash of every prefix of a
//! candidate suffix, so the hasher is incremental: [`TldHasher::push`]
//! returns the combined value after each character.

use crate::classify::fold;

const SEED: i32 = 5381;
const LANE_MIX: i32 = 1_566_083_941;

/// Incremental hasher producing the combined hash after every character.
#[derive(Debug, Clone, Copy)]
pub struct TldHasher {
    lanes: [i32; 2],
    count: usize,
}

impl TldHasher {
    #[inline]
    pub const fn new() -> Self {
        Self {
            lanes: [SEED, SEED],
            count: 0,
        }
    }

    /// Feed one character and return the hash of everything fed so far.
    #[inline]
    pub fn push(&mut self, c: char) -> i32 {
        let lane = &mut self.lanes[self.count & 1];
        *lane = (*lane << 5).wrapping_add(*lane) ^ fold(c) as i32;
        self.count += 1;
        self.finish()
    }

    #[inline]
    pub const fn finish(&self) -> i32 {
        self.lanes[0].wrapping_add(self.lanes[1].wrapping_mul(LANE_MIX))
    }
}

impl Default for TldHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a whole string.
pub fn hash_str(s: &str) -> i32 {
    hash_chars(s.chars())
}

/// Hash a sequence of characters.
pub fn hash_chars(chars: impl IntoIterator<Item = char>) -> i32 {
    let mut hasher = TldHasher::new();
    for c in chars {
        hasher.push(c);
    }
    hasher.finish()
}

/// Append the hash of every prefix of `chars` to `out`.
///
/// `out[k]` is the hash of `chars[..=k]`.
pub fn prefix_hashes<E: Extend<i32>>(chars: &[char], out: &mut E) {
    let mut hasher = TldHasher::new();
    out.extend(chars.iter().map(|&c| hasher.push(c)));
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straightforward two-lane reference implementation.
    fn reference(s: &str) -> i32 {
        let mut h1: i32 = 5381;
        let mut h2: i32 = 5381;
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            h1 = (h1 << 5).wrapping_add(h1) ^ chars[i].to_ascii_lowercase() as i32;
            i += 1;
            if i >= chars.len() {
                break;
            }
            h2 = (h2 << 5).wrapping_add(h2) ^ chars[i].to_ascii_lowercase() as i32;
            i += 1;
        }
        h1.wrapping_add(h2.wrapping_mul(1_566_083_941))
    }

    #[test]
    fn test_empty_hash() {
        assert_eq!(hash_str(""), 5381i32.wrapping_add(5381i32.wrapping_mul(1_566_083_941)));
    }

    #[test]
    fn test_matches_reference() {
        for s in ["com", "co", "jp", "museum", "xn--p1ai", "рф", "中国", "a"] {
            assert_eq!(hash_str(s), reference(s), "{s}");
        }
    }

    #[test]
    fn test_case_folded() {
        assert_eq!(hash_str("COM"), hash_str("com"));
        assert_eq!(hash_str("Co"), hash_str("cO"));
        // Folding is ASCII-only
        assert_ne!(hash_str("РФ"), hash_str("рф"));
    }

    #[test]
    fn test_prefix_hashes() {
        let chars: Vec<char> = "comic".chars().collect();
        let mut out = Vec::new();
        prefix_hashes(&chars, &mut out);
        assert_eq!(out.len(), 5);
        assert_eq!(out[1], hash_str("co"));
        assert_eq!(out[2], hash_str("com"));
        assert_eq!(out[4], hash_str("comic"));
    }

    #[test]
    fn test_known_value() {
        // h1 = (5381 * 33) ^ 'a'
        let h1 = (5381i32 * 33) ^ 'a' as i32;
        assert_eq!(hash_str("a"), h1.wrapping_add(5381i32.wrapping_mul(1_566_083_941)));
    }
}
