//! Decoded view of the input text.
//!
//! The scanner walks chars, but results must be reported in the code units of
//! the caller's string type. [`Text`] holds the decoded chars together with
//! the code-unit offset of each one, so scanner positions map back to exact
//! UTF-8 byte or UTF-16 unit offsets.

use crate::Span;

/// Decoded chars plus their code-unit offsets.
///
/// Buffers are reused across calls to [`Text::load_str`] and
/// [`Text::load_utf16`].
#[derive(Debug, Default, Clone)]
pub struct Text {
    chars: Vec<char>,
    /// `offsets[i]` is the code-unit offset of `chars[i]`;
    /// one trailing entry holds the total length.
    offsets: Vec<u32>,
}

impl Text {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a `&str`; offsets are UTF-8 byte offsets.
    pub fn decode(s: &str) -> Self {
        let mut text = Self::new();
        text.load_str(s);
        text
    }

    /// Decode UTF-16 code units; offsets are 16-bit unit offsets.
    pub fn decode_utf16(units: &[u16]) -> Self {
        let mut text = Self::new();
        text.load_utf16(units);
        text
    }

    /// # Panics
    /// Panics if `s` is longer than `u32::MAX` bytes.
    pub fn load_str(&mut self, s: &str) {
        assert_addressable(s.len());
        self.clear();
        self.chars.reserve(s.len());
        self.offsets.reserve(s.len() + 1);
        for (offset, c) in s.char_indices() {
            self.chars.push(c);
            self.offsets.push(offset as u32);
        }
        self.offsets.push(s.len() as u32);
    }

    /// Lone surrogates decode to U+FFFD, which classifies the same way.
    ///
    /// # Panics
    /// Panics if `units` is longer than `u32::MAX` code units.
    pub fn load_utf16(&mut self, units: &[u16]) {
        assert_addressable(units.len());
        self.clear();
        self.chars.reserve(units.len());
        self.offsets.reserve(units.len() + 1);
        let mut offset = 0u32;
        for decoded in char::decode_utf16(units.iter().copied()) {
            let (c, width) = match decoded {
                Ok(c) => (c, c.len_utf16() as u32),
                Err(_) => (char::REPLACEMENT_CHARACTER, 1),
            };
            self.chars.push(c);
            self.offsets.push(offset);
            offset += width;
        }
        self.offsets.push(offset);
    }

    fn clear(&mut self) {
        self.chars.clear();
        self.offsets.clear();
    }

    /// Decoded chars.
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of chars.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Code-unit offset of char position `pos` (`pos == len()` allowed).
    #[inline]
    pub fn offset(&self, pos: usize) -> u32 {
        self.offsets[pos]
    }

    /// Span covering char positions `start..end`, in code units.
    #[inline]
    pub fn span(&self, start: usize, end: usize) -> Span {
        debug_assert!(start <= end && end <= self.len());
        let start = self.offsets[start];
        Span::new(start, self.offsets[end] - start)
    }
}

/// Spans hold `u32` offsets; longer inputs cannot be reported.
#[inline]
fn assert_addressable(len: usize) {
    assert!(
        len <= u32::MAX as usize,
        "text of {len} code units exceeds the u32 offset range"
    );
}
