//! Compact span representation for matched links.
//!
//! Uses `u32` offsets to save memory (8 bytes per span).
//! Supports texts up to 4GB in size.

/// A matched link inside the scanned text.
///
/// `start` and `len` are measured in the code units of the input the span was
/// produced from: UTF-8 bytes for `&str` input, 16-bit units for UTF-16 input.
///
/// # Example
/// ```
/// use urlspan::Span;
///
/// let text = "see example.com";
/// let span = Span::new(4, 11);
/// assert_eq!(span.slice(text), "example.com");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub len: u32,
}

// Compile-time size verification
const _: () = assert!(std::mem::size_of::<Span>() == 8);

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// Create a span from a pair of usize offsets.
    ///
    /// # Panics
    /// Panics in debug mode if values exceed u32::MAX.
    #[inline]
    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= u32::MAX as usize);
        Self {
            start: start as u32,
            len: (end - start) as u32,
        }
    }

    /// Exclusive end offset.
    #[inline]
    pub const fn end(&self) -> u32 {
        self.start + self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Code-unit range for slicing the scanned input.
    #[inline]
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end() as usize
    }

    /// Get the matched text. Only meaningful for spans produced from `text`.
    #[inline]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.range()]
    }

    /// Get the matched code units of a UTF-16 buffer.
    #[inline]
    pub fn slice_utf16<'a>(&self, units: &'a [u16]) -> &'a [u16] {
        &units[self.range()]
    }

    /// Check whether two spans share at least one code unit.
    #[inline]
    pub const fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

impl From<std::ops::Range<usize>> for Span {
    #[inline]
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::from_bounds(r.start, r.end)
    }
}

impl From<Span> for std::ops::Range<usize> {
    #[inline]
    fn from(s: Span) -> Self {
        s.range()
    }
}
