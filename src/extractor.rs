//! Public extraction entry points.

use crate::error::Result;
use crate::scanner::{Scanner, Scratch};
use crate::text::Text;
use crate::tld::{TldDictionary, TldLists};
use crate::Span;

/// Reusable buffers for repeated scans.
///
/// Holds the decoded text and the scanner's scratch lists, so scanning many
/// short texts with [`Extractor::extract_into`] stops allocating once the
/// buffers have grown to fit.
#[derive(Debug, Default, Clone)]
pub struct ScanBuffer {
    text: Text,
    scratch: Scratch,
}

impl ScanBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Finds URL and bare-domain spans in short text.
///
/// An `Extractor` is immutable after construction and can be shared between
/// threads.
///
/// # Example
/// ```
/// use urlspan::{Extractor, TldLists};
///
/// let extractor = Extractor::new(&TldLists::new(["com"], ["jp"]))?;
/// let text = "see example.com and example.jp";
/// let spans = extractor.extract(text);
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].slice(text), "example.com");
/// # Ok::<(), urlspan::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    tlds: TldDictionary,
}

impl Extractor {
    /// Build an extractor from TLD word lists.
    pub fn new(lists: &TldLists) -> Result<Self> {
        Ok(Self::from_dictionary(TldDictionary::from_lists(lists)?))
    }

    pub fn from_dictionary(tlds: TldDictionary) -> Self {
        Self { tlds }
    }

    pub fn dictionary(&self) -> &TldDictionary {
        &self.tlds
    }

    /// Extract link spans, as UTF-8 byte offsets into `text`.
    ///
    /// # Panics
    /// Panics if `text` is longer than `u32::MAX` bytes, the range a
    /// [`Span`] can address.
    pub fn extract(&self, text: &str) -> Vec<Span> {
        let mut buffer = ScanBuffer::new();
        let mut out = Vec::new();
        self.extract_into(text, &mut buffer, &mut out);
        out
    }

    /// Extract link spans into `out`, reusing `buffer`.
    ///
    /// `out` is cleared first.
    pub fn extract_into(&self, text: &str, buffer: &mut ScanBuffer, out: &mut Vec<Span>) {
        out.clear();
        // Every link contains a dot.
        if memchr::memchr(b'.', text.as_bytes()).is_none() {
            return;
        }
        buffer.text.load_str(text);
        self.scan(buffer, out);
    }

    /// Extract link spans from UTF-16 text, as 16-bit code unit offsets.
    ///
    /// # Panics
    /// Panics if `text` is longer than `u32::MAX` code units.
    pub fn extract_utf16(&self, text: &[u16]) -> Vec<Span> {
        let mut buffer = ScanBuffer::new();
        let mut out = Vec::new();
        self.extract_utf16_into(text, &mut buffer, &mut out);
        out
    }

    /// UTF-16 counterpart of [`Extractor::extract_into`].
    pub fn extract_utf16_into(&self, text: &[u16], buffer: &mut ScanBuffer, out: &mut Vec<Span>) {
        out.clear();
        if !text.contains(&(b'.' as u16)) {
            return;
        }
        buffer.text.load_utf16(text);
        self.scan(buffer, out);
    }

    fn scan(&self, buffer: &mut ScanBuffer, out: &mut Vec<Span>) {
        let ScanBuffer { text, scratch } = buffer;
        Scanner::new(&self.tlds, text, scratch).scan_into(out);
    }
}
