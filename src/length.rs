//! Posting-length accounting.
//!
//! Services that shorten links count every link as a fixed-length
//! placeholder, whatever its real length.

use crate::extractor::Extractor;
use unicode_normalization::UnicodeNormalization;

impl Extractor {
    /// Length of `text` in code points after NFC normalization, with every
    /// link counted as `placeholder_len` code points.
    ///
    /// # Example
    /// ```
    /// use urlspan::{Extractor, TldLists};
    ///
    /// let extractor = Extractor::new(&TldLists::new(["com"], ["jp"]))?;
    /// assert_eq!(extractor.adjusted_length("hi example.com", 23), 26);
    /// # Ok::<(), urlspan::Error>(())
    /// ```
    pub fn adjusted_length(&self, text: &str, placeholder_len: usize) -> usize {
        let normalized: String = text.nfc().collect();
        let spans = self.extract(&normalized);

        spans.iter().fold(normalized.chars().count(), |total, span| {
            total - span.slice(&normalized).chars().count() + placeholder_len
        })
    }
}
