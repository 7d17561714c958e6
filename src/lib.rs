//! urlspan: single-pass URL and domain span extraction
//!
//! Finds URLs and bare domain names in short, mixed-script text such as
//! social posts, where links are often glued to CJK or Hangul words with no
//! whitespace around them.
//!
//! # Design Principles
//! - No regex: one left-to-right pass that jumps from dot to dot
//! - Forward-only cursor: text before it is never rescanned
//! - TLDs are looked up by a rolling hash, never by building substrings
//! - Results are spans into the input, in the input's own code units
//!
//! # Example
//! ```
//! use urlspan::{Extractor, TldLists};
//!
//! let lists = TldLists::new(["com"], ["jp"]);
//! let extractor = Extractor::new(&lists)?;
//!
//! let text = "twitter.comこれは日本語です。http://example.jp";
//! let links: Vec<&str> = extractor
//!     .extract(text)
//!     .iter()
//!     .map(|span| span.slice(text))
//!     .collect();
//! assert_eq!(links, ["twitter.com", "http://example.jp"]);
//! # Ok::<(), urlspan::Error>(())
//! ```

pub mod classify;
pub mod error;
pub mod extractor;
pub mod hash;
mod length;
pub mod limits;
mod path;
mod scanner;
pub mod span;
pub mod text;
pub mod tld;

// Re-export primary types
pub use error::{Error, Result};
pub use extractor::{Extractor, ScanBuffer};
pub use span::Span;
pub use tld::{TldDictionary, TldInfo, TldKind, TldLists};
