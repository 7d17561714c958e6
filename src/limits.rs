//! DoS prevention constants and encoding bounds.
//!
//! These limits keep pathological inputs from causing deep recursion
//! and keep TLD descriptors within their encodable range.

/// Exclusive upper bound on a TLD length, in chars.
///
/// Longer entries fail dictionary construction with `Error::InvalidTld`.
pub const MAX_TLD_LEN: usize = 1 << 30;

/// Maximum parentheses nesting inside a URL path.
/// Deeper groups are treated as unterminated.
pub const MAX_PATH_PAREN_DEPTH: usize = 32;

/// Inline capacity of the label-start scratch list before it spills to the heap.
pub const INLINE_LABELS: usize = 8;

/// Inline capacity of the rolling-hash scratch list before it spills to the heap.
pub const INLINE_HASHES: usize = 32;
