//! Character classification for the link scanner.
//!
//! ASCII characters are answered by a 128-entry table of capability flags;
//! everything above U+007F goes through explicit range predicates.

/// Capability flags stored in [`ASCII_TABLE`].
pub mod flags {
    pub const ALPHABET: u16 = 1;
    pub const DIGIT: u16 = 1 << 1;
    pub const AT: u16 = 1 << 2;
    /// Symbols that may not sit right before a link.
    pub const NOT_PRECEDING: u16 = 1 << 3;
    pub const PATH_ENDING: u16 = 1 << 4;
    pub const PATH: u16 = 1 << 5;
    pub const QUERY_ENDING: u16 = 1 << 6;
    pub const QUERY: u16 = 1 << 7;
    pub const LPAREN: u16 = 1 << 8;
    pub const RPAREN: u16 = 1 << 9;
    /// `-` and `_`.
    pub const DOMAIN: u16 = 1 << 10;

    pub const ALNUM: u16 = ALPHABET | DIGIT;
    pub const ALNUM_AT: u16 = ALNUM | AT;
    pub const NOT_PRECEDING_CHAR: u16 = ALNUM | NOT_PRECEDING;
}

use flags::*;

/// Capability flags for every ASCII character.
pub const ASCII_TABLE: [u16; 128] = {
    let mut table = [0u16; 128];

    let mut c = b'0';
    while c <= b'9' {
        table[c as usize] = DIGIT;
        c += 1;
    }
    let mut c = b'A';
    while c <= b'Z' {
        table[c as usize] = ALPHABET;
        table[(c + 32) as usize] = ALPHABET;
        c += 1;
    }

    let path_and_query = b"!%'*,.:;[]|~";
    let mut i = 0;
    while i < path_and_query.len() {
        table[path_and_query[i] as usize] = PATH | QUERY;
        i += 1;
    }

    table[b'#' as usize] = NOT_PRECEDING | PATH_ENDING | QUERY_ENDING;
    table[b'$' as usize] = NOT_PRECEDING | PATH | QUERY;
    table[b'&' as usize] = PATH | QUERY_ENDING;
    table[b'(' as usize] = QUERY | LPAREN;
    table[b')' as usize] = QUERY | RPAREN;
    table[b'+' as usize] = PATH_ENDING | QUERY;
    table[b'-' as usize] = PATH_ENDING | QUERY | DOMAIN;
    table[b'/' as usize] = PATH_ENDING | QUERY_ENDING;
    table[b'=' as usize] = PATH_ENDING | QUERY_ENDING;
    table[b'?' as usize] = QUERY;
    table[b'@' as usize] = AT | NOT_PRECEDING | PATH | QUERY;
    table[b'_' as usize] = PATH_ENDING | QUERY_ENDING | DOMAIN;
    table
};

/// Flags for `c`, or `None` if `c` is not ASCII.
#[inline]
pub fn ascii_flags(c: char) -> Option<u16> {
    ASCII_TABLE.get(c as usize).copied()
}

#[inline]
fn has_ascii_flag(c: char, mask: u16) -> bool {
    ascii_flags(c).is_some_and(|f| f & mask != 0)
}

/// Can `c` appear inside a host label?
#[inline]
pub fn is_valid_domain_char(c: char) -> bool {
    match ascii_flags(c) {
        Some(f) => f & (ALNUM | DOMAIN) != 0,
        // General Punctuation block and the Zs separators outside it
        None => !matches!(c, '\u{2000}'..='\u{206F}' | '\u{00A0}' | '\u{1680}' | '\u{3000}'),
    }
}

/// Latin letters with diacritics, IPA/Africanist letters and combining marks.
#[inline]
pub fn is_accent_char(c: char) -> bool {
    matches!(
        c,
        '\u{00C0}'..='\u{00D6}'
            | '\u{00D8}'..='\u{00F6}'
            | '\u{00F8}'..='\u{024F}'
            | '\u{0253}'
            | '\u{0254}'
            | '\u{0256}'
            | '\u{0257}'
            | '\u{0259}'
            | '\u{025B}'
            | '\u{0263}'
            | '\u{0268}'
            | '\u{026F}'
            | '\u{0272}'
            | '\u{0289}'
            | '\u{028B}'
            | '\u{02BB}'
            | '\u{0300}'..='\u{036F}'
            | '\u{1E00}'..='\u{1EFF}'
    )
}

#[inline]
pub fn is_cyrillic_char(c: char) -> bool {
    matches!(
        c,
        '\u{0400}'..='\u{052F}'
            | '\u{2DE0}'..='\u{2DFF}'
            | '\u{A640}'..='\u{A69F}'
            | '\u{1D2B}'
            | '\u{1D78}'
            | '\u{FE2E}'
            | '\u{FE2F}'
    )
}

/// A non-ASCII character that is not an accent character.
///
/// A host containing one only matches when an explicit scheme is present.
#[inline]
pub fn is_unicode_domain_char(c: char) -> bool {
    !c.is_ascii() && !is_accent_char(c)
}

/// May `c` sit immediately before the start of a link?
#[inline]
pub fn is_preceding_char(c: char) -> bool {
    match ascii_flags(c) {
        Some(f) => f & NOT_PRECEDING_CHAR == 0,
        None => !matches!(c, '\u{FF20}' | '\u{202A}'..='\u{202E}'),
    }
}

#[inline]
pub fn is_alnum(c: char) -> bool {
    has_ascii_flag(c, ALNUM)
}

#[inline]
pub fn is_alnum_at(c: char) -> bool {
    has_ascii_flag(c, ALNUM_AT)
}

/// `-` or `_`, which may not border a dot or start a host.
#[inline]
pub fn is_domain_symbol(c: char) -> bool {
    matches!(c, '-' | '_')
}

/// ASCII-only lowercase fold, as used for TLD hashing and scheme matching.
#[inline]
pub const fn fold(c: char) -> char {
    c.to_ascii_lowercase()
}
