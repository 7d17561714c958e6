//! Port, path and query consumers.
//!
//! Each consumer starts right after its trigger character and returns how
//! many chars belong to the link. Trailing punctuation that is valid inside a
//! path or query but not at its end (`.`, `,`, `!`, ...) is left out.

use crate::classify::{ascii_flags, flags, fold, is_accent_char, is_alnum, is_cyrillic_char};
use crate::limits;

/// Count the ASCII digits of a port number starting at `start`.
pub fn eat_port(text: &[char], start: usize) -> usize {
    text[start.min(text.len())..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .count()
}

/// Is this a `http://t.co/` or `https://t.co/` link with an id after the slash?
///
/// `url_start` is where the scheme starts and `slash` is the path slash.
pub fn is_tco_link(text: &[char], url_start: usize, slash: usize) -> bool {
    let prefix_len = slash - url_start;
    if !(prefix_len == 11 || prefix_len == 12) {
        return false;
    }
    let tail = &text[slash - 5..slash];
    tail[0] == '/'
        && fold(tail[1]) == 't'
        && tail[2] == '.'
        && fold(tail[3]) == 'c'
        && fold(tail[4]) == 'o'
        && text.get(slash + 1).copied().is_some_and(is_alnum)
}

/// Length of the alphanumeric short-link id starting at `start`.
pub fn eat_tco_id(text: &[char], start: usize) -> usize {
    text[start..].iter().take_while(|&&c| is_alnum(c)).count()
}

/// Consume a URL path starting right after its leading `/`.
pub fn eat_path(text: &[char], start: usize) -> usize {
    const MASK: u16 = flags::ALNUM | flags::PATH_ENDING | flags::PATH | flags::LPAREN;

    let mut last_ending: Option<usize> = None;
    // (position of '(', chars through the matching ')')
    let mut last_group: Option<(usize, usize)> = None;

    let mut i = start;
    while i < text.len() {
        let c = text[i];
        match ascii_flags(c) {
            Some(f) => match f & MASK {
                0 => break,
                flags::PATH => {}
                flags::LPAREN => {
                    let group_len = eat_path_group(text, i + 1, 1);
                    if group_len == 0 {
                        break;
                    }
                    last_group = Some((i, group_len));
                    i += group_len;
                }
                _ => last_ending = Some(i),
            },
            None if is_cyrillic_char(c) || is_accent_char(c) => last_ending = Some(i),
            None => break,
        }
        i += 1;
    }

    // Keep a closing paren when the group starts the path or directly
    // follows the last terminator: "a.com/(a)", "a.com/test(a)."
    if let Some((paren, group_len)) = last_group {
        let adjacent = match last_ending {
            None => paren == start,
            Some(end) => end + 1 == paren,
        };
        if adjacent {
            last_ending = Some(paren + group_len);
        }
    }

    last_ending.map_or(0, |end| end - start + 1)
}

/// Consume the inside of a parenthesized path group, starting after `(`.
///
/// Returns the number of chars through the closing `)`, or 0 if the group
/// is not terminated.
fn eat_path_group(text: &[char], start: usize, depth: usize) -> usize {
    const MASK: u16 =
        flags::ALNUM | flags::PATH_ENDING | flags::PATH | flags::LPAREN | flags::RPAREN;

    if depth > limits::MAX_PATH_PAREN_DEPTH {
        return 0;
    }

    let mut i = start;
    while i < text.len() {
        let c = text[i];
        match ascii_flags(c) {
            Some(f) => match f & MASK {
                0 => return 0,
                flags::LPAREN => {
                    let inner = eat_path_group(text, i + 1, depth + 1);
                    if inner == 0 {
                        return 0;
                    }
                    i += inner;
                }
                flags::RPAREN => return i - start + 1,
                _ => {}
            },
            None if is_cyrillic_char(c) || is_accent_char(c) => {}
            None => return 0,
        }
        i += 1;
    }
    0
}

/// Consume a query string starting right after its `?`. ASCII only.
pub fn eat_query(text: &[char], start: usize) -> usize {
    const MASK: u16 = flags::ALNUM | flags::QUERY_ENDING | flags::QUERY;

    let mut last_ending: Option<usize> = None;
    for (i, &c) in text.iter().enumerate().skip(start) {
        let Some(f) = ascii_flags(c) else {
            break;
        };
        match f & MASK {
            0 => break,
            flags::QUERY => {}
            _ => last_ending = Some(i),
        }
    }
    last_ending.map_or(0, |end| end - start + 1)
}
