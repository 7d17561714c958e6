//! Single-pass link scanner.
//!
//! The scanner jumps from one `.` to the next. Every dot is a candidate and
//! goes through a fixed sequence of stages, each of which may reject it:
//!
//! 1. backward resolution: walk left from the dot to find where the host
//!    starts and whether an `http://` or `https://` scheme precedes it
//! 2. forward resolution: walk right collecting label starts until the host
//!    can no longer continue
//! 3. TLD resolution: find the rightmost label that begins a known TLD,
//!    preferring the longest match
//! 4. policy checks on the matched TLD and the label in front of it
//! 5. extension over port, path and query
//!
//! Most rejected candidates move the cursor just past their dot; an emitted
//! link moves it past the link. Text behind the cursor is never looked at again,
//! apart from the scheme lookbehind which never reaches past the cursor.

use crate::classify::{
    fold, is_alnum_at, is_domain_symbol, is_preceding_char, is_unicode_domain_char,
    is_valid_domain_char,
};
use crate::hash::prefix_hashes;
use crate::limits::{INLINE_HASHES, INLINE_LABELS};
use crate::path::{eat_path, eat_port, eat_query, eat_tco_id, is_tco_link};
use crate::text::Text;
use crate::tld::{TldDictionary, TldInfo, TldKind};
use crate::Span;
use smallvec::SmallVec;

macro_rules! trace_reject {
    ($($arg:tt)*) => {
        #[cfg(feature = "trace")]
        tracing::trace!($($arg)*);
    };
}

/// Per-scan scratch lists. Cleared for every candidate.
#[derive(Debug, Default, Clone)]
pub struct Scratch {
    /// Char position right after each dot of the candidate host.
    labels: SmallVec<[usize; INLINE_LABELS]>,
    /// Hash of every prefix of the TLD region being probed.
    hashes: SmallVec<[i32; INLINE_HASHES]>,
}

/// Result of backward resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Host {
    /// First char of the link (the scheme, when there is one).
    start: usize,
    scheme: bool,
}

/// Result of TLD resolution.
#[derive(Debug, Clone, Copy)]
struct TldMatch {
    /// End of the host.
    end: usize,
    /// Index into `Scratch::labels` of the label the TLD starts at.
    label: usize,
    info: TldInfo,
}

/// How a candidate dot was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Emit { start: usize, end: usize, next: usize },
    Reject { next: usize },
}

/// End of a link after port/path/query extension, and where scanning resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Extension {
    end: usize,
    next: usize,
}

impl Extension {
    fn at(end: usize) -> Self {
        Self { end, next: end }
    }
}

/// Scanner over one decoded text.
pub struct Scanner<'a> {
    dict: &'a TldDictionary,
    text: &'a Text,
    chars: &'a [char],
    scratch: &'a mut Scratch,
}

impl<'a> Scanner<'a> {
    pub fn new(dict: &'a TldDictionary, text: &'a Text, scratch: &'a mut Scratch) -> Self {
        Self {
            dict,
            text,
            chars: text.chars(),
            scratch,
        }
    }

    /// Append every link in the text to `out`, left to right.
    pub fn scan_into(&mut self, out: &mut Vec<Span>) {
        let len = self.chars.len();
        let mut cursor = 0;

        while cursor + 2 < len {
            let Some(dot) = self.find_dot(cursor) else {
                return;
            };
            if dot == len - 1 {
                return;
            }

            match self.resolve_candidate(cursor, dot) {
                Outcome::Emit { start, end, next } => {
                    out.push(self.text.span(start, end));
                    cursor = next;
                }
                Outcome::Reject { next } => cursor = next,
            }
        }
    }

    #[inline]
    fn find_dot(&self, from: usize) -> Option<usize> {
        self.chars[from..]
            .iter()
            .position(|&c| c == '.')
            .map(|pos| from + pos)
    }

    fn resolve_candidate(&mut self, cursor: usize, dot: usize) -> Outcome {
        let skip_dot = Outcome::Reject { next: dot + 1 };

        if dot == cursor || is_domain_symbol(self.chars[dot - 1]) {
            trace_reject!(dot, "no host before dot");
            return skip_dot;
        }

        let Some(host) = self.resolve_backward(cursor, dot) else {
            return skip_dot;
        };

        let limit = self.resolve_forward(dot, host.scheme);

        let Some(tld) = self.resolve_tld(limit) else {
            trace_reject!(dot, "no known TLD");
            return skip_dot;
        };

        if !host.scheme && tld.info.kind == TldKind::CountryCode && tld.label == 0 {
            // Resume after the path the link would have covered, so the
            // slash in front of it does not reject the next host. A query is
            // rescanned: hosts inside it still count.
            trace_reject!(dot, "country code TLD without scheme or subdomain");
            return Outcome::Reject {
                next: self.skip_port_and_path(tld.end),
            };
        }

        let tld_start = self.scratch.labels[tld.label];
        if self.domain_label_has_underscore(host.start, tld_start) {
            trace_reject!(dot, "underscore in domain label");
            return Outcome::Reject { next: tld.end };
        }

        let ext = self.extend(host.start, tld.end, host.scheme);
        Outcome::Emit {
            start: host.start,
            end: ext.end,
            next: ext.next,
        }
    }

    /// Walk left from `dot` to find the start of the host.
    fn resolve_backward(&self, cursor: usize, dot: usize) -> Option<Host> {
        let chars = self.chars;
        let mut boundary: Option<usize> = None;
        let mut last_unicode: Option<usize> = None;

        for i in (cursor..dot).rev() {
            let c = chars[i];

            if c == '/' {
                if is_domain_symbol(chars[i + 1]) {
                    trace_reject!(dot, "host starts with '-' or '_'");
                    return None;
                }
                let start = self.scheme_before(cursor, i);
                if start.is_none() {
                    trace_reject!(dot, "slash without http(s) scheme");
                }
                return start.map(|start| Host { start, scheme: true });
            }

            if !is_valid_domain_char(c) {
                if is_preceding_char(c) {
                    boundary = Some(i);
                    break;
                }
                trace_reject!(dot, "invalid char before host");
                return None;
            }

            if last_unicode.is_none() && is_unicode_domain_char(c) {
                last_unicode = Some(i);
            }
        }

        // Without a scheme the host must not contain non-Latin chars. Cut the
        // host after the last one, unless it sits right before the dot.
        if let Some(u) = last_unicode {
            if u + 1 != dot && is_preceding_char(chars[u]) {
                boundary = Some(u);
            } else {
                trace_reject!(dot, "unicode host without scheme");
                return None;
            }
        }

        let start = match boundary {
            Some(b) => b + 1,
            // The host may only run into the cursor at the start of the text.
            None if cursor == 0 => 0,
            None => {
                trace_reject!(dot, "host runs into previous link");
                return None;
            }
        };
        if start == dot || is_domain_symbol(chars[start]) {
            trace_reject!(dot, "empty host or host starts with '-' or '_'");
            return None;
        }

        Some(Host {
            start,
            scheme: false,
        })
    }

    /// If `http://` or `https://` ends at `slash`, return where it starts.
    fn scheme_before(&self, cursor: usize, slash: usize) -> Option<usize> {
        let chars = self.chars;
        if slash < 2 || chars[slash - 1] != '/' || chars[slash - 2] != ':' {
            return None;
        }
        let colon = slash - 2;

        for scheme in ["https", "http"] {
            let Some(start) = colon.checked_sub(scheme.len()) else {
                continue;
            };
            let matches = chars[start..colon]
                .iter()
                .zip(scheme.chars())
                .all(|(&c, expected)| fold(c) == expected);
            if !matches {
                continue;
            }
            if start < cursor || (start > 0 && !is_preceding_char(chars[start - 1])) {
                return None;
            }
            return Some(start);
        }
        None
    }

    /// Walk right from `dot`, recording label starts. Returns where the host
    /// can no longer continue.
    fn resolve_forward(&mut self, dot: usize, scheme: bool) -> usize {
        let chars = self.chars;
        let len = chars.len();
        let labels = &mut self.scratch.labels;
        labels.clear();
        labels.push(dot + 1);

        let mut unicode_after_dot = false;
        for (i, &c) in chars.iter().enumerate().skip(dot + 1) {
            if c == '.' {
                if i == len - 1 || (!scheme && unicode_after_dot) {
                    return i;
                }
                if is_domain_symbol(chars[i - 1]) {
                    return i - 1;
                }
                if is_domain_symbol(chars[i + 1]) {
                    return i;
                }
                labels.push(i + 1);
                continue;
            }

            if !is_valid_domain_char(c) {
                return i;
            }
            if !unicode_after_dot {
                unicode_after_dot = is_unicode_domain_char(c);
            }
        }
        len
    }

    /// Find the TLD, trying label starts from right to left and lengths from
    /// longest to shortest.
    fn resolve_tld(&mut self, limit: usize) -> Option<TldMatch> {
        let chars = self.chars;
        let dict = self.dict;
        let (shortest, longest) = (dict.shortest(), dict.longest());
        let Scratch { labels, hashes } = &mut *self.scratch;

        for (label, &label_start) in labels.iter().enumerate().rev() {
            let available = limit.saturating_sub(label_start);
            if available < shortest {
                continue;
            }
            let probe_len = available.min(longest);

            hashes.clear();
            prefix_hashes(&chars[label_start..label_start + probe_len], hashes);

            for n in (shortest..=probe_len).rev() {
                let end = label_start + n;
                // A TLD must not just be the prefix of a longer label.
                if chars.get(end).copied().is_some_and(is_alnum_at) {
                    continue;
                }
                let Some(info) = dict.lookup(hashes[n - 1]) else {
                    continue;
                };
                if info.len == n {
                    return Some(TldMatch { end, label, info });
                }
            }
        }
        None
    }

    /// Does the label in front of the TLD contain `_`? Subdomains may.
    fn domain_label_has_underscore(&self, host_start: usize, tld_start: usize) -> bool {
        let tld_dot = tld_start - 1;
        self.chars[host_start..tld_dot]
            .iter()
            .rev()
            .take_while(|&&c| c != '.' && c != '/')
            .any(|&c| c == '_')
    }

    /// End of the port after `host_end`, or `host_end` without one.
    /// `None` when the colon has no digits after it.
    fn port_end(&self, host_end: usize) -> Option<usize> {
        if self.chars.get(host_end) != Some(&':') {
            return Some(host_end);
        }
        match eat_port(self.chars, host_end + 1) {
            0 => None,
            digits => Some(host_end + 1 + digits),
        }
    }

    /// Where scanning resumes after a rejected host: past its port and path.
    fn skip_port_and_path(&self, host_end: usize) -> usize {
        let Some(end) = self.port_end(host_end) else {
            return host_end;
        };
        if self.chars.get(end) == Some(&'/') {
            end + 1 + eat_path(self.chars, end + 1)
        } else {
            end
        }
    }

    /// Extend a resolved host over port, path and query.
    fn extend(&self, url_start: usize, host_end: usize, scheme: bool) -> Extension {
        let chars = self.chars;
        let len = chars.len();
        let Some(mut end) = self.port_end(host_end) else {
            return Extension::at(host_end);
        };

        if end < len && chars[end] == '/' {
            let slash = end;
            end += 1;
            if scheme && is_tco_link(chars, url_start, slash) {
                end += eat_tco_id(chars, end);
                return Extension::at(end);
            }
            end += eat_path(chars, end);
        }

        if end < len && chars[end] == '?' {
            end += 1;
            end += eat_query(chars, end);
        }

        Extension::at(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tld::TldLists;

    fn dict() -> TldDictionary {
        let lists = TldLists::new(
            ["com", "net", "org", "info", "museum"],
            ["jp", "uk", "co", "tv", "ru"],
        );
        TldDictionary::from_lists(&lists).unwrap()
    }

    fn scan(s: &str) -> Vec<String> {
        let dict = dict();
        let text = Text::decode(s);
        let mut scratch = Scratch::default();
        let mut out = Vec::new();
        Scanner::new(&dict, &text, &mut scratch).scan_into(&mut out);
        out.iter().map(|span| span.slice(s).to_string()).collect()
    }

    #[test]
    fn test_bare_domain() {
        assert_eq!(scan("example.com"), ["example.com"]);
        assert_eq!(scan("go to www.example.com now"), ["www.example.com"]);
    }

    #[test]
    fn test_too_short() {
        assert!(scan("").is_empty());
        assert!(scan("a.").is_empty());
        assert!(scan("..").is_empty());
    }

    #[test]
    fn test_scheme() {
        assert_eq!(scan("see http://example.com."), ["http://example.com"]);
        assert_eq!(scan("HTTPS://Example.COM"), ["HTTPS://Example.COM"]);
        assert!(scan("ftp://example.com").is_empty());
        assert!(scan("xhttp://example.com").is_empty());
    }

    #[test]
    fn test_tld_longest_match() {
        assert_eq!(scan("example.museum"), ["example.museum"]);
        assert!(scan("example.comx").is_empty());
        assert_eq!(scan("example.com-x"), ["example.com"]);
    }

    #[test]
    fn test_tld_prefix_of_label() {
        // "com" followed by '@' is not a TLD boundary
        assert!(scan("a.com@b").is_empty());
    }

    #[test]
    fn test_country_code_rules() {
        assert!(scan("example.jp").is_empty());
        assert!(scan("example.jp/path").is_empty());
        assert_eq!(scan("http://example.jp"), ["http://example.jp"]);
        assert_eq!(scan("example.co.jp"), ["example.co.jp"]);
        // co and tv are special by default
        assert_eq!(scan("example.tv"), ["example.tv"]);
    }

    #[test]
    fn test_rejected_country_code_skips_path() {
        assert_eq!(scan("a.jp/b.com c.com"), ["c.com"]);
        assert_eq!(scan("a.jp:80/x,b.com c.com"), ["c.com"]);
    }

    #[test]
    fn test_rejected_country_code_rescans_query() {
        assert_eq!(scan("a.jp?q=b.com"), ["b.com"]);
        assert_eq!(scan("a.jp/x?q=b.com"), ["b.com"]);
        assert_eq!(scan("a.jp:8080?q=b.com&r=c.net"), ["b.com", "c.net"]);
    }

    #[test]
    fn test_preceding_chars() {
        assert!(scan("@example.com").is_empty());
        assert!(scan("#example.com").is_empty());
        assert!(scan("$example.com").is_empty());
        assert_eq!(scan("(example.com)"), ["example.com"]);
    }

    #[test]
    fn test_hyphen_underscore_boundaries() {
        assert!(scan("-example.com").is_empty());
        assert!(scan("example-.com").is_empty());
        assert_eq!(scan("my-site.com"), ["my-site.com"]);
        assert!(scan("http://-example.com").is_empty());
    }

    #[test]
    fn test_underscore_rule() {
        assert!(scan("sub_domain.com").is_empty());
        assert_eq!(scan("sub_domain.example.com"), ["sub_domain.example.com"]);
    }

    #[test]
    fn test_empty_host_before_dot() {
        assert!(scan("see .com").is_empty());
    }

    #[test]
    fn test_port() {
        assert_eq!(scan("example.com:8080/x"), ["example.com:8080/x"]);
        assert_eq!(scan("example.com:x"), ["example.com"]);
        assert_eq!(scan("example.com:"), ["example.com"]);
    }

    #[test]
    fn test_path_and_query() {
        assert_eq!(scan("example.com/a/b?c=d."), ["example.com/a/b?c=d"]);
        assert_eq!(scan("example.com?q=1"), ["example.com?q=1"]);
        assert_eq!(scan("example.com/"), ["example.com/"]);
    }

    #[test]
    fn test_tco_shortcut() {
        assert_eq!(scan("http://t.co/abcde"), ["http://t.co/abcde"]);
        assert_eq!(scan("https://t.co/abcDEF12"), ["https://t.co/abcDEF12"]);
        // The id stops at the first non-alphanumeric; no query is consumed
        assert_eq!(scan("http://t.co/abc-def?x=1"), ["http://t.co/abc"]);
    }

    #[test]
    fn test_unicode_host_needs_scheme() {
        assert!(scan("日本.com").is_empty());
        assert_eq!(scan("http://日本.com"), ["http://日本.com"]);
        assert_eq!(scan("日本語example.com"), ["example.com"]);
    }

    #[test]
    fn test_accented_host() {
        assert_eq!(scan("café.com"), ["café.com"]);
    }

    #[test]
    fn test_multiple_links() {
        assert_eq!(
            scan("a.com, b.net and http://c.org/x"),
            ["a.com", "b.net", "http://c.org/x"]
        );
    }

    #[test]
    fn test_scheme_not_before_cursor() {
        assert_eq!(scan("a.com:http://b.com"), ["a.com", "http://b.com"]);
    }

    #[test]
    fn test_hash_hit_with_other_length_skipped() {
        let mut dict = TldDictionary::new();
        dict.insert("co", TldKind::General).unwrap();
        dict.insert("museum", TldKind::General).unwrap();
        // A colliding entry under the hash of "co-" that describes a 2-char TLD
        dict.insert_hashed(
            crate::hash::hash_str("co-"),
            TldInfo {
                kind: TldKind::General,
                len: 2,
            },
        );

        let s = "example.co--";
        let text = Text::decode(s);
        let mut scratch = Scratch::default();
        let mut out = Vec::new();
        Scanner::new(&dict, &text, &mut scratch).scan_into(&mut out);
        let found: Vec<&str> = out.iter().map(|span| span.slice(s)).collect();
        assert_eq!(found, ["example.co"]);
    }

    #[test]
    fn test_empty_dictionary() {
        let dict = TldDictionary::new();
        let text = Text::decode("example.com");
        let mut scratch = Scratch::default();
        let mut out = Vec::new();
        Scanner::new(&dict, &text, &mut scratch).scan_into(&mut out);
        assert!(out.is_empty());
    }
}
