//! TLD word lists and the hash-keyed dictionary built from them.

use crate::error::{Error, Result};
use crate::hash::hash_str;
use crate::limits;
use rustc_hash::FxBuildHasher as FastHashBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// How a TLD affects matching policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TldKind {
    General,
    /// A country code. Without a scheme it needs at least two labels
    /// in front of it (`example.co.jp`, not `example.jp`).
    CountryCode,
    /// A country code that is matched like a general TLD.
    SpecialCountryCode,
}

/// Dictionary descriptor for one TLD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TldInfo {
    pub kind: TldKind,
    /// Length in chars.
    pub len: usize,
}

fn default_special_country_code() -> Vec<String> {
    vec!["co".to_string(), "tv".to_string()]
}

/// The three TLD word lists a dictionary is built from.
///
/// # Example
/// ```
/// let lists = urlspan::TldLists::from_json_str(r#"{"general": ["com"], "country_code": ["jp", "co"]}"#)?;
/// assert_eq!(lists.special_country_code, ["co", "tv"]);
/// # Ok::<(), urlspan::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TldLists {
    #[serde(default)]
    pub general: Vec<String>,
    #[serde(default)]
    pub country_code: Vec<String>,
    /// Country codes that behave like general TLDs. Entries here are
    /// dropped from `country_code`.
    #[serde(default = "default_special_country_code")]
    pub special_country_code: Vec<String>,
}

impl Default for TldLists {
    fn default() -> Self {
        Self {
            general: Vec::new(),
            country_code: Vec::new(),
            special_country_code: default_special_country_code(),
        }
    }
}

impl TldLists {
    /// Build lists with the default special country codes (`co`, `tv`).
    pub fn new<G, C, S>(general: G, country_code: C) -> Self
    where
        G: IntoIterator<Item = S>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            general: general.into_iter().map(Into::into).collect(),
            country_code: country_code.into_iter().map(Into::into).collect(),
            special_country_code: default_special_country_code(),
        }
    }

    /// Replace the special country code list.
    pub fn with_special_country_code<S: Into<String>>(
        mut self,
        special: impl IntoIterator<Item = S>,
    ) -> Self {
        self.special_country_code = special.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Lengths of `max_len` chars or more are rejected.
fn check_len(tld: &str, len: usize, max_len: usize) -> Result<()> {
    if len >= max_len {
        return Err(Error::InvalidTld {
            tld: tld.to_string(),
            len,
        });
    }
    Ok(())
}

/// Hash-keyed TLD dictionary.
///
/// Keys are [`hash_str`] values, so lookups during scanning never build a
/// string. Two different TLDs may collide; callers validate a hit by
/// comparing [`TldInfo::len`] with the length they probed.
#[derive(Debug, Clone)]
pub struct TldDictionary {
    by_hash: HashMap<i32, TldInfo, FastHashBuilder>,
    shortest: usize,
    longest: usize,
}

impl Default for TldDictionary {
    fn default() -> Self {
        Self {
            by_hash: HashMap::default(),
            shortest: usize::MAX,
            longest: 0,
        }
    }
}

impl TldDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary: general TLDs, then special country codes, then the
    /// remaining country codes.
    pub fn from_lists(lists: &TldLists) -> Result<Self> {
        Self::from_lists_bounded(lists, limits::MAX_TLD_LEN)
    }

    fn from_lists_bounded(lists: &TldLists, max_len: usize) -> Result<Self> {
        let mut dict = Self::new();
        dict.by_hash.reserve(
            lists.general.len() + lists.country_code.len() + lists.special_country_code.len(),
        );

        for tld in &lists.general {
            dict.insert_bounded(tld, TldKind::General, max_len)?;
        }
        for tld in &lists.special_country_code {
            dict.insert_bounded(tld, TldKind::SpecialCountryCode, max_len)?;
        }
        for tld in &lists.country_code {
            let is_special = lists
                .special_country_code
                .iter()
                .any(|s| s.eq_ignore_ascii_case(tld));
            if !is_special {
                dict.insert_bounded(tld, TldKind::CountryCode, max_len)?;
            }
        }

        tracing::debug!(
            entries = dict.len(),
            shortest = dict.shortest,
            longest = dict.longest,
            "built TLD dictionary"
        );
        Ok(dict)
    }

    /// Add one TLD. Later insertions under the same hash replace earlier ones.
    pub fn insert(&mut self, tld: &str, kind: TldKind) -> Result<()> {
        self.insert_bounded(tld, kind, limits::MAX_TLD_LEN)
    }

    fn insert_bounded(&mut self, tld: &str, kind: TldKind, max_len: usize) -> Result<()> {
        let len = tld.chars().count();
        check_len(tld, len, max_len)?;
        if len == 0 {
            tracing::warn!(?kind, "skipping empty TLD entry");
            return Ok(());
        }

        self.shortest = self.shortest.min(len);
        self.longest = self.longest.max(len);

        let info = TldInfo { kind, len };
        if let Some(prev) = self.by_hash.insert(hash_str(tld), info) {
            if prev.len != len {
                tracing::warn!(tld, "TLD hash collides with an entry of a different length");
            }
        }
        Ok(())
    }

    /// Store a descriptor under an arbitrary hash.
    #[cfg(test)]
    pub(crate) fn insert_hashed(&mut self, hash: i32, info: TldInfo) {
        self.shortest = self.shortest.min(info.len);
        self.longest = self.longest.max(info.len);
        self.by_hash.insert(hash, info);
    }

    #[inline]
    pub fn lookup(&self, hash: i32) -> Option<TldInfo> {
        self.by_hash.get(&hash).copied()
    }

    /// Look up a TLD by name, validating the length like the scanner does.
    pub fn get(&self, tld: &str) -> Option<TldInfo> {
        let len = tld.chars().count();
        self.lookup(hash_str(tld)).filter(|info| info.len == len)
    }

    /// Length of the shortest TLD, `usize::MAX` when empty.
    #[inline]
    pub fn shortest(&self) -> usize {
        self.shortest
    }

    /// Length of the longest TLD, 0 when empty.
    #[inline]
    pub fn longest(&self) -> usize {
        self.longest
    }

    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists() -> TldLists {
        TldLists::new(["com", "museum", "info"], ["jp", "CO", "uk", "tv"])
    }

    #[test]
    fn test_kinds() {
        let dict = TldDictionary::from_lists(&lists()).unwrap();
        assert_eq!(dict.get("com").unwrap().kind, TldKind::General);
        assert_eq!(dict.get("jp").unwrap().kind, TldKind::CountryCode);
        assert_eq!(dict.get("co").unwrap().kind, TldKind::SpecialCountryCode);
        assert_eq!(dict.get("tv").unwrap().kind, TldKind::SpecialCountryCode);
        assert_eq!(dict.get("org"), None);
    }

    #[test]
    fn test_specials_not_duplicated() {
        let dict = TldDictionary::from_lists(&lists()).unwrap();
        // com, museum, info, co, tv, jp, uk
        assert_eq!(dict.len(), 7);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let dict = TldDictionary::from_lists(&lists()).unwrap();
        assert_eq!(dict.get("COM").unwrap().len, 3);
        assert_eq!(dict.get("Jp").unwrap().kind, TldKind::CountryCode);
    }

    #[test]
    fn test_length_bounds() {
        let dict = TldDictionary::from_lists(&lists()).unwrap();
        assert_eq!(dict.shortest(), 2);
        assert_eq!(dict.longest(), 6);

        let empty = TldDictionary::new();
        assert!(empty.is_empty());
        assert_eq!(empty.shortest(), usize::MAX);
        assert_eq!(empty.longest(), 0);
    }

    #[test]
    fn test_empty_entry_skipped() {
        let dict = TldDictionary::from_lists(&TldLists::new(["", "com"], Vec::<&str>::new())).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.shortest(), 3);
    }

    #[test]
    fn test_unicode_tld_length_in_chars() {
        let dict = TldDictionary::from_lists(&TldLists::new(["みんな"], ["рф"])).unwrap();
        assert_eq!(dict.get("みんな").unwrap().len, 3);
        assert_eq!(dict.get("рф").unwrap().len, 2);
    }

    #[test]
    fn test_special_override_list() {
        let lists = TldLists::new(["com"], ["co", "tv"]).with_special_country_code(["tv"]);
        let dict = TldDictionary::from_lists(&lists).unwrap();
        assert_eq!(dict.get("co").unwrap().kind, TldKind::CountryCode);
        assert_eq!(dict.get("tv").unwrap().kind, TldKind::SpecialCountryCode);
    }

    #[test]
    fn test_check_len_at_limit() {
        assert!(check_len("x", limits::MAX_TLD_LEN - 1, limits::MAX_TLD_LEN).is_ok());
        assert!(matches!(
            check_len("x", limits::MAX_TLD_LEN, limits::MAX_TLD_LEN),
            Err(Error::InvalidTld { len, .. }) if len == limits::MAX_TLD_LEN
        ));
    }

    #[test]
    fn test_too_long_tld_fails_construction() {
        let lists = TldLists::new(["com", "museum"], ["jp"]);
        let err = TldDictionary::from_lists_bounded(&lists, 6).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTld { ref tld, len: 6 } if tld == "museum"
        ));

        let special = TldLists::new(["com"], ["jp"]).with_special_country_code(["toolong"]);
        assert!(matches!(
            TldDictionary::from_lists_bounded(&special, 6),
            Err(Error::InvalidTld { len: 7, .. })
        ));

        assert!(TldDictionary::from_lists_bounded(&lists, 7).is_ok());
    }

    #[test]
    fn test_lists_from_json() {
        let lists = TldLists::from_json_str(
            r#"{"general": ["com"], "country_code": ["jp"], "special_country_code": []}"#,
        )
        .unwrap();
        assert_eq!(lists.general, ["com"]);
        assert!(lists.special_country_code.is_empty());

        let defaulted = TldLists::from_json_str(r#"{"general": ["com"]}"#).unwrap();
        assert_eq!(defaulted.special_country_code, ["co", "tv"]);
        assert!(defaulted.country_code.is_empty());
    }

    #[test]
    fn test_lists_from_bad_json() {
        assert!(matches!(
            TldLists::from_json_str("[1, 2]"),
            Err(Error::Config(_))
        ));
    }
}
