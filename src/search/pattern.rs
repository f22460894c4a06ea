//! Whole-word search patterns.
//!
//! A keyword matches when it stands on its own: it starts the text or follows
//! a non-letter, and is not followed by more letters or a comma. Letters are
//! ASCII plus the `U+00C0..=U+1EE5` range, which covers accented Latin and the
//! Igbo dotted vowels.
//!
//! The `regex` crate has no look-ahead, so the leading boundary lives in the
//! regex and the trailing boundary is checked on each candidate match.

use super::diacritics::diacritic_fragment;
use super::keyword::letters;

use regex::Regex;

const LETTER_RANGE: &str = r"a-zA-Z\x{00C0}-\x{1EE5}";

pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{C0}'..='\u{1EE5}').contains(&c)
}

#[derive(Debug, Clone)]
enum Matcher {
    /// Any non-empty text.
    Any,
    Word(Regex),
}

#[derive(Debug, Clone)]
pub struct SearchPattern {
    matcher: Matcher,
}

impl SearchPattern {
    /// Builds the whole-word pattern for `keyword`.
    ///
    /// Letters of a diacritic family expand to the whole family, so `"akwa"`
    /// also matches `"ákwà"` and `"ọ"` matches every tone of `"o"`. Any other
    /// letter, capitals included, matches only itself.
    pub fn new(keyword: &str) -> Result<Self, regex::Error> {
        let body: String = letters(keyword)
            .iter()
            .map(|letter| diacritic_fragment(letter))
            .collect();
        let regex = Regex::new(&format!("(?:^|[^{LETTER_RANGE}]){body}"))?;

        tracing::trace!("Built search pattern for '{}': {}", keyword, regex.as_str());

        Ok(Self {
            matcher: Matcher::Word(regex),
        })
    }

    /// The pattern used when no keyword was given: matches any non-empty text.
    pub fn any() -> Self {
        Self {
            matcher: Matcher::Any,
        }
    }

    /// `any()` for an empty keyword, `new(keyword)` otherwise.
    pub fn for_keyword(keyword: &str) -> Result<Self, regex::Error> {
        if keyword.is_empty() {
            Ok(Self::any())
        } else {
            Self::new(keyword)
        }
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        match &self.matcher {
            Matcher::Any => !haystack.is_empty(),
            Matcher::Word(regex) => word_match(regex, haystack),
        }
    }

    pub fn matches_any<I, S>(&self, haystacks: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        haystacks
            .into_iter()
            .any(|haystack| self.is_match(haystack.as_ref()))
    }
}

fn word_match(regex: &Regex, haystack: &str) -> bool {
    let mut start = 0;

    while start <= haystack.len() {
        let Some(candidate) = regex.find_at(haystack, start) else {
            return false;
        };

        if ends_word(&haystack[candidate.end()..]) {
            return true;
        }

        // Retry from the next character so a rejected candidate such as
        // "bia" in "biara bia" does not hide a later standalone one.
        let step = haystack[candidate.start()..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        start = candidate.start() + step;
    }

    false
}

/// Trailing boundary: no letter and no comma right after the keyword. A plural
/// `s` followed by letters is a letter run too, so it is rejected here as well.
fn ends_word(rest: &str) -> bool {
    match rest.chars().next() {
        None => true,
        Some(next) => !(is_letter(next) || next == ','),
    }
}
