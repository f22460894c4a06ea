//! Diacritic families for Igbo letters.
//!
//! Every vowel and syllabic nasal can carry a tone mark (grave, acute or
//! macron), and `i o u n` also have dotted forms. Text in the store mixes
//! precomposed characters with base-plus-combining-mark sequences, so each
//! family lists both spellings.

use regex::escape;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

const TONE_MARKS: [char; 3] = ['\u{300}', '\u{301}', '\u{304}'];

struct Family {
    base: char,
    /// Untoned spellings; each also appears followed by every tone mark.
    bases: &'static [&'static str],
    /// Toned letters that exist as a single code point.
    precomposed: &'static [char],
}

const FAMILIES: &[Family] = &[
    Family {
        base: 'a',
        bases: &["a"],
        precomposed: &['\u{E0}', '\u{E1}', '\u{101}'],
    },
    Family {
        base: 'e',
        bases: &["e"],
        precomposed: &['\u{E8}', '\u{E9}', '\u{113}'],
    },
    Family {
        base: 'i',
        bases: &["i", "\u{1ECB}", "i\u{323}"],
        precomposed: &['\u{EC}', '\u{ED}', '\u{12B}'],
    },
    Family {
        base: 'o',
        bases: &["o", "\u{1ECD}", "o\u{323}"],
        precomposed: &['\u{F2}', '\u{F3}', '\u{14D}'],
    },
    Family {
        base: 'u',
        bases: &["u", "\u{1EE5}", "u\u{323}"],
        precomposed: &['\u{F9}', '\u{FA}', '\u{16B}'],
    },
    Family {
        base: 'm',
        bases: &["m"],
        precomposed: &['\u{1E3F}'],
    },
    Family {
        base: 'n',
        bases: &["n", "\u{1E45}", "n\u{307}"],
        precomposed: &['\u{1F9}', '\u{144}'],
    },
];

static FRAGMENTS: LazyLock<HashMap<char, String>> = LazyLock::new(|| {
    FAMILIES
        .iter()
        .map(|family| (family.base, family_fragment(family)))
        .collect()
});

/// Every spelling of every family, in NFC, mapped to its family's base letter.
static MEMBERS: LazyLock<HashMap<String, char>> = LazyLock::new(|| {
    FAMILIES
        .iter()
        .flat_map(|family| {
            spellings(family)
                .into_iter()
                .map(move |spelling| (spelling.nfc().collect::<String>(), family.base))
        })
        .collect()
});

fn spellings(family: &Family) -> Vec<String> {
    family
        .bases
        .iter()
        .flat_map(|base| {
            std::iter::once(base.to_string())
                .chain(TONE_MARKS.iter().map(move |mark| format!("{base}{mark}")))
        })
        .chain(family.precomposed.iter().map(|c| c.to_string()))
        .collect()
}

fn family_fragment(family: &Family) -> String {
    let mut variants = spellings(family);

    // Longest spelling first: the regex engine takes the first alternative
    // that matches, and a bare base must not cut a combining mark off.
    variants.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    variants.dedup();

    format!("(?:{})", variants.join("|"))
}

/// Returns the variant spellings of the family whose base letter is `base`.
pub fn variants(base: char) -> Option<Vec<String>> {
    FAMILIES.iter().find(|f| f.base == base).map(spellings)
}

/// Maps one letter (a base character plus its combining marks) to a regex
/// fragment.
///
/// A letter that belongs to a family matches every spelling of that family.
/// Anything else matches only itself, composed or decomposed, with regex
/// metacharacters escaped.
pub fn diacritic_fragment(letter: &str) -> Cow<'static, str> {
    let composed: String = letter.nfc().collect();

    if let Some(fragment) = MEMBERS.get(&composed).and_then(|base| FRAGMENTS.get(base)) {
        return Cow::Borrowed(fragment.as_str());
    }

    let decomposed: String = letter.nfd().collect();
    if composed == decomposed {
        Cow::Owned(escape(&composed))
    } else {
        Cow::Owned(format!("(?:{}|{})", escape(&composed), escape(&decomposed)))
    }
}
