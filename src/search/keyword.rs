use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strips surrounding whitespace and the English infinitive marker, so
/// `"to eat"` searches for `"eat"`.
pub fn remove_prefix(keyword: &str) -> &str {
    let keyword = keyword.trim();
    keyword
        .strip_prefix("to ")
        .map(str::trim_start)
        .unwrap_or(keyword)
}

/// Splits `keyword` into letters: each base character together with the
/// combining marks after it, composed where Unicode allows.
///
/// `"ọ̀kụ̀"` becomes `["ọ̀", "k", "ụ̀"]`.
pub fn letters(keyword: &str) -> Vec<String> {
    let mut letters: Vec<String> = Vec::new();

    for c in keyword.nfc() {
        match letters.last_mut() {
            Some(letter) if is_combining_mark(c) => letter.push(c),
            _ => letters.push(c.to_string()),
        }
    }

    letters
}
