//! Affix handling and whole-word search for Bisaya word forms.

use std::ops::Range;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical composed (NFC) form of `s`.
pub fn nfc(s: &str) -> String {
    s.nfc().collect()
}

/// Candidate surface forms of `word`, in search priority order.
///
/// The literal word comes first, then its lowercase form, then the lowercase
/// form with each affix prepended. Duplicates are dropped.
pub fn candidate_forms<S: AsRef<str>>(word: &str, affixes: &[S]) -> Vec<String> {
    let word = word.trim();
    if word.is_empty() {
        return Vec::new();
    }

    let word = nfc(word);
    let word = word.as_str();
    let lower = word.to_lowercase();
    let mut forms: Vec<String> = Vec::with_capacity(affixes.len() + 2);
    let mut push = |form: String| {
        if !forms.contains(&form) {
            forms.push(form);
        }
    };

    push(word.to_string());
    push(lower.clone());
    for affix in affixes {
        push(format!("{}{}", affix.as_ref().to_lowercase(), lower));
    }

    forms
}

/// Strip the first matching affix from `word`.
///
/// Affixes are tried in order; the first one that is a prefix and leaves a
/// non-empty remainder wins. Comparison is case-insensitive and expects the
/// affixes in lowercase.
pub fn strip_affix<'a, S: AsRef<str>>(word: &'a str, affixes: &[S]) -> Option<&'a str> {
    affixes.iter().find_map(|affix| {
        let affix = affix.as_ref();
        let head = word.get(..affix.len())?;
        let rest = &word[affix.len()..];
        (head.eq_ignore_ascii_case(affix) && !rest.is_empty()).then_some(rest)
    })
}

/// Base form of a word: the word with one affix removed, if any applies.
pub fn base_form<'a, S: AsRef<str>>(word: &'a str, affixes: &[S]) -> &'a str {
    strip_affix(word, affixes).unwrap_or(word)
}

/// Byte range of the leftmost whole-word, case-insensitive occurrence of
/// `needle` in `haystack`.
///
/// A match must be bounded on both sides by a non-letter or the string end.
/// Letters are alphabetic characters or combining marks, so accented Latin
/// counts as a letter in either form. `needle` is NFC-normalized; `haystack`
/// is searched as given, so pass it through [`nfc`] first.
pub fn find_whole_word(haystack: &str, needle: &str) -> Option<Range<usize>> {
    let needle: Vec<char> = needle.nfc().collect();
    if needle.is_empty() {
        return None;
    }

    let chars: Vec<(usize, char)> = haystack.char_indices().collect();
    if chars.len() < needle.len() {
        return None;
    }

    for start in 0..=chars.len() - needle.len() {
        let end = start + needle.len();

        let matches = chars[start..end]
            .iter()
            .zip(&needle)
            .all(|(&(_, a), &b)| chars_eq_ignore_case(a, b));
        if !matches {
            continue;
        }

        let left_ok = start == 0 || !is_letter(chars[start - 1].1);
        let right_ok = end == chars.len() || !is_letter(chars[end].1);
        if left_ok && right_ok {
            let byte_start = chars[start].0;
            let byte_end = chars.get(end).map_or(haystack.len(), |&(i, _)| i);
            return Some(byte_start..byte_end);
        }
    }

    None
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() || is_combining_mark(c)
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
