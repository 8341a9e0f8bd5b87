//! Paragraph text normalization.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref HYPHENATED_END: Regex = Regex::new(r"\p{L}-$").expect("valid hyphen pattern");
    static ref LOWERCASE_START: Regex =
        Regex::new(r"^\p{Ll}").expect("valid continuation pattern");
}

const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"), // long s + t
    ('\u{FB06}', "st"),
];

/// NFC-normalize text and expand typographic ligatures.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        match LIGATURES.iter().find(|(lig, _)| *lig == c) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

/// Join the lines of a paragraph with single spaces.
///
/// With `dehyphenate`, a line ending in `letter-` followed by a line starting
/// with a lowercase letter is joined without the hyphen.
pub fn join_lines<S: AsRef<str>>(lines: &[S], dehyphenate: bool) -> String {
    let mut result = String::new();

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        if result.is_empty() {
            result.push_str(line);
            continue;
        }

        if dehyphenate && is_broken_word(&result, line) {
            result.pop();
        } else {
            result.push(' ');
        }
        result.push_str(line);
    }

    result
}

fn is_broken_word(prev: &str, next: &str) -> bool {
    HYPHENATED_END.is_match(prev) && LOWERCASE_START.is_match(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ligatures_expanded() {
        assert_eq!(normalize("e\u{FB03}cient \u{FB02}ow"), "efficient flow");
    }

    #[test]
    fn test_nfc_composition() {
        // e + combining acute accent
        assert_eq!(normalize("cafe\u{0301}"), "caf\u{00E9}");
    }

    #[test]
    fn test_join_lines() {
        assert_eq!(join_lines(&["First line", "second line"], true), "First line second line");
        assert_eq!(join_lines(&["infor-", "mation"], true), "information");
        assert_eq!(join_lines(&["infor-", "mation"], false), "infor- mation");
        // Uppercase continuation keeps the hyphen
        assert_eq!(join_lines(&["Jean-", "Paul"], true), "Jean- Paul");
        // A lone dash is not a broken word
        assert_eq!(join_lines(&["1990 -", "today"], true), "1990 - today");
    }

    #[test]
    fn test_dehyphenate_non_ascii() {
        assert_eq!(join_lines(&["Verständ-", "nis"], true), "Verständnis");
        assert_eq!(join_lines(&["naïve-", "ly"], true), "naïvely");
        // Digits before the hyphen do not form a word
        assert_eq!(join_lines(&["page 12-", "end"], true), "page 12- end");
    }

    #[test]
    fn test_join_lines_skips_blank() {
        assert_eq!(join_lines(&["a", "  ", "b"], true), "a b");
        assert_eq!(join_lines::<&str>(&[], true), "");
    }
}
