//! UTS-46 codepoint classification and mapping
//!
//! The classification is derived rather than table driven: mapped characters
//! are the ones whose lowercase NFKC form differs from themselves, which is
//! how the UTS-46 table itself is generated for the bulk of the repertoire.
//! The explicit tables below cover the characters UTS-46 singles out.

use unicode_normalization::UnicodeNormalization;

use crate::domain::category::is_unassigned;

/// UTS-46 status of a single codepoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharStatus {
    Valid,
    Ignored,
    Mapped(String),
    /// Mapped only under transitional processing
    Deviation(&'static str),
    Disallowed,
}

/// Codepoints treated as label separators in addition to `.`.
const DOT_LIKE: [char; 3] = ['\u{3002}', '\u{FF0E}', '\u{FF61}'];

pub const ZWNJ: char = '\u{200C}';
pub const ZWJ: char = '\u{200D}';

const DEVIATIONS: [(char, &str); 4] = [
    ('\u{00DF}', "ss"),
    ('\u{03C2}', "\u{03C3}"),
    (ZWNJ, ""),
    (ZWJ, ""),
];

const IGNORED: [(u32, u32); 11] = [
    (0x00AD, 0x00AD),
    (0x034F, 0x034F),
    (0x180B, 0x180D),
    (0x180F, 0x180F),
    (0x200B, 0x200B),
    (0x2060, 0x2060),
    (0x2064, 0x2064),
    (0xFE00, 0xFE0F),
    (0xFEFF, 0xFEFF),
    (0x1BCA0, 0x1BCA3),
    (0xE0100, 0xE01EF),
];

const DISALLOWED: [(u32, u32); 14] = [
    // bidi controls and invisible operators
    (0x061C, 0x061C),
    (0x200E, 0x200F),
    (0x2028, 0x202E),
    (0x2061, 0x2063),
    (0x2066, 0x206F),
    // noncharacters, interlinear annotation, replacement characters
    (0xFDD0, 0xFDEF),
    (0xFFF9, 0xFFFD),
    // private use
    (0xE000, 0xF8FF),
    (0xF0000, 0xFFFFD),
    (0x100000, 0x10FFFD),
    // tags
    (0xE0001, 0xE0001),
    (0xE0020, 0xE007F),
    // musical symbol formatting controls
    (0x1D173, 0x1D17A),
    // hangul filler
    (0x3164, 0x3164),
];

fn in_ranges(c: char, ranges: &[(u32, u32)]) -> bool {
    let cp = c as u32;
    ranges.iter().any(|&(lo, hi)| lo <= cp && cp <= hi)
}

fn is_noncharacter(c: char) -> bool {
    (c as u32) & 0xFFFE == 0xFFFE
}

/// Whether `c` separates labels.
pub fn is_dot(c: char) -> bool {
    c == '.' || DOT_LIKE.contains(&c)
}

/// Classify a single codepoint.
pub fn status(c: char) -> CharStatus {
    if c.is_ascii() {
        return if c.is_ascii_uppercase() {
            CharStatus::Mapped(c.to_ascii_lowercase().to_string())
        } else {
            // ASCII punctuation and controls are left to the STD3 rule
            CharStatus::Valid
        };
    }
    if DOT_LIKE.contains(&c) {
        return CharStatus::Mapped(".".to_string());
    }
    if let Some(&(_, target)) = DEVIATIONS.iter().find(|(d, _)| *d == c) {
        return CharStatus::Deviation(target);
    }
    if in_ranges(c, &IGNORED) {
        return CharStatus::Ignored;
    }
    if c.is_control()
        || is_noncharacter(c)
        || in_ranges(c, &DISALLOWED)
        || is_unassigned(c)
    {
        return CharStatus::Disallowed;
    }
    if c.is_whitespace() {
        // disallowed_STD3_mapped: becomes a space, which STD3 then rejects
        return CharStatus::Mapped(" ".to_string());
    }

    let folded = fold(c);
    let mut chars = folded.chars();
    match (chars.next(), chars.next()) {
        (Some(only), None) if only == c => CharStatus::Valid,
        (None, _) => CharStatus::Ignored,
        _ => CharStatus::Mapped(folded),
    }
}

/// Lowercase, compatibility-decompose and recompose, lowercase again.
///
/// The second lowercase pass catches compatibility forms that expand to
/// capitals, such as U+2121 TELEPHONE SIGN.
fn fold(c: char) -> String {
    let lowered: String = c.to_lowercase().collect();
    let nfkc: String = lowered.nfkc().collect();
    nfkc.chars().flat_map(char::to_lowercase).collect()
}

/// Map a whole domain string and normalize the result to NFC.
///
/// Disallowed codepoints are kept so that validation can report them per label.
pub fn map_domain(input: &str, transitional: bool) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match status(c) {
            CharStatus::Valid | CharStatus::Disallowed => output.push(c),
            CharStatus::Ignored => {}
            CharStatus::Mapped(s) => output.push_str(&s),
            CharStatus::Deviation(s) => {
                if transitional {
                    output.push_str(s);
                } else {
                    output.push(c);
                }
            }
        }
    }
    output.nfc().collect()
}

/// Lowercase ASCII and turn dot-like separators into `.`, nothing else.
///
/// Enough to recognize ACE labels without touching the rest of the input.
pub fn map_separators(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if DOT_LIKE.contains(&c) {
                '.'
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_uppercase_when_mapping_then_lowercases() {
        assert_eq!(map_domain("MÜLLER.DE", false), "müller.de");
    }

    #[test]
    fn given_fullwidth_and_ideographic_dot_when_mapping_then_folds() {
        assert_eq!(map_domain("ｅｘａｍｐｌｅ。com", false), "example.com");
    }

    #[test]
    fn given_deviation_when_mapping_then_depends_on_transitional() {
        assert_eq!(map_domain("faß.de", false), "faß.de");
        assert_eq!(map_domain("faß.de", true), "fass.de");
        assert_eq!(map_domain("a\u{200D}b", true), "ab");
        assert_eq!(map_domain("a\u{200D}b", false), "a\u{200D}b");
    }

    #[test]
    fn given_soft_hyphen_when_mapping_then_ignored() {
        assert_eq!(map_domain("ex\u{00AD}ample", false), "example");
    }

    #[test]
    fn given_decomposed_sequence_when_mapping_then_composes_to_nfc() {
        assert_eq!(map_domain("mu\u{0308}ller", false), "müller");
    }

    #[test]
    fn given_compatibility_capitals_when_mapping_then_lowercased() {
        assert_eq!(map_domain("\u{2121}", false), "tel");
    }

    #[test]
    fn given_private_use_when_classifying_then_disallowed_and_kept() {
        assert_eq!(status('\u{E000}'), CharStatus::Disallowed);
        assert_eq!(map_domain("a\u{E000}", false), "a\u{E000}");
    }

    #[test]
    fn given_unassigned_codepoint_when_classifying_then_disallowed() {
        assert_eq!(status('\u{0378}'), CharStatus::Disallowed);
        assert_eq!(map_domain("a\u{0378}", false), "a\u{0378}");
    }

    #[test]
    fn given_plain_letters_when_classifying_then_valid() {
        assert_eq!(status('a'), CharStatus::Valid);
        assert_eq!(status('ü'), CharStatus::Valid);
        assert_eq!(status('中'), CharStatus::Valid);
        assert_eq!(status('Ü'), CharStatus::Mapped("ü".into()));
    }

    #[test]
    fn given_separators_when_minimal_mapping_then_only_dots_and_ascii_case_change() {
        assert_eq!(map_separators("XN--MLLER-KVA。DE"), "xn--mller-kva.de");
        assert_eq!(map_separators("Ü"), "Ü");
        assert!(is_dot('\u{FF61}'));
    }
}
