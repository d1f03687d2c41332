//! Context rules for joiners ([RFC 5892](https://tools.ietf.org/html/rfc5892) appendix A.1, A.2)

use unicode_normalization::char::canonical_combining_class;

use crate::domain::category::is_transparent_mark;

use crate::domain::mapping::{ZWJ, ZWNJ};

const VIRAMA_COMBINING_CLASS: u8 = 9;

/// Cursive joining behavior of a codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JoiningType {
    /// Joins on both sides (includes join-causing)
    Dual,
    Left,
    Right,
    Transparent,
    NonJoining,
}

// Right-joining letters; everything else in the covered blocks is dual-joining.
const RIGHT_JOINING: &[(u32, u32)] = &[
    // Arabic
    (0x0622, 0x0625),
    (0x0627, 0x0627),
    (0x0629, 0x0629),
    (0x062F, 0x0632),
    (0x0648, 0x0648),
    (0x0671, 0x0673),
    (0x0675, 0x0677),
    (0x0688, 0x0699),
    (0x06C0, 0x06C0),
    (0x06C3, 0x06CB),
    (0x06CD, 0x06CD),
    (0x06CF, 0x06CF),
    (0x06D2, 0x06D3),
    (0x06D5, 0x06D5),
    (0x06EE, 0x06EF),
    (0x0759, 0x075B),
    (0x076B, 0x076C),
    (0x0771, 0x0771),
    (0x0773, 0x0774),
    (0x0778, 0x0779),
    // Syriac
    (0x0710, 0x0710),
    (0x0715, 0x0719),
    (0x071E, 0x071E),
    (0x0728, 0x0728),
    (0x072A, 0x072A),
    (0x072C, 0x072C),
    (0x072F, 0x072F),
    (0x074D, 0x074D),
];

const DUAL_JOINING: &[(u32, u32)] = &[
    // Arabic
    (0x0620, 0x0620),
    (0x0626, 0x0626),
    (0x0628, 0x0628),
    (0x062A, 0x062E),
    (0x0633, 0x064A),
    (0x066E, 0x066F),
    (0x0678, 0x0687),
    (0x069A, 0x06BF),
    (0x06C1, 0x06C2),
    (0x06CC, 0x06CC),
    (0x06CE, 0x06CE),
    (0x06D0, 0x06D1),
    (0x06FA, 0x06FC),
    (0x06FF, 0x06FF),
    (0x0750, 0x077F),
    // Syriac
    (0x0712, 0x0714),
    (0x071A, 0x071D),
    (0x071F, 0x0727),
    (0x0729, 0x0729),
    (0x072B, 0x072B),
    (0x072D, 0x072E),
    (0x074E, 0x074F),
    // NKo
    (0x07CA, 0x07EA),
    (0x07FA, 0x07FA),
    // Mongolian
    (0x1807, 0x1807),
    (0x180A, 0x180A),
    (0x1820, 0x1878),
    (0x1887, 0x18A8),
    // Phags-pa
    (0xA840, 0xA871),
];

fn in_ranges(cp: u32, ranges: &[(u32, u32)]) -> bool {
    ranges.iter().any(|&(lo, hi)| lo <= cp && cp <= hi)
}

fn joining_type(c: char) -> JoiningType {
    let cp = c as u32;
    // Right-joining exceptions sit inside dual-joining ranges, so check them first.
    if in_ranges(cp, RIGHT_JOINING) {
        JoiningType::Right
    } else if in_ranges(cp, DUAL_JOINING) {
        JoiningType::Dual
    } else if c == '\u{A872}' {
        JoiningType::Left
    } else if is_transparent_mark(c) || matches!(cp, 0x00AD | 0x200B | 0x070F) {
        JoiningType::Transparent
    } else {
        JoiningType::NonJoining
    }
}

fn follows_virama(chars: &[char], idx: usize) -> bool {
    idx > 0 && canonical_combining_class(chars[idx - 1]) == VIRAMA_COMBINING_CLASS
}

/// `(L|D) T* ZWNJ T* (R|D)` around position `idx`.
fn in_joining_context(chars: &[char], idx: usize) -> bool {
    let before = chars[..idx]
        .iter()
        .rev()
        .map(|&c| joining_type(c))
        .find(|jt| *jt != JoiningType::Transparent);
    let after = chars[idx + 1..]
        .iter()
        .map(|&c| joining_type(c))
        .find(|jt| *jt != JoiningType::Transparent);
    matches!(before, Some(JoiningType::Left | JoiningType::Dual))
        && matches!(after, Some(JoiningType::Right | JoiningType::Dual))
}

/// Whether every ZWJ/ZWNJ in `label` appears in a permitted context.
pub fn passes_joiners(label: &str) -> bool {
    let chars: Vec<char> = label.chars().collect();
    chars.iter().enumerate().all(|(idx, &c)| match c {
        ZWJ => follows_virama(&chars, idx),
        ZWNJ => follows_virama(&chars, idx) || in_joining_context(&chars, idx),
        _ => true,
    })
}
