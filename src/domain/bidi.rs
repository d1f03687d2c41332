//! Bidi rule for labels ([RFC 5893](https://tools.ietf.org/html/rfc5893) section 2)

use unicode_bidi::{bidi_class, BidiClass};

/// Whether `s` contains a right-to-left or Arabic-number codepoint.
///
/// The rule applies to every label of a domain once any label qualifies.
pub fn is_bidi_domain(s: &str) -> bool {
    s.chars()
        .filter(|c| !c.is_ascii_graphic())
        .any(|c| matches!(bidi_class(c), BidiClass::R | BidiClass::AL | BidiClass::AN))
}

/// Class of the last character that is not a non-spacing mark.
fn last_non_nsm(label: &str) -> Option<BidiClass> {
    label
        .chars()
        .rev()
        .map(bidi_class)
        .find(|class| *class != BidiClass::NSM)
}

/// Check RFC 5893 rules 1-6 on a single label.
pub fn passes_bidi(label: &str) -> bool {
    let Some(first) = label.chars().next() else {
        return true;
    };

    match bidi_class(first) {
        // rules 5 and 6
        BidiClass::L => {
            let allowed = label.chars().map(bidi_class).all(|class| {
                matches!(
                    class,
                    BidiClass::L
                        | BidiClass::EN
                        | BidiClass::ES
                        | BidiClass::CS
                        | BidiClass::ET
                        | BidiClass::ON
                        | BidiClass::BN
                        | BidiClass::NSM
                )
            });
            allowed && matches!(last_non_nsm(label), Some(BidiClass::L | BidiClass::EN))
        }
        // rules 2, 3 and 4
        BidiClass::R | BidiClass::AL => {
            let mut found_en = false;
            let mut found_an = false;
            for class in label.chars().map(bidi_class) {
                match class {
                    BidiClass::EN => found_en = true,
                    BidiClass::AN => found_an = true,
                    BidiClass::R
                    | BidiClass::AL
                    | BidiClass::ES
                    | BidiClass::CS
                    | BidiClass::ET
                    | BidiClass::ON
                    | BidiClass::BN
                    | BidiClass::NSM => {}
                    _ => return false,
                }
            }
            let ends_well = matches!(
                last_non_nsm(label),
                Some(BidiClass::R | BidiClass::AL | BidiClass::EN | BidiClass::AN)
            );
            ends_well && !(found_en && found_an)
        }
        // rule 1
        _ => false,
    }
}
