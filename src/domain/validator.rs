//! Label validation
//!
//! Every check runs independently; the result is the set of violated rules,
//! empty when the label is valid.

use std::collections::BTreeSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::is_nfc;

use crate::domain::bidi::passes_bidi;
use crate::domain::entities::{Label, LabelContext, LabelForm, ProcessingOptions, MAX_LABEL_LEN};
use crate::domain::error::Violation;
use crate::domain::joiners::passes_joiners;
use crate::domain::mapping::{self, CharStatus};

/// Validate one label in its domain context.
pub fn validate(
    label: &Label,
    context: LabelContext,
    options: &ProcessingOptions,
) -> BTreeSet<Violation> {
    let mut violations = BTreeSet::new();

    if label.is_empty() {
        if !context.position.may_be_root() {
            violations.insert(Violation::EmptyLabel);
        }
        return violations;
    }
    if label.len() > MAX_LABEL_LEN {
        violations.insert(Violation::LabelTooLong);
    }

    let text = label.as_str();
    if options.check_hyphens {
        check_hyphens(label, &mut violations);
    }
    if options.use_std3_ascii_rules
        && text
            .chars()
            .any(|c| c.is_ascii() && !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'))
    {
        violations.insert(Violation::Std3Disallowed);
    }
    if label.form() == LabelForm::Unicode {
        check_characters(text, &mut violations);
    }
    if options.check_bidi && context.bidi_domain && !passes_bidi(text) {
        violations.insert(Violation::Bidi);
    }
    if options.check_joiners && !passes_joiners(text) {
        violations.insert(Violation::ContextJ);
    }
    violations
}

fn check_hyphens(label: &Label, violations: &mut BTreeSet<Violation>) {
    let text = label.as_str();
    if text.starts_with('-') {
        violations.insert(Violation::LeadingHyphen);
    }
    if text.ends_with('-') {
        violations.insert(Violation::TrailingHyphen);
    }
    let mut chars = text.chars().skip(2);
    if chars.next() == Some('-') && chars.next() == Some('-') && !label.is_punycode() {
        violations.insert(Violation::HyphenAt3And4);
    }
}

fn check_characters(text: &str, violations: &mut BTreeSet<Violation>) {
    if text.chars().next().is_some_and(is_combining_mark) {
        violations.insert(Violation::LeadingCombiningMark);
    }
    if !is_nfc(text) {
        violations.insert(Violation::NotNfc);
    }
    // Only codepoints the mapping leaves in place may remain.
    let disallowed = text.chars().any(|c| {
        mapping::is_dot(c)
            || !matches!(
                mapping::status(c),
                CharStatus::Valid | CharStatus::Deviation(_)
            )
    });
    if disallowed {
        violations.insert(Violation::DisallowedCharacter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LabelPosition;

    fn ctx(position: LabelPosition) -> LabelContext {
        LabelContext {
            position,
            bidi_domain: false,
        }
    }

    fn check(text: &str) -> BTreeSet<Violation> {
        validate(
            &Label::new(text),
            ctx(LabelPosition::First),
            &ProcessingOptions::default(),
        )
    }

    #[test]
    fn given_plain_label_when_validating_then_no_violations() {
        assert!(check("example").is_empty());
        assert!(check("bücher").is_empty());
    }

    #[test]
    fn given_empty_last_label_when_validating_then_root_is_accepted() {
        let opts = ProcessingOptions::default();
        assert!(validate(&Label::new(""), ctx(LabelPosition::Last), &opts).is_empty());
        assert!(validate(&Label::new(""), ctx(LabelPosition::Interior), &opts)
            .contains(&Violation::EmptyLabel));
        assert!(validate(&Label::new(""), ctx(LabelPosition::Only), &opts)
            .contains(&Violation::EmptyLabel));
    }

    #[test]
    fn given_hyphen_positions_when_validating_then_reports_each_rule() {
        let v = check("-ab-");
        assert!(v.contains(&Violation::LeadingHyphen));
        assert!(v.contains(&Violation::TrailingHyphen));
        assert!(check("ab--c").contains(&Violation::HyphenAt3And4));
        assert!(!check("xn--mller-kva").contains(&Violation::HyphenAt3And4));
    }

    #[test]
    fn given_hyphen_checks_disabled_when_validating_then_hyphens_pass() {
        let opts = ProcessingOptions::default().check_hyphens(false);
        assert!(validate(&Label::new("-ab-"), ctx(LabelPosition::First), &opts).is_empty());
    }

    #[test]
    fn given_underscore_when_validating_then_std3_depends_on_option() {
        assert!(check("a_b").contains(&Violation::Std3Disallowed));
        let opts = ProcessingOptions::default().use_std3_ascii_rules(false);
        assert!(validate(&Label::new("a_b"), ctx(LabelPosition::First), &opts).is_empty());
    }

    #[test]
    fn given_leading_combining_mark_when_validating_then_reported() {
        assert!(check("\u{0301}a").contains(&Violation::LeadingCombiningMark));
    }

    #[test]
    fn given_decomposed_label_when_validating_then_not_nfc() {
        assert!(check("mu\u{0308}ller").contains(&Violation::NotNfc));
    }

    #[test]
    fn given_dot_inside_unicode_label_when_validating_then_disallowed() {
        assert!(check("ü.b").contains(&Violation::DisallowedCharacter));
        assert!(check("ü\u{E000}").contains(&Violation::DisallowedCharacter));
    }

    #[test]
    fn given_unmapped_codepoints_when_validating_then_disallowed() {
        // uppercase, soft hyphen (ignored), fullwidth letter
        assert!(check("Ü").contains(&Violation::DisallowedCharacter));
        assert!(check("ü\u{00AD}x").contains(&Violation::DisallowedCharacter));
        assert!(check("ü\u{FF41}").contains(&Violation::DisallowedCharacter));
        assert!(check("fa\u{00DF}").is_empty(), "deviation stays valid");
    }

    #[test]
    fn given_rtl_label_in_bidi_domain_when_validating_then_bidi_rule_applies() {
        let opts = ProcessingOptions::default();
        let bidi = LabelContext {
            position: LabelPosition::First,
            bidi_domain: true,
        };
        assert!(validate(&Label::new("\u{05D0}a"), bidi, &opts).contains(&Violation::Bidi));
        assert!(validate(&Label::new("1abc"), bidi, &opts).contains(&Violation::Bidi));
        assert!(!validate(&Label::new("1abc"), ctx(LabelPosition::First), &opts)
            .contains(&Violation::Bidi));
    }

    #[test]
    fn given_bare_zwj_when_validating_then_joiner_rule_depends_on_option() {
        assert!(check("a\u{200D}b").contains(&Violation::ContextJ));
        let opts = ProcessingOptions::default().check_joiners(false);
        assert!(!validate(&Label::new("a\u{200D}b"), ctx(LabelPosition::First), &opts)
            .contains(&Violation::ContextJ));
    }

    #[test]
    fn given_label_lengths_when_validating_then_63_is_the_boundary() {
        assert!(check(&"a".repeat(63)).is_empty());
        assert!(check(&"a".repeat(64)).contains(&Violation::LabelTooLong));
        assert!(check(&"ü".repeat(63)).is_empty());
        assert!(check(&"ü".repeat(64)).contains(&Violation::LabelTooLong));
    }

    #[test]
    fn given_many_problems_when_validating_then_collects_all() {
        let v = check("-a_b-");
        assert_eq!(v.len(), 3);
    }
}
