//! Label validation through the public domain API.

use rstest::rstest;

use idnconv::domain::{validate, Label, LabelContext, LabelPosition, ProcessingOptions, Violation};

fn first() -> LabelContext {
    LabelContext {
        position: LabelPosition::First,
        bidi_domain: false,
    }
}

#[rstest]
#[case("example")]
#[case("a")]
#[case("xn--bcher-kva")]
#[case("bücher")]
#[case("日本語")]
#[case("\u{0915}\u{094D}\u{200D}")]
fn given_valid_label_when_validating_then_no_violations(#[case] text: &str) {
    let violations = validate(&Label::new(text), first(), &ProcessingOptions::default());
    assert!(violations.is_empty(), "{text}: {violations:?}");
}

#[rstest]
#[case("-abc", Violation::LeadingHyphen)]
#[case("abc-", Violation::TrailingHyphen)]
#[case("ab--cd", Violation::HyphenAt3And4)]
#[case("a b", Violation::Std3Disallowed)]
#[case("a*b", Violation::Std3Disallowed)]
#[case("\u{0308}a", Violation::LeadingCombiningMark)]
#[case("a\u{200C}b", Violation::ContextJ)]
fn given_invalid_label_when_validating_then_reports_violation(
    #[case] text: &str,
    #[case] expected: Violation,
) {
    let violations = validate(&Label::new(text), first(), &ProcessingOptions::default());
    assert!(violations.contains(&expected), "{text}: {violations:?}");
}

#[rstest]
fn given_all_checks_disabled_when_validating_then_only_structure_remains() {
    let options = ProcessingOptions::default()
        .check_hyphens(false)
        .use_std3_ascii_rules(false)
        .check_bidi(false)
        .check_joiners(false);

    assert!(validate(&Label::new("-a_b-"), first(), &options).is_empty());

    let long = "a".repeat(64);
    assert!(validate(&Label::new(long), first(), &options).contains(&Violation::LabelTooLong));
}

#[rstest]
#[case(0, 1, LabelPosition::Only)]
#[case(0, 3, LabelPosition::First)]
#[case(1, 3, LabelPosition::Interior)]
#[case(2, 3, LabelPosition::Last)]
fn given_index_and_count_when_positioning_then_classified(
    #[case] index: usize,
    #[case] count: usize,
    #[case] expected: LabelPosition,
) {
    assert_eq!(LabelPosition::of(index, count), expected);
}
