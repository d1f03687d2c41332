//! Domain transcoder service
//!
//! Converts whole domain names between Unicode and ACE form. Conversions never
//! stop at a bad label: every violation is collected into the returned
//! [`ConversionResult`] next to a best-effort output.

use std::collections::BTreeSet;

use tracing::{debug, instrument, trace};

use crate::domain::bidi::is_bidi_domain;
use crate::domain::mapping::{self, CharStatus};
use crate::domain::{
    punycode, validate, ConversionResult, DomainError, DomainName, Label, LabelContext,
    LabelPosition, ProcessingError, ProcessingOptions, Violation, ACE_PREFIX, MAX_DOMAIN_LEN,
    MAX_INPUT_LEN, MAX_LABEL_LEN,
};

/// Direction of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToAscii,
    ToUnicode,
}

/// Stateless transcoder bound to one set of processing options.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscoderService {
    options: ProcessingOptions,
}

impl TranscoderService {
    pub fn new(options: ProcessingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    pub fn to_ascii(&self, input: &str) -> Result<ConversionResult, DomainError> {
        to_ascii(input, &self.options)
    }

    pub fn to_unicode(&self, input: &str) -> Result<ConversionResult, DomainError> {
        to_unicode(input, &self.options)
    }

    pub fn convert(
        &self,
        direction: Direction,
        input: &str,
    ) -> Result<ConversionResult, DomainError> {
        match direction {
            Direction::ToAscii => self.to_ascii(input),
            Direction::ToUnicode => self.to_unicode(input),
        }
    }
}

/// A label after decoding, ready for validation and output.
struct Prepared {
    /// Text the rules are checked against (decoded for ACE labels)
    checked: Label,
    /// Text emitted in the output
    output: String,
}

fn check_input_len(input: &str) -> Result<(), DomainError> {
    if input.len() > MAX_INPUT_LEN {
        return Err(DomainError::InputTooLong {
            len: input.len(),
            max: MAX_INPUT_LEN,
        });
    }
    Ok(())
}

fn empty_domain() -> ConversionResult {
    let mut errors = BTreeSet::new();
    errors.insert(ProcessingError::in_domain(Violation::EmptyDomain));
    ConversionResult::new(String::new(), errors)
}

/// Decode an `xn--` label and check that it denotes a valid Unicode label.
fn decode_ace(payload: &str) -> Result<String, Violation> {
    let decoded = punycode::decode_to_string(payload).map_err(|e| e.violation())?;
    if decoded.is_empty() || decoded.is_ascii() {
        return Err(Violation::InvalidAceLabel);
    }
    let stable = decoded.chars().all(|c| {
        matches!(
            mapping::status(c),
            CharStatus::Valid | CharStatus::Deviation(_) | CharStatus::Disallowed
        )
    });
    if !stable {
        return Err(Violation::InvalidAceLabel);
    }
    Ok(decoded)
}

/// Decode ACE labels, keeping the raw label whenever decoding fails.
fn prepare_decoded(
    index: usize,
    label: &Label,
    errors: &mut BTreeSet<ProcessingError>,
) -> Option<String> {
    let payload = label.punycode_payload()?;
    match decode_ace(payload) {
        Ok(decoded) => Some(decoded),
        Err(violation) => {
            debug!(label = %label, ?violation, "ACE label rejected");
            errors.insert(ProcessingError::in_label(index, violation));
            None
        }
    }
}

/// Validate prepared labels, recording violations under their label index.
fn validate_all(
    prepared: &[Prepared],
    options: &ProcessingOptions,
    errors: &mut BTreeSet<ProcessingError>,
) {
    let bidi_domain = prepared.iter().any(|p| is_bidi_domain(p.checked.as_str()));
    let count = prepared.len();
    for (index, p) in prepared.iter().enumerate() {
        let context = LabelContext {
            position: LabelPosition::of(index, count),
            bidi_domain,
        };
        for violation in validate(&p.checked, context, options) {
            errors.insert(ProcessingError::in_label(index, violation));
        }
    }
}

fn join(prepared: Vec<Prepared>) -> DomainName {
    DomainName::from_labels(prepared.into_iter().map(|p| Label::new(p.output)).collect())
}

/// UTS-46 ToASCII: map, split, encode or verify each label, validate, join.
#[instrument(level = "debug", skip(options))]
pub fn to_ascii(input: &str, options: &ProcessingOptions) -> Result<ConversionResult, DomainError> {
    check_input_len(input)?;
    if input.is_empty() {
        return Ok(empty_domain());
    }

    let mut errors = BTreeSet::new();
    let mapped = mapping::map_domain(input, options.transitional);
    trace!(%mapped, "mapped input");

    let mut prepared = Vec::new();
    for (index, label) in DomainName::split(&mapped).into_labels().into_iter().enumerate() {
        if label.is_punycode() {
            let checked = prepare_decoded(index, &label, &mut errors)
                .map(Label::new)
                .unwrap_or_else(|| label.clone());
            prepared.push(Prepared {
                checked,
                output: label.into_string(),
            });
        } else if label.as_str().is_ascii() {
            prepared.push(Prepared {
                checked: label.clone(),
                output: label.into_string(),
            });
        } else {
            let output = match punycode::encode_str(label.as_str()) {
                Ok(payload) => format!("{ACE_PREFIX}{payload}"),
                Err(e) => {
                    errors.insert(ProcessingError::in_label(index, e.violation()));
                    label.as_str().to_string()
                }
            };
            prepared.push(Prepared {
                checked: label,
                output,
            });
        }
    }

    validate_all(&prepared, options, &mut errors);
    for (index, p) in prepared.iter().enumerate() {
        if p.output.is_ascii() && p.output.len() > MAX_LABEL_LEN {
            errors.insert(ProcessingError::in_label(index, Violation::LabelTooLong));
        }
    }

    let domain = join(prepared);
    if options.verify_dns_length && domain.dns_len() > MAX_DOMAIN_LEN {
        errors.insert(ProcessingError::in_domain(Violation::DomainTooLong));
    }

    debug!(output = %domain, errors = errors.len(), "to_ascii done");
    Ok(ConversionResult::new(domain.to_string(), errors))
}

/// UTS-46 ToUnicode: recognize and decode ACE labels, validate, join.
#[instrument(level = "debug", skip(options))]
pub fn to_unicode(
    input: &str,
    options: &ProcessingOptions,
) -> Result<ConversionResult, DomainError> {
    check_input_len(input)?;
    if input.is_empty() {
        return Ok(empty_domain());
    }

    let mut errors = BTreeSet::new();
    let mapped = mapping::map_separators(input);

    let prepared: Vec<Prepared> = DomainName::split(&mapped)
        .into_labels()
        .into_iter()
        .enumerate()
        .map(|(index, label)| match prepare_decoded(index, &label, &mut errors) {
            Some(decoded) => Prepared {
                checked: Label::new(decoded.clone()),
                output: decoded,
            },
            None => Prepared {
                checked: label.clone(),
                output: label.into_string(),
            },
        })
        .collect();

    validate_all(&prepared, options, &mut errors);

    let domain = join(prepared);
    debug!(output = %domain, errors = errors.len(), "to_unicode done");
    Ok(ConversionResult::new(domain.to_string(), errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    fn ascii(input: &str) -> ConversionResult {
        to_ascii(input, &ProcessingOptions::default()).expect("within input bound")
    }

    fn unicode(input: &str) -> ConversionResult {
        to_unicode(input, &ProcessingOptions::default()).expect("within input bound")
    }

    #[test]
    fn given_umlaut_domain_when_to_ascii_then_encodes_label() {
        let result = ascii("müller.de");
        assert_eq!(result.domain, "xn--mller-kva.de");
        assert!(!result.has_error(), "{:?}", result.errors);
    }

    #[test]
    fn given_ace_domain_when_to_ascii_then_unchanged() {
        let result = ascii("xn--mller-kva.de");
        assert_eq!(result.domain, "xn--mller-kva.de");
        assert!(!result.has_error());
    }

    #[test]
    fn given_ace_domain_when_to_unicode_then_decodes_label() {
        let result = unicode("xn--mller-kva.de");
        assert_eq!(result.domain, "müller.de");
        assert!(!result.has_error());
    }

    #[test]
    fn given_broken_ace_label_when_to_unicode_then_keeps_label_and_records_error() {
        let result = unicode("xn--mller-kv!.de");
        assert_eq!(result.domain, "xn--mller-kv!.de");
        assert!(result.has_kind(ErrorKind::PunycodeMalformed));
    }

    #[test]
    fn given_ascii_only_payload_when_decoding_then_invalid_ace() {
        let result = ascii("xn--abc-.de");
        assert!(result
            .errors
            .contains(&ProcessingError::in_label(0, Violation::InvalidAceLabel)));
    }

    #[test]
    fn given_uppercase_ace_label_when_to_unicode_then_recognized() {
        let result = unicode("XN--Mller-KVA.DE");
        assert_eq!(result.domain, "müller.de");
        assert!(!result.has_error());
    }

    #[test]
    fn given_empty_input_when_converting_then_structural_error() {
        assert!(ascii("").has_kind(ErrorKind::Structural));
        assert!(unicode("").has_kind(ErrorKind::Structural));
    }

    #[test]
    fn given_oversized_input_when_converting_then_fatal_error() {
        let input = "a".repeat(MAX_INPUT_LEN + 1);
        assert!(matches!(
            to_ascii(&input, &ProcessingOptions::default()),
            Err(DomainError::InputTooLong { .. })
        ));
    }

    #[test]
    fn given_trailing_dot_when_to_ascii_then_root_preserved() {
        let result = ascii("Example.COM.");
        assert_eq!(result.domain, "example.com.");
        assert!(!result.has_error());
    }

    #[test]
    fn given_service_when_converting_then_delegates_by_direction() {
        let service = TranscoderService::default();
        assert_eq!(
            service.convert(Direction::ToAscii, "bücher.de").unwrap().domain,
            "xn--bcher-kva.de"
        );
        assert_eq!(
            service
                .convert(Direction::ToUnicode, "xn--bcher-kva.de")
                .unwrap()
                .domain,
            "bücher.de"
        );
    }
}
