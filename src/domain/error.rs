//! Domain-level errors (no external dependencies)

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Hard sanity bound on the input size accepted by the transcoder, in bytes.
pub const MAX_INPUT_LEN: usize = 4096;

/// Fatal domain errors. These abort a conversion outright.
///
/// Rule violations are never reported this way: they are collected into a
/// [`ConversionResult`](crate::domain::ConversionResult) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("input of {len} bytes exceeds the limit of {max} bytes")]
    InputTooLong { len: usize, max: usize },
}

/// Failure of the Punycode codec on a single label.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunycodeError {
    #[error("punycode arithmetic overflow")]
    Overflow,

    #[error("invalid punycode digit: {0:#04x}")]
    InvalidDigit(u8),

    #[error("punycode input ended inside a variable-length integer")]
    UnexpectedEnd,

    #[error("non-basic code point in punycode input")]
    NonBasic,

    #[error("decoded value is not a unicode scalar: {0:#x}")]
    InvalidCodePoint(u32),
}

impl PunycodeError {
    /// Map a codec failure onto the rule violation it is reported as.
    pub fn violation(self) -> Violation {
        match self {
            PunycodeError::Overflow => Violation::PunycodeOverflow,
            _ => Violation::PunycodeMalformed,
        }
    }
}

/// Coarse error taxonomy a caller can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Empty domain or label, label or domain too long
    Structural,
    HyphenRule,
    Std3Rule,
    BidiRule,
    JoinerRule,
    PunycodeOverflow,
    PunycodeMalformed,
    /// Codepoint-level validity: disallowed characters, leading combining
    /// marks, non-NFC labels, ACE labels that do not decode to a valid label
    Disallowed,
}

/// A single violated rule.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    #[error("domain name is empty")]
    EmptyDomain,

    #[error("label is empty")]
    EmptyLabel,

    #[error("label exceeds 63 octets")]
    LabelTooLong,

    #[error("domain name exceeds 253 octets")]
    DomainTooLong,

    #[error("label starts with a hyphen")]
    LeadingHyphen,

    #[error("label ends with a hyphen")]
    TrailingHyphen,

    #[error("label has hyphens in the third and fourth position")]
    HyphenAt3And4,

    #[error("label contains a character outside [a-z0-9-]")]
    Std3Disallowed,

    #[error("label violates the bidi rule")]
    Bidi,

    #[error("label violates the joiner context rules")]
    ContextJ,

    #[error("punycode overflow")]
    PunycodeOverflow,

    #[error("malformed punycode")]
    PunycodeMalformed,

    #[error("label contains a disallowed character")]
    DisallowedCharacter,

    #[error("label starts with a combining mark")]
    LeadingCombiningMark,

    #[error("label is not in normalization form C")]
    NotNfc,

    #[error("ACE label does not decode to a valid label")]
    InvalidAceLabel,
}

impl Violation {
    pub fn kind(self) -> ErrorKind {
        use Violation::*;
        match self {
            EmptyDomain | EmptyLabel | LabelTooLong | DomainTooLong => ErrorKind::Structural,
            LeadingHyphen | TrailingHyphen | HyphenAt3And4 => ErrorKind::HyphenRule,
            Std3Disallowed => ErrorKind::Std3Rule,
            Bidi => ErrorKind::BidiRule,
            ContextJ => ErrorKind::JoinerRule,
            PunycodeOverflow => ErrorKind::PunycodeOverflow,
            PunycodeMalformed => ErrorKind::PunycodeMalformed,
            DisallowedCharacter | LeadingCombiningMark | NotNfc | InvalidAceLabel => {
                ErrorKind::Disallowed
            }
        }
    }
}

/// A violation located in a domain: `label` is the zero-based label index,
/// `None` for violations of the domain as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProcessingError {
    pub label: Option<usize>,
    pub violation: Violation,
}

impl ProcessingError {
    pub fn in_label(label: usize, violation: Violation) -> Self {
        Self {
            label: Some(label),
            violation,
        }
    }

    pub fn in_domain(violation: Violation) -> Self {
        Self {
            label: None,
            violation,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.violation.kind()
    }
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(idx) => write!(f, "label {}: {}", idx, self.violation),
            None => write!(f, "{}", self.violation),
        }
    }
}

impl std::error::Error for ProcessingError {}
