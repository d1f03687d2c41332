//! Domain entities: core data structures

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{ErrorKind, ProcessingError};

/// Prefix marking an ACE label that carries a Punycode payload.
pub const ACE_PREFIX: &str = "xn--";

/// Maximum label length in codepoints (Unicode form) or octets (ACE form).
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum domain length in octets, excluding a trailing root dot.
pub const MAX_DOMAIN_LEN: usize = 253;

/// Which representation a label currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelForm {
    /// Arbitrary Unicode codepoints
    Unicode,
    /// ASCII octets only
    Ace,
}

/// One dot-separated component of a domain name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    form: LabelForm,
}

impl Label {
    /// Wrap label text, tagging it ACE when it is pure ASCII.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let form = if text.is_ascii() {
            LabelForm::Ace
        } else {
            LabelForm::Unicode
        };
        Self { text, form }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn form(&self) -> LabelForm {
        self.form
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in the unit of the label's form: octets for ACE, codepoints otherwise.
    pub fn len(&self) -> usize {
        match self.form {
            LabelForm::Ace => self.text.len(),
            LabelForm::Unicode => self.text.chars().count(),
        }
    }

    /// True for ACE labels starting with `xn--`, compared case-insensitively.
    pub fn is_punycode(&self) -> bool {
        self.form == LabelForm::Ace
            && self.text.len() >= ACE_PREFIX.len()
            && self.text[..ACE_PREFIX.len()].eq_ignore_ascii_case(ACE_PREFIX)
    }

    /// The Punycode payload after the `xn--` prefix, if this is an ACE label.
    pub fn punycode_payload(&self) -> Option<&str> {
        if self.is_punycode() {
            Some(&self.text[ACE_PREFIX.len()..])
        } else {
            None
        }
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Where a label sits within its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    Only,
    First,
    Interior,
    Last,
}

impl LabelPosition {
    /// Position of label `index` in a domain of `count` labels.
    pub fn of(index: usize, count: usize) -> Self {
        match (index, count) {
            (_, 0) | (_, 1) => LabelPosition::Only,
            (0, _) => LabelPosition::First,
            (i, n) if i + 1 == n => LabelPosition::Last,
            _ => LabelPosition::Interior,
        }
    }

    /// The final label of a multi-label domain may be the empty root label.
    pub fn may_be_root(self) -> bool {
        self == LabelPosition::Last
    }
}

/// Per-label facts the validator needs beyond the label itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelContext {
    pub position: LabelPosition,
    /// The domain contains at least one right-to-left or Arabic-number codepoint.
    pub bidi_domain: bool,
}

/// Ordered labels of a domain name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainName {
    labels: Vec<Label>,
}

impl DomainName {
    /// Split already-mapped text on `.`. Always yields at least one label.
    pub fn split(mapped: &str) -> Self {
        Self {
            labels: mapped.split('.').map(Label::new).collect(),
        }
    }

    pub fn from_labels(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<Label> {
        self.labels
    }

    /// Whether the domain ends with an empty root label (trailing dot).
    pub fn has_root(&self) -> bool {
        self.labels.len() > 1 && self.labels.last().is_some_and(Label::is_empty)
    }

    /// Octet length excluding a trailing root dot.
    pub fn dns_len(&self) -> usize {
        let total = self.to_string().len();
        if self.has_root() {
            total - 1
        } else {
            total
        }
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(label.as_str())?;
        }
        Ok(())
    }
}

/// UTS-46 processing flags. Constructed once per call and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
    /// Reject ASCII characters outside `[a-z0-9-]`
    pub use_std3_ascii_rules: bool,
    /// Enforce leading/trailing hyphen and position 3/4 restrictions
    pub check_hyphens: bool,
    /// Enforce the RFC 5893 bidi rule in bidi domains
    pub check_bidi: bool,
    /// Enforce the RFC 5892 context rules for ZWJ/ZWNJ
    pub check_joiners: bool,
    /// Use transitional mapping for deviation characters (ß, ς, ZWJ, ZWNJ)
    pub transitional: bool,
    /// Enforce the 253 octet limit on the ASCII domain
    pub verify_dns_length: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            use_std3_ascii_rules: true,
            check_hyphens: true,
            check_bidi: true,
            check_joiners: true,
            transitional: false,
            verify_dns_length: true,
        }
    }
}

impl ProcessingOptions {
    pub fn use_std3_ascii_rules(self, value: bool) -> Self {
        Self {
            use_std3_ascii_rules: value,
            ..self
        }
    }

    pub fn check_hyphens(self, value: bool) -> Self {
        Self {
            check_hyphens: value,
            ..self
        }
    }

    pub fn check_bidi(self, value: bool) -> Self {
        Self {
            check_bidi: value,
            ..self
        }
    }

    pub fn check_joiners(self, value: bool) -> Self {
        Self {
            check_joiners: value,
            ..self
        }
    }

    pub fn transitional(self, value: bool) -> Self {
        Self {
            transitional: value,
            ..self
        }
    }

    pub fn verify_dns_length(self, value: bool) -> Self {
        Self {
            verify_dns_length: value,
            ..self
        }
    }
}

/// Best-effort converted domain plus every rule violation found on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub domain: String,
    pub errors: BTreeSet<ProcessingError>,
}

impl ConversionResult {
    pub fn new(domain: String, errors: BTreeSet<ProcessingError>) -> Self {
        Self { domain, errors }
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether any collected error falls into `kind`.
    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind() == kind)
    }
}
