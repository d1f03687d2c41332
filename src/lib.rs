//! idnconv: internationalized domain name conversion.
//!
//! Implements UTS-46 processing on top of RFC 3492 Punycode: mapping,
//! per-label validation (hyphens, STD3, bidi, joiners, length) and the
//! `to_ascii` / `to_unicode` domain conversions. Conversions collect every
//! rule violation instead of stopping at the first one.
//!
//! ```
//! use idnconv::{to_ascii, ProcessingOptions};
//!
//! let result = to_ascii("bücher.de", &ProcessingOptions::default()).unwrap();
//! assert_eq!(result.domain, "xn--bcher-kva.de");
//! assert!(!result.has_error());
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::services::{to_ascii, to_unicode, Direction, TranscoderService};
pub use domain::punycode;
pub use domain::{
    ConversionResult, DomainError, ErrorKind, Label, ProcessingError, ProcessingOptions,
    PunycodeError, Violation,
};
