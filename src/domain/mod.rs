//! Domain layer: IDNA entities and algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod bidi;
pub mod category;
pub mod entities;
pub mod error;
pub mod joiners;
pub mod mapping;
pub mod punycode;
pub mod validator;

pub use entities::*;
pub use error::{DomainError, ErrorKind, ProcessingError, PunycodeError, Violation, MAX_INPUT_LEN};
pub use validator::validate;
