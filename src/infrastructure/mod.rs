//! Infrastructure layer: I/O and service wiring
//!
//! This layer reads input and wires up services from settings.

pub mod di;
pub mod error;
pub mod input;

pub use error::{InfraError, InfraResult};
