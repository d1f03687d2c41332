//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic into whole-domain conversions.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
