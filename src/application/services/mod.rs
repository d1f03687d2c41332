//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

pub mod transcoder;

pub use transcoder::{to_ascii, to_unicode, Direction, TranscoderService};
