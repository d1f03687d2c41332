//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination, no rule violations
pub const OK: i32 = 0;

/// At least one domain reported rule violations
pub const INVALID: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error
pub const DATAERR: i32 = 65;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
