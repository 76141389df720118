//! Process exit codes

/// Successful termination
pub const OK: i32 = 0;

/// Any reported failure: configuration, transport, API or validation
pub const FAILURE: i32 = 1;
