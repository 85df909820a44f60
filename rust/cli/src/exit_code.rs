//! Process exit codes.

pub const SUCCESS: i32 = 0;

/// Bad arguments, bad configuration or an engine fault.
pub const ERROR: i32 = 2;

/// Input ended while a hand was waiting on the human seat.
pub const INTERRUPTED: i32 = 130;
