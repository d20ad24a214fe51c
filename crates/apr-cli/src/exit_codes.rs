//! Exit codes for `apr`.
//!
//! Codes 1, 3-6 and 9 come from `AprError::exit_code` and are not redefined here.
//! Clap usage errors exit with 2.

pub const SUCCESS: i32 = 0;
pub const PARTIAL_FAILURE: i32 = 7; // Isolated batch finished with invalid ids
pub const INTERNAL_ERROR: i32 = 8; // Unexpected failure outside the score pipeline
