//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Description                                         |
//! |------|-----------------------------------------------------|
//! | 0    | Success                                             |
//! | 1    | General error (unspecified)                         |
//! | 2    | CLI usage error (bad args)                          |
//! | 3    | Malformed record in a source file                   |
//! | 4    | Invalid configuration                               |
//! | 5    | IO error (missing source, unwritable report)        |
//! | 6    | Two item types map to the same per-type report file |
//!
//! A query that finds nothing is not an error: it prints the "no such item"
//! line and exits 0.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// A source line failed to parse (bad price, bad date, missing field).
pub const EXIT_MALFORMED_RECORD: u8 = 3;

/// Config file could not be parsed or failed validation.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// Reading a source or writing a report failed.
pub const EXIT_IO: u8 = 5;

/// Per-type report destinations collide (e.g. "laptop" and "Laptop").
pub const EXIT_REPORT_COLLISION: u8 = 6;
