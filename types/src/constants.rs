//! Timer and pagination constants.

/// Maximum number of `ReferenceDescription`s returned per Browse page.
pub const MAX_NO_OF_RETURNED_REFERENCES: usize = 5;

/// Publishing timer period, in milliseconds.
pub const PUBLISHING_INTERVAL_MS: u64 = 1000;

/// Consecutive idle publishing intervals between keepalives.
pub const MAX_KEEP_ALIVE_COUNT: u32 = 5;

/// Consecutive idle publishing intervals before a subscription is destroyed.
pub const LIFETIME_COUNT: u32 = MAX_KEEP_ALIVE_COUNT * 3;
