//! Process-level run ID for correlating one recompute run.
//!
//! Each process gets a unique ULID at startup; every log line and stored
//! record of the same run can carry it. ULIDs sort lexicographically by
//! creation time, so runs order naturally in queries.

use once_cell::sync::Lazy;
use ulid::Ulid;

static RUN_ID: Lazy<String> = Lazy::new(|| Ulid::new().to_string());

/// The process-level run ID, generated once at first access.
#[inline]
pub fn get() -> &'static str {
    &RUN_ID
}

/// A fresh ULID for sub-operations that need their own identity.
#[inline]
pub fn generate() -> String {
    Ulid::new().to_string()
}
