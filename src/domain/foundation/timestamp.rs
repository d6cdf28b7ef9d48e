//! When a message was written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UTC instant a message was stored at. Orders chronologically, which is the
/// order transcripts and context windows are built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps a value read back from the database.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
