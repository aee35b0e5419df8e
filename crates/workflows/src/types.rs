//! Shared value types for the workflow component contract.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! conversion rules: timestamps have a fixed wire format and runtime statuses
//! map from the engine's integer codes.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// component API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC3339 string (e.g. `2009-11-10T23:00:00Z`).
    ///
    /// Numeric offsets and fractional seconds are accepted; the result is the
    /// same instant expressed in UTC. The date/time separator must be `T`, the
    /// zone must be `Z` or `±hh:mm`, and leap seconds are rejected.
    pub fn parse_rfc3339(value: &str) -> Result<Self, TimestampParseError> {
        let invalid = |source| TimestampParseError {
            value: value.to_string(),
            source,
        };
        if !has_strict_rfc3339_shape(value.as_bytes()) {
            return Err(invalid(None));
        }
        DateTime::parse_from_rfc3339(value)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|err| invalid(Some(err)))
    }

    /// Formats as RFC3339 with whole seconds and a `Z` suffix.
    pub fn to_rfc3339(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

/// Checks the parts of RFC3339 that chrono parses leniently: chrono also takes
/// a space or lowercase `t` separator, a lowercase `z`, and second `60`.
fn has_strict_rfc3339_shape(b: &[u8]) -> bool {
    if b.len() < 20 || b[10] != b'T' {
        return false;
    }
    let seconds_ok = matches!((b[17], b[18]), (b'0'..=b'5', b'0'..=b'9'));
    let zone_ok = b.ends_with(b"Z") || matches!(b[b.len() - 6], b'+' | b'-');
    seconds_ok && zone_ok
}

/// A start time or other timestamp string that is not strict RFC3339.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not an RFC3339 timestamp")]
pub struct TimestampParseError {
    value: String,
    #[source]
    source: Option<chrono::ParseError>,
}

impl TimestampParseError {
    /// Returns the rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Runtime status
// ---------------------------------------------------------------------------

/// Lifecycle state of an orchestration instance as reported by the engine.
///
/// The engine reports an integer code; codes this enum does not know are kept
/// in [`RuntimeStatus::Unknown`] so newer engines do not break status queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeStatus {
    Running,
    Completed,
    ContinuedAsNew,
    Failed,
    Canceled,
    Terminated,
    Pending,
    Suspended,
    /// A code outside the known table.
    Unknown(i32),
}

impl RuntimeStatus {
    /// Maps an engine status code to a [`RuntimeStatus`].
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Running,
            1 => Self::Completed,
            2 => Self::ContinuedAsNew,
            3 => Self::Failed,
            4 => Self::Canceled,
            5 => Self::Terminated,
            6 => Self::Pending,
            7 => Self::Suspended,
            other => Self::Unknown(other),
        }
    }

    /// Returns the status label exposed to the hosting runtime.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::ContinuedAsNew => "CONTINUED_AS_NEW",
            Self::Failed => "FAILED",
            Self::Canceled => "CANCELED",
            Self::Terminated => "TERMINATED",
            Self::Pending => "PENDING",
            Self::Suspended => "SUSPENDED",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    /// Returns `true` once the instance can make no further progress.
    ///
    /// `ContinuedAsNew` is not terminal: the instance restarts with new input.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Terminated | Self::Canceled
        )
    }
}

impl From<i32> for RuntimeStatus {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl std::fmt::Display for RuntimeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
