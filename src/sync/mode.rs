use chrono::DateTime;
use serde::Serialize;

use crate::error::{Error, Result};

/// Timestamp layout the provider accepts for `modified_since`: numeric UTC
/// offset, no fractional seconds. A `Z` suffix is rejected upstream.
pub const PROVIDER_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Complete replace of every item of the type.
    Full,
    /// Only items modified since the last sync.
    Delta,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::Full => "full",
            SyncMode::Delta => "delta",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSelection {
    pub mode: SyncMode,
    /// Provider-formatted `modified_since`; `None` in full mode.
    pub modified_since: Option<String>,
}

/// Pick full or delta sync from the platform's last-sync timestamp.
///
/// An absent or empty timestamp selects a full sync. Anything else must be
/// RFC3339 and is re-rendered in [`PROVIDER_TIMESTAMP_FORMAT`], keeping the
/// incoming offset.
pub fn select_mode(last_synchronized_at: Option<&str>) -> Result<ModeSelection> {
    let raw = match last_synchronized_at {
        None | Some("") => {
            return Ok(ModeSelection {
                mode: SyncMode::Full,
                modified_since: None,
            })
        }
        Some(raw) => raw,
    };

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| Error::Validation(format!("unable to parse last sync time {raw:?}: {e}")))?;

    Ok(ModeSelection {
        mode: SyncMode::Delta,
        modified_since: Some(parsed.format(PROVIDER_TIMESTAMP_FORMAT).to_string()),
    })
}
