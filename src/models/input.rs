// One observation request: timestamp + duration, plus any caller fields passed through.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TimeWindow;
use crate::error::ImportError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInput {
    pub timestamp: String,
    /// Seconds. Kept as the caller's JSON number so it is echoed back unchanged.
    pub duration: serde_json::Number,
    /// Extra caller fields, copied verbatim into every output record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PluginInput {
    pub fn new(timestamp: impl Into<String>, duration: i64) -> Self {
        Self {
            timestamp: timestamp.into(),
            duration: duration.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Copy without the extra fields named in `keys`.
    pub fn without_fields(&self, keys: &[&str]) -> Self {
        let mut input = self.clone();
        input.extra.retain(|key, _| !keys.contains(&key.as_str()));
        input
    }

    pub fn validate(&self) -> Result<(), ImportError> {
        self.window().map(|_| ())
    }

    /// Parses the timestamp and builds the statistics window.
    pub fn window(&self) -> Result<TimeWindow, ImportError> {
        let start = parse_timestamp(&self.timestamp).ok_or_else(|| {
            ImportError::Validation(format!(
                "Invalid timestamp '{}'; must be a valid ISO date string.",
                self.timestamp
            ))
        })?;
        self.duration_secs()
            .and_then(|secs| TimeWindow::new(start, secs))
            .ok_or_else(|| {
                ImportError::Validation(format!(
                    "Invalid duration {}; must be a positive number of whole seconds.",
                    self.duration
                ))
            })
    }

    /// Positive integral durations only; `3600.0` counts as 3600.
    fn duration_secs(&self) -> Option<i64> {
        if let Some(secs) = self.duration.as_i64() {
            return (secs > 0).then_some(secs);
        }
        let secs = self.duration.as_f64()?;
        (secs > 0.0 && secs.fract() == 0.0).then_some(secs as i64)
    }
}

/// RFC 3339, or a naive date-time read as UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
