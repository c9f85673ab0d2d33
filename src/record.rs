//! The on-disk log record.
//!
//! One record is written per handled request, serialized as a single JSON
//! object followed by a newline (JSON Lines). Extra attributes are flattened
//! into the top-level object next to `time`, `level` and `msg`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{EXAMPLE_ATTRIBUTE_KEY, EXAMPLE_ATTRIBUTE_VALUE};

/// Severity of a record. Request records are always informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Assigned when the record is built, just before the append
    pub time: DateTime<Utc>,
    pub level: Level,
    pub msg: String,
    #[serde(flatten)]
    pub attrs: BTreeMap<String, String>,
}

impl LogRecord {
    pub fn new(level: Level, msg: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            level,
            msg: msg.into(),
            attrs: BTreeMap::new(),
        }
    }

    /// Record for one handled HTTP request: `"<METHOD> <URI>"` at info level
    /// with the fixed example attribute.
    pub fn request(method: &http::Method, uri: &http::Uri) -> Self {
        Self::new(Level::Info, format!("{} {}", method, uri))
            .with_attr(EXAMPLE_ATTRIBUTE_KEY, EXAMPLE_ATTRIBUTE_VALUE)
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Serialize into one newline-terminated line, ready for a single append.
    pub fn to_line(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }

    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
