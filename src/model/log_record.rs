use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::ShareData;
use crate::utils::time::timestamp_millis;

/// Kind of operation carried by a log record. The store only ever logs `Set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    Get,
    Set,
    Change,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Get => "GET",
            OperationKind::Set => "SET",
            OperationKind::Change => "CHANGE",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One write-ahead log entry.
///
/// Built once per `set`, appended, then dropped. The store never reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub write_timestamp: i64,
    pub operation: OperationKind,
    pub key: String,
    pub value: ShareData,
}

impl LogRecord {
    pub fn new(
        operation: OperationKind,
        key: impl Into<String>,
        value: ShareData,
    ) -> Self {
        Self {
            write_timestamp: timestamp_millis(),
            operation,
            key: key.into(),
            value,
        }
    }
}
