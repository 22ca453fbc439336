use serde::Deserialize;
use serde::Serialize;

use crate::utils::time::timestamp_millis;
use crate::Result;
use crate::ValidationError;

/// Opaque value carried by a [`ShareData`]. The store never inspects it.
pub type Payload = serde_json::Value;

/// A versioned value held under one key.
///
/// `sequence_stamp` is wall-clock milliseconds taken at construction. It is
/// for display only and says nothing about write order; `version` does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareData {
    id: String,
    sequence_stamp: i64,
    payload: Payload,
    version: u64,
}

impl ShareData {
    /// Builds a value, rejecting an empty `id` or a null `payload`.
    pub fn new(
        id: impl Into<String>,
        payload: impl Into<Payload>,
        version: u64,
    ) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }

        let payload = payload.into();
        if payload.is_null() {
            return Err(ValidationError::NullPayload.into());
        }

        Ok(Self {
            id,
            sequence_stamp: timestamp_millis(),
            payload,
            version,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sequence_stamp(&self) -> i64 {
        self.sequence_stamp
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Bumps the version by exactly one.
    ///
    /// Fails without touching the value when the version is already
    /// `u64::MAX`.
    pub fn increment_version(&mut self) -> Result<()> {
        self.version = self
            .version
            .checked_add(1)
            .ok_or(ValidationError::VersionOverflow)?;
        Ok(())
    }

    /// Rebases this value on top of `previous`, so it becomes
    /// `previous.version + 1` whatever the caller supplied. On overflow the
    /// value keeps its own version.
    pub(crate) fn succeed(
        &mut self,
        previous: &ShareData,
    ) -> Result<()> {
        self.version = previous
            .version
            .checked_add(1)
            .ok_or(ValidationError::VersionOverflow)?;
        Ok(())
    }
}
