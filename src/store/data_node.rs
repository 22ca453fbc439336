use dashmap::DashMap;
use tracing::trace;

use crate::ShareData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Receives every write first; never serves reads
    Master,
    /// Written only by fan-out from the master; serves reads
    Replica,
}

/// One in-memory copy of the keyed data.
#[derive(Debug)]
pub struct DataNode {
    id: u32,
    role: NodeRole,
    data: DashMap<String, ShareData>,
}

impl DataNode {
    pub fn new(
        id: u32,
        role: NodeRole,
    ) -> Self {
        Self {
            id,
            role,
            data: DashMap::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<ShareData> {
        self.data.get(key).map(|v| v.value().clone())
    }

    /// Full replace; returns the previous value if any.
    pub(crate) fn put(
        &self,
        key: &str,
        value: ShareData,
    ) -> Option<ShareData> {
        trace!(node = self.id, role = ?self.role, key, version = value.version(), "put");
        self.data.insert(key.to_string(), value)
    }

    /// Number of keys held
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }
}
