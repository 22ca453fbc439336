// -
// Write-ahead log

/// Directory (relative to the working dir) holding the master log
pub(crate) const DEFAULT_WAL_DIR: &str = "wal";

/// File name of the master write-ahead log
pub(crate) const DEFAULT_WAL_FILE_NAME: &str = "master_wal.log";

// -
// Topology

/// Replica maps kept beside the master by default
pub(crate) const DEFAULT_REPLICA_COUNT: usize = 2;

/// Id reserved for the master node; replicas are numbered from 1
pub(crate) const MASTER_NODE_ID: u32 = 0;

// -
// Configuration

/// Default settings file, resolved relative to the working dir
pub(crate) const DEFAULT_CONFIG_FILE: &str = "config/d-share";

/// Environment variable prefix for settings overrides
pub(crate) const ENV_PREFIX: &str = "DSHARE";
