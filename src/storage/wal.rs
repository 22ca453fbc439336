//! Core model in the hub: WriteAheadLog Definition

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;
use parking_lot::Mutex;
use tracing::debug;
use tracing::error;
use tracing::trace;

use crate::metrics::WAL_APPEND_FAILURES;
use crate::utils::file_io::open_file_for_append;
use crate::LogRecord;
use crate::OperationKind;
use crate::Result;
use crate::SerializationError;
use crate::ShareData;
use crate::StorageError;
use crate::WalConfig;

/// Append-only record target used by the store.
///
/// Implementations must either hand the whole record to the durable target
/// before returning `Ok`, or return an error. They must never panic: the store
/// relies on an `Err` to abort a `set` before any map is touched.
#[cfg_attr(test, automock)]
pub trait WriteAheadLog: Send + Sync + 'static {
    fn append(
        &self,
        operation: OperationKind,
        key: &str,
        value: &ShareData,
    ) -> Result<()>;
}

/// File-backed log writing one JSON object per line.
///
/// The handle is opened once and shared behind a mutex, so appends from
/// different keys serialize here.
#[derive(Debug)]
pub struct FileWal {
    path: PathBuf,
    sync_on_append: bool,
    file: Mutex<File>,
}

impl FileWal {
    /// Opens (or creates) the log described by `config`, creating the parent
    /// directory when missing. Existing content is kept.
    pub fn open(config: &WalConfig) -> Result<Self> {
        let path = config.path();
        let file = open_file_for_append(&path)?;
        debug!(path = ?path, sync_on_append = config.sync_on_append, "WAL opened");

        Ok(Self {
            path,
            sync_on_append: config.sync_on_append,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WriteAheadLog for FileWal {
    fn append(
        &self,
        operation: OperationKind,
        key: &str,
        value: &ShareData,
    ) -> Result<()> {
        let record = LogRecord::new(operation, key, value.clone());
        let mut line = serde_json::to_vec(&record).map_err(SerializationError::Json)?;
        line.push(b'\n');

        let mut file = self.file.lock();
        if let Err(e) = write_record(&mut file, &line, self.sync_on_append) {
            WAL_APPEND_FAILURES.inc();
            error!(key, path = ?self.path, "WAL append failed: {:?}", e);
            return Err(StorageError::WalAppend {
                key: key.to_string(),
                source: e,
            }
            .into());
        }

        trace!(key, %operation, version = value.version(), "WAL record appended");
        Ok(())
    }
}

fn write_record(
    file: &mut File,
    line: &[u8],
    sync: bool,
) -> std::io::Result<()> {
    file.write_all(line)?;
    file.flush()?;
    if sync {
        file.sync_data()?;
    }
    Ok(())
}

/// Parses every record of a log file, in append order.
///
/// Blank lines are skipped. A malformed line fails the whole read with its
/// 1-based line number.
pub fn read_log(path: impl AsRef<Path>) -> Result<Vec<LogRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| StorageError::PathError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .map_err(|e| SerializationError::MalformedRecord { line: idx + 1, source: e })?;
        records.push(record);
    }
    Ok(records)
}
