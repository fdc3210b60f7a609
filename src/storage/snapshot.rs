use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::domain::CustomerRecord;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Versioned envelope written to the snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub customers: Vec<CustomerRecord>,
}

impl LedgerSnapshot {
    pub fn new(customers: Vec<CustomerRecord>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            customers,
        }
    }
}

// A bare array of records is accepted as well as the envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotContents {
    Envelope(LedgerSnapshot),
    Bare(Vec<CustomerRecord>),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Snapshot file does not exist: {}", .0.display())]
    Missing(PathBuf),

    #[error("Failed to read snapshot {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode snapshot {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Unsupported snapshot version {found} (expected {expected})",
        expected = SNAPSHOT_VERSION
    )]
    UnsupportedVersion { found: u32 },

    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to write snapshot {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The single file holding the full ledger.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read every record from the snapshot, in stored order.
    pub fn read(&self) -> Result<Vec<CustomerRecord>, StorageError> {
        let bytes = fs::read(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StorageError::Missing(self.path.clone())
            } else {
                StorageError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let contents: SnapshotContents =
            serde_json::from_slice(&bytes).map_err(|source| StorageError::Decode {
                path: self.path.clone(),
                source,
            })?;

        let customers = match contents {
            SnapshotContents::Envelope(snapshot) => {
                if snapshot.version != SNAPSHOT_VERSION {
                    return Err(StorageError::UnsupportedVersion {
                        found: snapshot.version,
                    });
                }
                snapshot.customers
            }
            SnapshotContents::Bare(customers) => customers,
        };

        debug!(path = %self.path.display(), count = customers.len(), "snapshot read");
        Ok(customers)
    }

    /// Overwrite the snapshot with the given records.
    pub fn write(&self, customers: &[CustomerRecord]) -> Result<(), StorageError> {
        let snapshot = LedgerSnapshot::new(customers.to_vec());
        let json = serde_json::to_string_pretty(&snapshot).map_err(StorageError::Encode)?;

        fs::write(&self.path, json).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), count = customers.len(), "snapshot written");
        Ok(())
    }
}
