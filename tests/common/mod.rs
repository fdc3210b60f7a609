// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;
use voltbill::application::CustomerLedger;

/// Helper to create a test ledger backed by a temporary snapshot file
pub fn test_ledger() -> Result<(CustomerLedger, TempDir)> {
    let temp_dir = TempDir::new()?;
    let ledger = CustomerLedger::open(snapshot_path(&temp_dir));
    Ok((ledger, temp_dir))
}

/// Path of the snapshot file inside a test directory
pub fn snapshot_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("users.txt")
}

/// Reopen the ledger from disk, as a fresh process would
pub fn reopen(temp_dir: &TempDir) -> CustomerLedger {
    CustomerLedger::open(snapshot_path(temp_dir))
}

/// Test fixture: Standard customer setup
pub struct StandardCustomers;

impl StandardCustomers {
    /// Alice on M1 with 100 units, Bob on M2 with 0 units
    pub fn create_basic(ledger: &mut CustomerLedger) -> Result<()> {
        ledger.add("Alice", "M1", "100")?;
        ledger.add("Bob", "M2", "0")?;
        Ok(())
    }

    /// Three customers where two share meter M1
    pub fn create_with_duplicate_meter(ledger: &mut CustomerLedger) -> Result<()> {
        ledger.add("Alice", "M1", "100")?;
        ledger.add("Bob", "M2", "20")?;
        ledger.add("Carol", "M1", "35.5")?;
        Ok(())
    }
}
