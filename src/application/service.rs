use std::path::PathBuf;
use tracing::{debug, error, warn};

use crate::domain::{Bill, CustomerRecord, compute_bill, parse_units};
use crate::storage::{SnapshotFile, StorageError};

use super::LedgerError;

/// The customer ledger: an ordered, in-memory list of customer records
/// mirrored to a snapshot file after every mutation.
/// This is the primary interface for any client (CLI, TUI, GUI, etc.).
pub struct CustomerLedger {
    storage: SnapshotFile,
    customers: Vec<CustomerRecord>,
    last_save_error: Option<StorageError>,
}

/// Ledger contents as seen by a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CustomerListing<'a> {
    /// The ledger holds no customers.
    Empty,
    /// All customers in insertion order. Never an empty slice.
    Customers(&'a [CustomerRecord]),
}

impl CustomerLedger {
    /// Open the ledger backed by the snapshot at `path`, loading its contents.
    /// A missing or unreadable snapshot yields an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut ledger = Self {
            storage: SnapshotFile::new(path),
            customers: Vec::new(),
            last_save_error: None,
        };
        ledger.load();
        ledger
    }

    /// Replace in-memory state with the snapshot contents.
    pub fn load(&mut self) {
        self.customers = match self.storage.read() {
            Ok(customers) => customers,
            Err(StorageError::Missing(path)) => {
                debug!(path = %path.display(), "no snapshot found, starting empty");
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "discarding unreadable snapshot, starting empty");
                Vec::new()
            }
        };
    }

    /// Write the full ledger to the snapshot, overwriting it.
    pub fn save(&mut self) -> Result<(), StorageError> {
        let result = self.storage.write(&self.customers);
        if result.is_ok() {
            self.last_save_error = None;
        }
        result
    }

    // Failures are logged and retained, never returned to the mutating caller.
    fn persist(&mut self) {
        if let Err(err) = self.save() {
            error!(error = %err, "failed to persist ledger");
            self.last_save_error = Some(err);
        }
    }

    /// The most recent failed save, cleared by the next successful one.
    pub fn last_save_error(&self) -> Option<&StorageError> {
        self.last_save_error.as_ref()
    }

    // ========================
    // Customer operations
    // ========================

    /// Record a new customer. Duplicate meter numbers are allowed.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        meter_number: impl Into<String>,
        units_text: &str,
    ) -> Result<&CustomerRecord, LedgerError> {
        let units = parse_units(units_text).map_err(|reason| LedgerError::InvalidUnits {
            input: units_text.to_string(),
            reason,
        })?;

        let index = self.customers.len();
        self.customers.push(CustomerRecord::new(name, meter_number, units));
        self.persist();

        Ok(&self.customers[index])
    }

    /// List all customers in insertion order.
    pub fn list(&self) -> CustomerListing<'_> {
        if self.customers.is_empty() {
            CustomerListing::Empty
        } else {
            CustomerListing::Customers(&self.customers)
        }
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Find the first customer with the given meter number.
    pub fn find_by_meter(&self, meter_number: &str) -> Result<&CustomerRecord, LedgerError> {
        let meter_number = non_empty_query(meter_number)?;

        self.customers
            .iter()
            .find(|c| c.has_meter(meter_number))
            .ok_or_else(|| LedgerError::NotFound(meter_number.to_string()))
    }

    /// Amount owed by a customer at the flat rate.
    pub fn compute_bill(&self, record: &CustomerRecord) -> f64 {
        compute_bill(record)
    }

    /// Bill the first customer with the given meter number.
    pub fn generate_bill(&self, meter_number: &str) -> Result<Bill, LedgerError> {
        let customer = self.find_by_meter(meter_number)?;
        Ok(Bill::for_customer(customer.clone()))
    }

    /// Remove every customer with the given meter number.
    /// Unlike `find_by_meter`, all matches are affected, not only the first.
    pub fn delete_by_meter(&mut self, meter_number: &str) -> Result<usize, LedgerError> {
        let meter_number = non_empty_query(meter_number)?;

        let before = self.customers.len();
        self.customers.retain(|c| !c.has_meter(meter_number));
        let removed = before - self.customers.len();

        if removed > 0 {
            self.persist();
        }
        Ok(removed)
    }
}

fn non_empty_query(meter_number: &str) -> Result<&str, LedgerError> {
    let trimmed = meter_number.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyQuery);
    }
    Ok(trimmed)
}
