use anyhow::Result;
use std::io::Write;

use crate::application::CustomerLedger;
use crate::domain::{compute_bill, format_amount};
use crate::storage::LedgerSnapshot;

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    ledger: &'a CustomerLedger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a CustomerLedger) -> Self {
        Self { ledger }
    }

    /// Export customers with their bill amounts to CSV format
    pub fn export_customers_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["name", "meter_number", "units_consumed", "bill_amount"])?;

        let mut count = 0;
        for customer in self.ledger.records() {
            let units = customer.units_consumed.to_string();
            let amount = format_amount(compute_bill(customer));

            csv_writer.write_record([
                customer.name.as_str(),
                customer.meter_number.as_str(),
                units.as_str(),
                amount.as_str(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the whole ledger as a JSON snapshot
    pub fn export_snapshot_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot::new(self.ledger.records().to_vec());

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
