use anyhow::Result;
use std::io::Read;

use crate::application::CustomerLedger;
use crate::domain::parse_units;

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
}

/// Importer for loading customers into the ledger
pub struct Importer<'a> {
    ledger: &'a mut CustomerLedger,
}

impl<'a> Importer<'a> {
    pub fn new(ledger: &'a mut CustomerLedger) -> Self {
        Self { ledger }
    }

    /// Import customers from CSV with columns `name,meter_number,units_consumed`.
    /// Every accepted row goes through `CustomerLedger::add`.
    pub fn import_customers_csv<R: Read>(
        &mut self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut imported = 0;
        let mut errors = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let name = record.get(0).unwrap_or("");
            let meter_number = record.get(1).unwrap_or("");
            let units = record.get(2).unwrap_or("");

            if meter_number.trim().is_empty() {
                errors.push(ImportError {
                    line,
                    error: "Missing meter number".to_string(),
                });
                continue;
            }

            if options.dry_run {
                match parse_units(units) {
                    Ok(_) => imported += 1,
                    Err(e) => errors.push(ImportError {
                        line,
                        error: format!("Invalid units '{}': {}", units, e),
                    }),
                }
                continue;
            }

            match self.ledger.add(name, meter_number, units) {
                Ok(_) => imported += 1,
                Err(e) => errors.push(ImportError {
                    line,
                    error: e.to_string(),
                }),
            }
        }

        Ok(ImportResult { imported, errors })
    }
}
