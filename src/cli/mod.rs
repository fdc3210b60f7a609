use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{CustomerLedger, CustomerListing, LedgerError};
use crate::domain::{CURRENCY_LABEL, format_amount};

/// Voltbill - Electricity Billing Ledger
#[derive(Parser)]
#[command(name = "voltbill")]
#[command(about = "A local-first electricity billing ledger for metered customers")]
#[command(version)]
pub struct Cli {
    /// Snapshot file path
    #[arg(short, long, default_value = "users.txt")]
    pub file: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a customer
    Add {
        /// Customer name
        name: String,

        /// Meter number (duplicates are allowed)
        meter: String,

        /// Units consumed (e.g., "100" or "42.5")
        units: String,
    },

    /// List all customers
    List,

    /// Generate the bill for a meter number
    Bill {
        /// Meter number
        meter: String,
    },

    /// Delete every customer with a meter number
    Delete {
        /// Meter number
        meter: String,
    },

    /// Export customers to CSV or JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short = 'F', long, default_value = "csv")]
        format: String,
    },

    /// Import customers from CSV (name,meter_number,units_consumed)
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Preview without importing
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    /// Default `EnvFilter` directive when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "warn,voltbill=debug"
        } else {
            "warn"
        }
    }

    pub fn run(self) -> Result<()> {
        let mut ledger = CustomerLedger::open(&self.file);
        self.command.execute(&mut ledger)
    }
}

impl Commands {
    /// Run one command against an opened ledger.
    pub fn execute(self, ledger: &mut CustomerLedger) -> Result<()> {
        match self {
            Commands::Add { name, meter, units } => {
                let customer = ledger
                    .add(name, meter, &units)
                    .context("Enter valid units, e.g. '100' or '42.5'")?;
                println!(
                    "Customer added: {} (Meter: {}, Units: {})",
                    customer.name, customer.meter_number, customer.units_consumed
                );
                warn_if_unsaved(ledger);
            }

            Commands::List => run_list_command(ledger),

            Commands::Bill { meter } => {
                let bill = ledger.generate_bill(&meter)?;
                println!(
                    "Bill for {} (Meter: {})",
                    bill.customer.name, bill.customer.meter_number
                );
                println!("{} {}", CURRENCY_LABEL, format_amount(bill.amount));
            }

            Commands::Delete { meter } => {
                let removed = ledger.delete_by_meter(&meter)?;
                if removed == 0 {
                    return Err(LedgerError::NotFound(meter.trim().to_string()).into());
                }
                println!("Deleted {} customer(s) with meter {}", removed, meter.trim());
                warn_if_unsaved(ledger);
            }

            Commands::Export { output, format } => {
                run_export_command(ledger, &format, output.as_deref())?;
            }

            Commands::Import { input, dry_run } => {
                run_import_command(ledger, input.as_deref(), dry_run)?;
            }
        }

        Ok(())
    }
}

fn warn_if_unsaved(ledger: &CustomerLedger) {
    if let Some(err) = ledger.last_save_error() {
        eprintln!("Warning: change kept in memory but not saved: {}", err);
    }
}

fn run_list_command(ledger: &CustomerLedger) {
    match ledger.list() {
        CustomerListing::Empty => println!("No customers found."),
        CustomerListing::Customers(customers) => {
            println!("{:<24} {:<16} {:>12}", "NAME", "METER", "UNITS");
            println!("{}", "-".repeat(54));
            for customer in customers {
                println!(
                    "{:<24} {:<16} {:>12}",
                    truncate(&customer.name, 24),
                    truncate(&customer.meter_number, 16),
                    customer.units_consumed
                );
            }
        }
    }
}

fn run_export_command(ledger: &CustomerLedger, format: &str, output: Option<&str>) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{Write, stdout};

    let exporter = Exporter::new(ledger);

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match format {
        "csv" => {
            let count = exporter.export_customers_csv(writer)?;
            if output.is_some() {
                eprintln!("Exported {} customers", count);
            }
        }
        "json" => {
            let snapshot = exporter.export_snapshot_json(writer)?;
            if output.is_some() {
                eprintln!("Exported snapshot: {} customers", snapshot.customers.len());
            }
        }
        _ => {
            anyhow::bail!("Invalid export format '{}'. Valid formats: csv, json", format);
        }
    }

    Ok(())
}

fn run_import_command(
    ledger: &mut CustomerLedger,
    input: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    use crate::io::{ImportOptions, Importer};
    use std::fs::File;
    use std::io::{Read, stdin};

    let reader: Box<dyn Read> = match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdin()),
    };

    let result = Importer::new(ledger).import_customers_csv(reader, ImportOptions { dry_run })?;

    if dry_run {
        println!("Dry run: {} customers would be imported", result.imported);
    } else {
        println!("Imported {} customers", result.imported);
    }

    if !result.errors.is_empty() {
        eprintln!("{} row(s) skipped:", result.errors.len());
        for err in &result.errors {
            eprintln!("  line {}: {}", err.line, err.error);
        }
    }

    if !dry_run {
        warn_if_unsaved(ledger);
    }
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
