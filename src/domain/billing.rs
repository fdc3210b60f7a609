use serde::{Deserialize, Serialize};

use super::CustomerRecord;

/// Flat price per unit consumed. There are no tiers, taxes or minimum charge.
pub const RATE: f64 = 5.0;

/// Label printed in front of bill amounts.
pub const CURRENCY_LABEL: &str = "Rs.";

/// Amount owed for the given record: `units_consumed * RATE`.
pub fn compute_bill(record: &CustomerRecord) -> f64 {
    record.units_consumed * RATE
}

/// Format an amount with two decimals.
/// Example: 500.0 -> "500.00", 12.345 -> "12.35"
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// A computed bill for a single customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub customer: CustomerRecord,
    pub rate: f64,
    pub amount: f64,
}

impl Bill {
    pub fn for_customer(customer: CustomerRecord) -> Self {
        let amount = compute_bill(&customer);
        Self {
            customer,
            rate: RATE,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_bill_is_linear() {
        for units in [0.0, 1.0, 2.5, 100.0, 12345.678] {
            let record = CustomerRecord::new("X", "M", units);
            assert_eq!(compute_bill(&record), units * 5.0);
        }
    }

    #[test]
    fn test_compute_bill_zero_units() {
        let record = CustomerRecord::new("Bob", "M2", 0.0);
        assert_eq!(compute_bill(&record), 0.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(500.0), "500.00");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(2.5), "2.50");
    }

    #[test]
    fn test_bill_for_customer() {
        let bill = Bill::for_customer(CustomerRecord::new("Alice", "M1", 100.0));
        assert_eq!(bill.rate, RATE);
        assert_eq!(bill.amount, 500.0);
        assert_eq!(bill.customer.name, "Alice");
    }
}
