// Application layer - the customer ledger and its use cases.
// Any presentation shell (CLI, TUI, GUI) drives the ledger through this module.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
