mod billing;
mod customer;

pub use billing::*;
pub use customer::*;
