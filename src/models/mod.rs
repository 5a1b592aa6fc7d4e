//! Typed response models

mod loan;

pub use loan::{Loan, LoanDetails};
