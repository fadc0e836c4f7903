//! Tax calculation modules.
//!
//! The federal module holds the bracket engine; common holds the shared
//! rounding helpers used around it.

pub mod common;
pub mod federal;

pub use federal::{
    BracketTax, FederalTaxCalculator, FederalTaxComputation, effective_rate, taxable_income,
};
