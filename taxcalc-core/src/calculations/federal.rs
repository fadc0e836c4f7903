//! Federal bracket tax computations.
//!
//! Applies a marginal-rate schedule to a taxable-income amount, producing
//! the total tax owed, a per-bracket breakdown, and the derived marginal and
//! effective rates. All arithmetic is exact [`Decimal`] arithmetic; nothing
//! here rounds, so a breakdown always sums to its total without drift.
//! Rounding to cents happens at the display layer.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxcalc_core::FilingStatusCode;
//! use taxcalc_core::calculations::FederalTaxCalculator;
//! use taxcalc_core::schedules;
//!
//! let calc = FederalTaxCalculator::new(schedules::brackets(FilingStatusCode::Single));
//!
//! let (total, breakdown) = calc.breakdown(dec!(50000));
//! assert_eq!(total, dec!(5914.00));
//! assert_eq!(breakdown.len(), 3);
//! assert_eq!(calc.marginal_rate(dec!(50000)), dec!(0.22));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxBracket;
use crate::calculations::common::{max, round_half_up};

/// Tax owed within a single bracket, as reported in a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    /// Marginal rate of the bracket.
    pub tax_rate: Decimal,

    /// Portion of taxable income that fell inside the bracket.
    pub taxed_amount: Decimal,

    /// Tax owed on that portion (`taxed_amount * tax_rate`).
    pub tax: Decimal,

    /// Lower bound of the bracket (inclusive).
    pub min_income: Decimal,

    /// Upper bound of the bracket; `None` for the open-ended top bracket.
    pub max_income: Option<Decimal>,
}

/// Aggregate result of one federal tax calculation.
///
/// Created fresh per calculation and owned by the caller; nothing is cached
/// or shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalTaxComputation {
    /// Total federal income tax owed.
    pub total_tax: Decimal,

    /// One entry per bracket reached, ascending. Sums exactly to
    /// `total_tax`.
    pub breakdown: Vec<BracketTax>,

    /// Rate applied to the next dollar of income.
    pub marginal_rate: Decimal,

    /// Total tax as a fraction of gross (pre-deduction) income.
    pub effective_rate: Decimal,
}

/// Calculator over one filing status's bracket schedule.
///
/// Brackets must be sorted ascending by `min_income`, contiguous, and end in
/// a single open-ended bracket; see [`crate::schedules::validate`]. The
/// calculator relies on that shape for early termination and does not
/// re-check it on each call.
#[derive(Debug, Clone)]
pub struct FederalTaxCalculator<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> FederalTaxCalculator<'a> {
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Total federal income tax on `taxable_income`.
    ///
    /// Non-negative and non-decreasing in income, continuous across bracket
    /// boundaries. An empty schedule yields zero. Negative input is a caller
    /// defect; clamp with [`taxable_income`] first.
    pub fn total_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let mut total = Decimal::ZERO;

        for bracket in self.brackets {
            if taxable_income <= bracket.min_income {
                break;
            }
            let cap = bracket
                .max_income
                .map_or(taxable_income, |upper| taxable_income.min(upper));
            total += (cap - bracket.min_income) * bracket.tax_rate;
        }

        total
    }

    /// Total tax plus one [`BracketTax`] entry per bracket that received a
    /// strictly positive amount, in ascending bracket order.
    ///
    /// Income sitting exactly on a bracket's lower bound produces no entry
    /// for that bracket. The entry taxes sum to the returned total exactly.
    pub fn breakdown(
        &self,
        taxable_income: Decimal,
    ) -> (Decimal, Vec<BracketTax>) {
        let mut total = Decimal::ZERO;
        let mut entries = Vec::new();

        for bracket in self.brackets {
            if taxable_income <= bracket.min_income {
                break;
            }
            let cap = bracket
                .max_income
                .map_or(taxable_income, |upper| taxable_income.min(upper));
            let taxed_amount = cap - bracket.min_income;

            if taxed_amount > Decimal::ZERO {
                let tax = taxed_amount * bracket.tax_rate;
                total += tax;
                entries.push(BracketTax {
                    tax_rate: bracket.tax_rate,
                    taxed_amount,
                    tax,
                    min_income: bracket.min_income,
                    max_income: bracket.max_income,
                });
            }
        }

        (total, entries)
    }

    /// Rate of the highest bracket whose lower bound lies below
    /// `taxable_income`; zero when no bracket is reached.
    ///
    /// For strictly positive income this agrees with the rate of the last
    /// entry [`Self::breakdown`] reports.
    pub fn marginal_rate(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let mut marginal = Decimal::ZERO;

        for bracket in self.brackets {
            if taxable_income > bracket.min_income {
                marginal = bracket.tax_rate;
            } else {
                break;
            }
        }

        marginal
    }

    /// Runs the full calculation: total, breakdown, marginal rate, and
    /// effective rate in one pass. `gross_income` is the pre-deduction
    /// amount; the effective rate is taken against it rather than against
    /// `taxable_income`.
    pub fn compute(
        &self,
        taxable_income: Decimal,
        gross_income: Decimal,
    ) -> FederalTaxComputation {
        let (total_tax, breakdown) = self.breakdown(taxable_income);

        FederalTaxComputation {
            marginal_rate: self.marginal_rate(taxable_income),
            effective_rate: effective_rate(total_tax, gross_income),
            total_tax,
            breakdown,
        }
    }
}

/// Overall burden on gross earnings: `total_tax / gross_income`, or zero for
/// a non-positive denominator.
///
/// Deliberately divides by gross rather than taxable income, so the rate
/// expresses the burden on what was earned, not on the taxed base.
pub fn effective_rate(
    total_tax: Decimal,
    gross_income: Decimal,
) -> Decimal {
    if gross_income <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        total_tax / gross_income
    }
}

/// Income subject to federal tax: gross minus deduction, floored at zero.
pub fn taxable_income(
    gross_income: Decimal,
    deduction: Decimal,
) -> Decimal {
    max(round_half_up(gross_income - deduction), Decimal::ZERO)
}
