//! Tax schedule registry: 2025 bracket schedules and standard deductions.
//!
//! The tables are fixed for one tax year and never mutated; year-over-year
//! updates are an edit to this file, not a runtime concern. Lookups by
//! [`FilingStatusCode`] always succeed. The string-keyed accessors exist for
//! callers holding raw user input and degrade to an empty schedule / zero
//! deduction on an unrecognized key, which the engine treats as "no tax
//! owed".
//!
//! Schedule invariants (contiguous ascending brackets, one open-ended top
//! bracket) are enforced by [`validate`], run against the compiled-in tables
//! in tests rather than on the calculation path.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::warn;

use crate::{FilingStatusCode, TaxBracket};

/// Tax year the compiled-in tables describe.
pub const TAX_YEAR: i32 = 2025;

fn bracket(
    tax_rate: Decimal,
    min_income: Decimal,
    max_income: Option<Decimal>,
) -> TaxBracket {
    TaxBracket {
        min_income,
        max_income,
        tax_rate,
    }
}

static SINGLE_2025: LazyLock<Vec<TaxBracket>> = LazyLock::new(|| {
    vec![
        bracket(dec!(0.10), dec!(0), Some(dec!(11925))),
        bracket(dec!(0.12), dec!(11925), Some(dec!(48475))),
        bracket(dec!(0.22), dec!(48475), Some(dec!(103350))),
        bracket(dec!(0.24), dec!(103350), Some(dec!(197300))),
        bracket(dec!(0.32), dec!(197300), Some(dec!(250525))),
        bracket(dec!(0.35), dec!(250525), Some(dec!(626350))),
        bracket(dec!(0.37), dec!(626350), None),
    ]
});

static MFJ_2025: LazyLock<Vec<TaxBracket>> = LazyLock::new(|| {
    vec![
        bracket(dec!(0.10), dec!(0), Some(dec!(23850))),
        bracket(dec!(0.12), dec!(23850), Some(dec!(96950))),
        bracket(dec!(0.22), dec!(96950), Some(dec!(206700))),
        bracket(dec!(0.24), dec!(206700), Some(dec!(394600))),
        bracket(dec!(0.32), dec!(394600), Some(dec!(501050))),
        bracket(dec!(0.35), dec!(501050), Some(dec!(751600))),
        bracket(dec!(0.37), dec!(751600), None),
    ]
});

/// Bracket schedule for a filing status.
pub fn brackets(status: FilingStatusCode) -> &'static [TaxBracket] {
    match status {
        FilingStatusCode::Single => SINGLE_2025.as_slice(),
        FilingStatusCode::MarriedFilingJointly => MFJ_2025.as_slice(),
    }
}

/// Standard deduction for a filing status.
pub fn standard_deduction(status: FilingStatusCode) -> Decimal {
    match status {
        FilingStatusCode::Single => dec!(15750),
        FilingStatusCode::MarriedFilingJointly => dec!(31500),
    }
}

/// Schedule lookup by raw user-facing key.
///
/// An unrecognized key yields an empty schedule rather than an error; the
/// engine computes zero tax over it.
pub fn brackets_for_key(key: &str) -> &'static [TaxBracket] {
    match FilingStatusCode::parse(key) {
        Some(status) => brackets(status),
        None => {
            warn!(key, "unrecognized filing status, using empty schedule");
            &[]
        }
    }
}

/// Standard deduction lookup by raw user-facing key; zero for an
/// unrecognized key.
pub fn standard_deduction_for_key(key: &str) -> Decimal {
    match FilingStatusCode::parse(key) {
        Some(status) => standard_deduction(status),
        None => {
            warn!(key, "unrecognized filing status, using zero deduction");
            Decimal::ZERO
        }
    }
}

/// Structural defects a bracket schedule can carry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The schedule contains no brackets.
    #[error("schedule has no brackets")]
    Empty,

    /// The first bracket starts below zero income.
    #[error("first bracket starts at {0}, below zero")]
    NegativeStart(Decimal),

    /// A bracket's upper bound does not exceed its lower bound.
    #[error("bracket {index} upper bound {upper} does not exceed lower bound {lower}")]
    EmptyRange {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    /// A bracket does not start where the previous one ends.
    #[error("bracket {index} starts at {found} but the previous bracket ends at {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// A bracket's rate fails to increase over the previous bracket's.
    #[error("bracket {index} rate {rate} does not increase over the previous bracket")]
    NonAscendingRate { index: usize, rate: Decimal },

    /// A bracket's rate lies outside the (0, 1] interval.
    #[error("bracket {index} rate {rate} is outside (0, 1]")]
    RateOutOfRange { index: usize, rate: Decimal },

    /// A bracket other than the last has no upper bound.
    #[error("bracket {index} has no upper bound but is not the last bracket")]
    UnboundedBeforeLast { index: usize },

    /// The last bracket has an upper bound; the top bracket must be
    /// open-ended.
    #[error("the last bracket must have no upper bound")]
    BoundedTop,
}

/// Checks the schedule invariants the engine relies on.
///
/// Intended to run once when schedule data is loaded (for the compiled-in
/// tables, that means at test time), never per calculation.
pub fn validate(brackets: &[TaxBracket]) -> Result<(), ScheduleError> {
    let Some(first) = brackets.first() else {
        return Err(ScheduleError::Empty);
    };
    if first.min_income < Decimal::ZERO {
        return Err(ScheduleError::NegativeStart(first.min_income));
    }

    for (index, b) in brackets.iter().enumerate() {
        if b.tax_rate <= Decimal::ZERO || b.tax_rate > Decimal::ONE {
            return Err(ScheduleError::RateOutOfRange {
                index,
                rate: b.tax_rate,
            });
        }
        if let Some(upper) = b.max_income
            && upper <= b.min_income
        {
            return Err(ScheduleError::EmptyRange {
                index,
                lower: b.min_income,
                upper,
            });
        }
    }

    for (i, pair) in brackets.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        let index = i + 1;

        let Some(upper) = prev.max_income else {
            return Err(ScheduleError::UnboundedBeforeLast { index: i });
        };
        if next.min_income != upper {
            return Err(ScheduleError::NotContiguous {
                index,
                expected: upper,
                found: next.min_income,
            });
        }
        if next.tax_rate <= prev.tax_rate {
            return Err(ScheduleError::NonAscendingRate {
                index,
                rate: next.tax_rate,
            });
        }
    }

    if brackets[brackets.len() - 1].max_income.is_some() {
        return Err(ScheduleError::BoundedTop);
    }

    Ok(())
}
