//! State income tax classification and placeholder estimates, 2025.
//!
//! States are classified by the kind of income tax they levy. Only the
//! no-income-tax outcome carries an amount; flat and graduated systems are
//! recognized but deliberately unimplemented and report a marker label
//! instead of a number.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of income tax a state levies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateTaxSystem {
    None,
    Flat,
    Graduated,
}

/// Outcome of the state tax lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateTaxEstimate {
    /// The state levies no income tax; the owed amount is zero.
    NoIncomeTax,

    /// The state's system is recognized but not computed yet.
    NotImplemented(StateTaxSystem),

    /// The code did not match any supported state.
    Unsupported,
}

impl StateTaxEstimate {
    /// Owed amount, when one can be stated.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::NoIncomeTax => Some(Decimal::ZERO),
            Self::NotImplemented(_) | Self::Unsupported => None,
        }
    }

    /// Display label shown next to the state line.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoIncomeTax => "No state income tax",
            Self::NotImplemented(_) => "N/A (not implemented yet)",
            Self::Unsupported => "N/A (unknown/unsupported state)",
        }
    }
}

fn alias(name: &str) -> Option<&'static str> {
    match name {
        "TEXAS" => Some("TX"),
        "FLORIDA" => Some("FL"),
        "NEVADA" => Some("NV"),
        "WASHINGTON" => Some("WA"),
        "ALASKA" => Some("AK"),
        "NEW HAMPSHIRE" => Some("NH"),
        "SOUTH DAKOTA" => Some("SD"),
        "TENNESSEE" => Some("TN"),
        "WYOMING" => Some("WY"),
        _ => None,
    }
}

/// Uppercases and trims the input, then resolves full-name aliases for the
/// no-income-tax states to their two-letter codes. Anything unrecognized
/// passes through unchanged for [`tax_system`] to reject.
pub fn normalize(input: &str) -> String {
    let code = input.trim().to_uppercase();
    match alias(&code) {
        Some(two_letter) => two_letter.to_string(),
        None => code,
    }
}

/// 2025 income tax system for the 50 states plus DC, keyed by two-letter
/// code.
pub fn tax_system(code: &str) -> Option<StateTaxSystem> {
    let system = match code {
        "AK" | "FL" | "NH" | "NV" | "SD" | "TN" | "TX" | "WY" => StateTaxSystem::None,

        "AZ" | "CO" | "GA" | "IA" | "ID" | "IL" | "IN" | "KY" | "LA" | "MI" | "MS" | "NC"
        | "PA" | "UT" | "WA" => StateTaxSystem::Flat,

        "AL" | "AR" | "CA" | "CT" | "DC" | "DE" | "HI" | "KS" | "MA" | "MD" | "ME" | "MN"
        | "MO" | "MT" | "ND" | "NE" | "NJ" | "NM" | "NY" | "OH" | "OK" | "OR" | "RI" | "SC"
        | "VA" | "VT" | "WI" | "WV" => StateTaxSystem::Graduated,

        _ => return None,
    };
    Some(system)
}

/// State tax estimate for a normalized state code.
///
/// The income argument is accepted but unused until flat and graduated
/// systems are actually computed; the signature is the one those
/// implementations will need.
pub fn estimate(
    _taxable_income: Decimal,
    state_code: &str,
) -> StateTaxEstimate {
    match tax_system(state_code) {
        Some(StateTaxSystem::None) => StateTaxEstimate::NoIncomeTax,
        Some(system) => StateTaxEstimate::NotImplemented(system),
        None => StateTaxEstimate::Unsupported,
    }
}
