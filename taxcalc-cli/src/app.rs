//! Application flow: the interactive session loop and single-shot runs.

use std::io::{BufRead, Write};

use anyhow::Result;
use rust_decimal::Decimal;
use tracing::debug;

use taxcalc_core::calculations::{FederalTaxCalculator, FederalTaxComputation, taxable_income};
use taxcalc_core::state::{self, StateTaxEstimate};
use taxcalc_core::{FilingStatusCode, schedules};

use crate::display;
use crate::input::{self, InputError, MAX_ATTEMPTS};

/// Everything one calculation produced, ready for display.
#[derive(Debug, Clone)]
pub struct TaxReport {
    pub filing_status: FilingStatusCode,
    pub gross_income: Decimal,
    pub deduction: Decimal,
    pub deduction_label: String,
    pub taxable_income: Decimal,
    pub federal: FederalTaxComputation,
    /// Normalized state code and its lookup outcome, when a state was given.
    pub state: Option<(String, StateTaxEstimate)>,
    pub after_tax_income: Decimal,
}

/// Builds a report from confirmed inputs. Raw state input is normalized
/// here; the deduction is applied and clamped here.
pub fn build_report(
    filing_status: FilingStatusCode,
    gross_income: Decimal,
    deduction: Decimal,
    deduction_label: String,
    state_input: Option<&str>,
) -> TaxReport {
    let taxable = taxable_income(gross_income, deduction);
    let calculator = FederalTaxCalculator::new(schedules::brackets(filing_status));
    let federal = calculator.compute(taxable, gross_income);
    let state = state_input.map(|raw| {
        let code = state::normalize(raw);
        let estimate = state::estimate(taxable, &code);
        (code, estimate)
    });
    let after_tax_income = gross_income - federal.total_tax;

    debug!(
        status = filing_status.as_str(),
        taxable_income = %taxable,
        total_tax = %federal.total_tax,
        "calculation complete"
    );

    TaxReport {
        filing_status,
        gross_income,
        deduction,
        deduction_label,
        taxable_income: taxable,
        federal,
        state,
        after_tax_income,
    }
}

fn standard_deduction_label(status: FilingStatusCode) -> &'static str {
    match status {
        FilingStatusCode::Single => "Standard Deduction (Single)",
        FilingStatusCode::MarriedFilingJointly => "Standard Deduction (MFJ)",
    }
}

fn income_prompt(status: FilingStatusCode) -> &'static str {
    match status {
        FilingStatusCode::Single => "Enter your gross income: ",
        FilingStatusCode::MarriedFilingJointly => "Enter your household gross income: ",
    }
}

fn prompt_filing_status<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<FilingStatusCode, InputError> {
    input::prompt(
        input,
        out,
        "Please enter your filing status (single/mfj): ",
        "Please enter 'single' or 'mfj'.",
        |answer| FilingStatusCode::parse(&answer.to_lowercase()),
    )
}

/// Income prompt plus confirmation. Declining the confirmation re-enters the
/// income, up to the shared attempt limit.
fn prompt_confirmed_income<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    status: FilingStatusCode,
) -> Result<Decimal, InputError> {
    for _ in 0..MAX_ATTEMPTS {
        let income = input::prompt(
            input,
            out,
            income_prompt(status),
            "Invalid input. Please enter a valid number.",
            input::parse_non_negative_amount,
        )?;
        writeln!(out, "Income entered: {}", display::usd(income))?;

        if input::prompt_yes_no(input, out, "Is this correct? (Y/N): ")? {
            return Ok(income);
        }
        writeln!(out, "Okay, let's re-enter your income.")?;
        writeln!(out)?;
    }
    Err(InputError::AttemptsExhausted(MAX_ATTEMPTS))
}

/// Deduction choice. Y takes the standard deduction, N prompts for a custom
/// amount, anything else announces the default and takes the standard
/// deduction.
fn prompt_deduction<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    status: FilingStatusCode,
) -> Result<(Decimal, String), InputError> {
    let choice = input::prompt_line(
        input,
        out,
        "Do you want to use the standard deduction? (Y/N): ",
    )?;

    match choice.to_lowercase().as_str() {
        "y" => Ok((
            schedules::standard_deduction(status),
            standard_deduction_label(status).to_string(),
        )),
        "n" => {
            let amount = input::prompt(
                input,
                out,
                "Enter your total custom deduction: ",
                "Invalid input. Please enter a valid number.",
                input::parse_non_negative_amount,
            )?;
            Ok((amount, "Custom Deduction".to_string()))
        }
        _ => {
            writeln!(out, "Invalid choice. Defaulting to standard deduction.")?;
            Ok((
                schedules::standard_deduction(status),
                standard_deduction_label(status).to_string(),
            ))
        }
    }
}

/// Runs the interactive session loop until the user declines another
/// calculation.
pub fn run_interactive<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        let filing_status = prompt_filing_status(input, out)?;

        let gross_income = prompt_confirmed_income(input, out, filing_status)?;
        writeln!(out, "Income confirmed. Moving on...")?;
        writeln!(out, "\n{}\n", "=".repeat(40))?;

        let (deduction, deduction_label) = prompt_deduction(input, out, filing_status)?;
        let state_input =
            input::prompt_line(input, out, "Please indicate your state (e.g., TX): ")?;

        let report = build_report(
            filing_status,
            gross_income,
            deduction,
            deduction_label,
            Some(&state_input),
        );
        display::write_report(out, &report)?;
        writeln!(out)?;

        let again = input::prompt_line(input, out, "Run another calculation? (Y/N): ")?;
        if again.to_lowercase() != "y" {
            writeln!(out, "Thank you for using the Tax Calculator. Goodbye!")?;
            return Ok(());
        }
        writeln!(out)?;
    }
}

/// Runs one calculation from flag values and prints the report.
pub fn run_once<W: Write>(
    out: &mut W,
    filing_status: FilingStatusCode,
    gross_income: Decimal,
    custom_deduction: Option<Decimal>,
    state_input: Option<&str>,
) -> Result<()> {
    anyhow::ensure!(
        !gross_income.is_sign_negative(),
        "income must be non-negative"
    );
    if let Some(deduction) = custom_deduction {
        anyhow::ensure!(
            !deduction.is_sign_negative(),
            "deduction must be non-negative"
        );
    }

    let (deduction, deduction_label) = match custom_deduction {
        Some(amount) => (amount, "Custom Deduction".to_string()),
        None => (
            schedules::standard_deduction(filing_status),
            standard_deduction_label(filing_status).to_string(),
        ),
    };

    let report = build_report(
        filing_status,
        gross_income,
        deduction,
        deduction_label,
        state_input,
    );
    display::write_report(out, &report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn build_report_single_standard_deduction() {
        let report = build_report(
            FilingStatusCode::Single,
            dec!(50000),
            dec!(15750),
            "Standard Deduction (Single)".to_string(),
            Some("TX"),
        );

        // 50000 - 15750 = 34250 taxable
        assert_eq!(report.taxable_income, dec!(34250.00));
        // 1192.50 + (34250 - 11925) * 0.12 = 3871.50
        assert_eq!(report.federal.total_tax, dec!(3871.50));
        assert_eq!(report.federal.marginal_rate, dec!(0.12));
        assert_eq!(report.after_tax_income, dec!(46128.50));
        assert_eq!(
            report.state,
            Some(("TX".to_string(), StateTaxEstimate::NoIncomeTax))
        );
    }

    #[test]
    fn build_report_normalizes_state_names() {
        let report = build_report(
            FilingStatusCode::Single,
            dec!(50000),
            dec!(0),
            "Custom Deduction".to_string(),
            Some(" texas "),
        );

        assert_eq!(
            report.state,
            Some(("TX".to_string(), StateTaxEstimate::NoIncomeTax))
        );
    }

    #[test]
    fn build_report_clamps_deduction_above_income() {
        let report = build_report(
            FilingStatusCode::MarriedFilingJointly,
            dec!(20000),
            dec!(31500),
            "Standard Deduction (MFJ)".to_string(),
            None,
        );

        assert_eq!(report.taxable_income, dec!(0));
        assert_eq!(report.federal.total_tax, dec!(0));
        assert!(report.federal.breakdown.is_empty());
        assert_eq!(report.state, None);
    }

    #[test]
    fn run_once_rejects_negative_income() {
        let mut out = Vec::new();

        let result = run_once(
            &mut out,
            FilingStatusCode::Single,
            dec!(-1),
            None,
            None,
        );

        assert!(result.is_err());
    }

    #[test]
    fn run_once_prints_full_report() {
        let mut out = Vec::new();

        run_once(
            &mut out,
            FilingStatusCode::Single,
            dec!(50000),
            Some(dec!(0)),
            Some("CA"),
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total federal income tax owed: $5,914.00"));
        assert!(text.contains("Marginal tax rate: 22%"));
        assert!(text.contains("State income tax (CA): N/A (not implemented yet)"));
    }
}
