//! Console formatting for monetary amounts, rates, and report sections.
//!
//! Everything here is a pure function over [`Decimal`] values or a writer;
//! rounding to display precision happens here and only here.

use std::io::{self, Write};

use rust_decimal::{Decimal, RoundingStrategy};

use taxcalc_core::calculations::BracketTax;

use crate::app::TaxReport;

/// Rounds half-up to `dp` decimal places and renders with exactly that many
/// digits after the point.
fn fixed_point(
    amount: Decimal,
    dp: u32,
) -> String {
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let mut s = rounded.to_string();

    if dp == 0 {
        if let Some(dot) = s.find('.') {
            s.truncate(dot);
        }
        return s;
    }

    match s.find('.') {
        None => {
            s.push('.');
            s.push_str(&"0".repeat(dp as usize));
        }
        Some(dot) => {
            let fraction_len = s.len() - dot - 1;
            for _ in fraction_len..dp as usize {
                s.push('0');
            }
        }
    }
    s
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a currency amount as `$1,234.56` (half-up to cents, comma
/// thousands grouping). Negative amounts render as `-$1,234.56`.
pub fn usd(amount: Decimal) -> String {
    let fixed = fixed_point(amount, 2);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

/// Whole-dollar form used for bracket bounds, e.g. `$48,475`.
pub fn usd_whole(amount: Decimal) -> String {
    format!("${}", group_thousands(&fixed_point(amount, 0)))
}

/// Formats a decimal rate as a whole percent, e.g. `0.22` -> `22%`.
pub fn percent_whole(rate: Decimal) -> String {
    format!("{}%", fixed_point(rate * Decimal::ONE_HUNDRED, 0))
}

/// Formats a decimal rate to two decimal places, e.g. `0.11828` -> `11.83%`.
pub fn percent(rate: Decimal) -> String {
    format!("{}%", fixed_point(rate * Decimal::ONE_HUNDRED, 2))
}

/// Writes the per-bracket breakdown table.
pub fn write_breakdown<W: Write>(
    out: &mut W,
    breakdown: &[BracketTax],
) -> io::Result<()> {
    writeln!(out, "Federal Tax Bracket Breakdown")?;
    writeln!(out, "{}", "-".repeat(50))?;
    for entry in breakdown {
        let upper = match entry.max_income {
            Some(upper) => usd_whole(upper),
            None => "and up".to_string(),
        };
        writeln!(
            out,
            "{} on {} to {}: taxed {} -> {}",
            percent_whole(entry.tax_rate),
            usd_whole(entry.min_income),
            upper,
            usd(entry.taxed_amount),
            usd(entry.tax),
        )?;
    }
    writeln!(out, "{}", "-".repeat(50))
}

/// Writes the closing summary block.
pub fn write_summary<W: Write>(
    out: &mut W,
    report: &TaxReport,
) -> io::Result<()> {
    writeln!(out, "=== Federal Tax Summary (Simplified) ===")?;
    writeln!(out, "Filing status: {}", report.filing_status.label())?;
    writeln!(out, "Gross income: {}", usd(report.gross_income))?;
    writeln!(
        out,
        "Deduction used: {} - {}",
        report.deduction_label,
        usd(report.deduction)
    )?;
    writeln!(out, "Taxable income: {}", usd(report.taxable_income))?;
    writeln!(out, "{}", "-".repeat(38))?;
    writeln!(
        out,
        "Total federal income tax: {}",
        usd(report.federal.total_tax)
    )?;
    if let Some((code, estimate)) = &report.state {
        match estimate.amount() {
            Some(amount) => writeln!(
                out,
                "State income tax ({code}): {} ({})",
                usd(amount),
                estimate.label()
            )?,
            None => writeln!(out, "State income tax ({code}): {}", estimate.label())?,
        }
    }
    writeln!(out, "{}", "-".repeat(38))?;
    writeln!(
        out,
        "Marginal tax rate: {}",
        percent_whole(report.federal.marginal_rate)
    )?;
    writeln!(
        out,
        "Effective tax rate: {}",
        percent(report.federal.effective_rate)
    )?;
    writeln!(
        out,
        "After-tax income (federal only): {}",
        usd(report.after_tax_income)
    )
}

/// Writes one full calculation: deduction applied, taxable income, the
/// breakdown table, totals, rates, and the summary block.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &TaxReport,
) -> io::Result<()> {
    writeln!(
        out,
        "{} applied: {}",
        report.deduction_label,
        usd(report.deduction)
    )?;
    writeln!(
        out,
        "Your taxable income is: {}",
        usd(report.taxable_income)
    )?;
    writeln!(out)?;

    write_breakdown(out, &report.federal.breakdown)?;
    writeln!(
        out,
        "\nTotal federal income tax owed: {}\n",
        usd(report.federal.total_tax)
    )?;

    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(
        out,
        "Marginal tax rate: {}",
        percent_whole(report.federal.marginal_rate)
    )?;
    writeln!(
        out,
        "Effective tax rate: {}",
        percent(report.federal.effective_rate)
    )?;
    writeln!(
        out,
        "After-tax income (federal only): {}",
        usd(report.after_tax_income)
    )?;
    writeln!(out)?;

    write_summary(out, report)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn usd_groups_thousands_and_pads_cents() {
        assert_eq!(usd(dec!(5914)), "$5,914.00");
        assert_eq!(usd(dec!(1031500.5)), "$1,031,500.50");
        assert_eq!(usd(dec!(0)), "$0.00");
        assert_eq!(usd(dec!(999.999)), "$1,000.00");
    }

    #[test]
    fn usd_rounds_half_up() {
        assert_eq!(usd(dec!(0.005)), "$0.01");
        assert_eq!(usd(dec!(0.004)), "$0.00");
    }

    #[test]
    fn usd_handles_negative_amounts() {
        assert_eq!(usd(dec!(-1234.5)), "-$1,234.50");
    }

    #[test]
    fn usd_whole_drops_cents() {
        assert_eq!(usd_whole(dec!(48475)), "$48,475");
        assert_eq!(usd_whole(dec!(0)), "$0");
    }

    #[test]
    fn percent_whole_renders_integer_rates() {
        assert_eq!(percent_whole(dec!(0.22)), "22%");
        assert_eq!(percent_whole(dec!(0)), "0%");
        assert_eq!(percent_whole(dec!(0.37)), "37%");
    }

    #[test]
    fn percent_renders_two_decimals() {
        assert_eq!(percent(dec!(0.11828)), "11.83%");
        assert_eq!(percent(dec!(0.1)), "10.00%");
    }

    #[test]
    fn breakdown_table_marks_open_ended_bracket() {
        let breakdown = vec![BracketTax {
            tax_rate: dec!(0.37),
            taxed_amount: dec!(248400),
            tax: dec!(91908),
            min_income: dec!(751600),
            max_income: None,
        }];
        let mut out = Vec::new();

        write_breakdown(&mut out, &breakdown).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("37% on $751,600 to and up: taxed $248,400.00 -> $91,908.00"));
    }
}
