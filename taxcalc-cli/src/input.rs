//! Prompt-side input handling: amount parsing and the bounded retry loop.
//!
//! Re-prompting on bad input is a loop with an explicit attempt limit, never
//! recursion, so exhaustion is a testable error rather than stack growth.

use std::io::{BufRead, Write};

use rust_decimal::Decimal;
use thiserror::Error;

/// How many times a prompt is repeated before the session gives up.
pub const MAX_ATTEMPTS: usize = 5;

/// Error returned when a string cannot be parsed as a currency amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Errors from the interactive prompt loop.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no valid answer after {0} attempts")]
    AttemptsExhausted(usize),

    #[error("input stream closed")]
    Eof,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Normalizes input for amount parsing: trims whitespace and removes commas
/// (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a user-entered currency amount.
///
/// Accepts comma thousands separators (e.g. `"1,234.56"`). Empty input is
/// invalid; a prompt that allows "no answer" should not route through this.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    normalize_amount_input(s)
        .parse()
        .map_err(|source| ParseAmountError {
            input: s.trim().to_string(),
            source,
        })
}

/// Parses a non-negative currency amount; `None` on anything else.
pub fn parse_non_negative_amount(s: &str) -> Option<Decimal> {
    parse_amount(s).ok().filter(|v| !v.is_sign_negative())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String, InputError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(InputError::Eof);
    }
    Ok(line)
}

/// Writes `prompt_text`, reads one line, and applies `parse` to the trimmed
/// answer, repeating up to [`MAX_ATTEMPTS`] times. Each rejection prints
/// `retry_message` before asking again.
pub fn prompt<R, W, T, F>(
    input: &mut R,
    out: &mut W,
    prompt_text: &str,
    retry_message: &str,
    mut parse: F,
) -> Result<T, InputError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Option<T>,
{
    for _ in 0..MAX_ATTEMPTS {
        write!(out, "{prompt_text}")?;
        out.flush()?;
        let line = read_line(input)?;
        match parse(line.trim()) {
            Some(value) => return Ok(value),
            None => writeln!(out, "{retry_message}")?,
        }
    }
    Err(InputError::AttemptsExhausted(MAX_ATTEMPTS))
}

/// Asks a Y/N question, re-asking on anything else. Case-insensitive.
pub fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt_text: &str,
) -> Result<bool, InputError> {
    prompt(
        input,
        out,
        prompt_text,
        "Please enter Y or N.",
        |answer| match answer.to_lowercase().as_str() {
            "y" => Some(true),
            "n" => Some(false),
            _ => None,
        },
    )
}

/// Asks a free-text question and returns the first trimmed answer.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt_text: &str,
) -> Result<String, InputError> {
    prompt(input, out, prompt_text, "", |answer| {
        Some(answer.to_string())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("1,031,500").unwrap(), dec!(1031500));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  50000  ").unwrap(), dec!(50000));
    }

    #[test]
    fn parse_amount_rejects_non_numeric_and_empty() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("   ").is_err());
    }

    #[test]
    fn parse_non_negative_amount_rejects_negatives() {
        assert_eq!(parse_non_negative_amount("100"), Some(dec!(100)));
        assert_eq!(parse_non_negative_amount("-100"), None);
        assert_eq!(parse_non_negative_amount("oops"), None);
    }

    #[test]
    fn prompt_returns_first_valid_answer() {
        let mut input = "nope\n42\n".as_bytes();
        let mut out = Vec::new();

        let value = prompt(&mut input, &mut out, "N: ", "Try again.", |s| {
            s.parse::<i32>().ok()
        })
        .unwrap();

        assert_eq!(value, 42);
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Try again."));
    }

    #[test]
    fn prompt_gives_up_after_max_attempts() {
        let script = "x\n".repeat(MAX_ATTEMPTS + 1);
        let mut input = script.as_bytes();
        let mut out = Vec::new();

        let result = prompt(&mut input, &mut out, "N: ", "Try again.", |s| {
            s.parse::<i32>().ok()
        });

        assert!(matches!(
            result,
            Err(InputError::AttemptsExhausted(MAX_ATTEMPTS))
        ));
    }

    #[test]
    fn prompt_reports_eof_when_input_ends() {
        let mut input = "".as_bytes();
        let mut out = Vec::new();

        let result = prompt(&mut input, &mut out, "N: ", "Try again.", |s| {
            s.parse::<i32>().ok()
        });

        assert!(matches!(result, Err(InputError::Eof)));
    }

    #[test]
    fn prompt_yes_no_reasks_until_recognizable() {
        let mut input = "maybe\nY\n".as_bytes();
        let mut out = Vec::new();

        let answer = prompt_yes_no(&mut input, &mut out, "Sure? (Y/N): ").unwrap();

        assert!(answer);
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Please enter Y or N."));
    }
}
