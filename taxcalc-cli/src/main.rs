use std::io::{self, Write};

use anyhow::bail;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use taxcalc_cli::{app, input};
use taxcalc_core::FilingStatusCode;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Simplified U.S. federal income tax estimator.
///
/// Without flags, runs an interactive session that prompts for filing
/// status, income, deduction choice, and state. With `--filing-status` and
/// `--income`, runs a single calculation and exits.
#[derive(Debug, Parser)]
#[command(name = "taxcalc", version, about)]
struct Cli {
    /// Filing status: `single` or `mfj`.
    #[arg(long)]
    filing_status: Option<String>,

    /// Gross income before deductions. Commas are accepted.
    #[arg(long, value_parser = input::parse_amount)]
    income: Option<Decimal>,

    /// Custom deduction amount; the standard deduction applies when omitted.
    #[arg(long, value_parser = input::parse_amount)]
    deduction: Option<Decimal>,

    /// State of residence, as a two-letter code or full name (e.g. `TX`).
    #[arg(long)]
    state: Option<String>,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match (&cli.filing_status, cli.income) {
        (Some(status_key), Some(income)) => {
            let Some(status) = FilingStatusCode::parse(&status_key.to_lowercase()) else {
                bail!("unrecognized filing status '{status_key}' (expected 'single' or 'mfj')");
            };
            debug!(status = status.as_str(), "running single calculation");
            app::run_once(&mut out, status, income, cli.deduction, cli.state.as_deref())?;
        }
        (None, None) => {
            let stdin = io::stdin();
            app::run_interactive(&mut stdin.lock(), &mut out)?;
        }
        _ => bail!("--filing-status and --income must be used together"),
    }

    out.flush()?;
    Ok(())
}
