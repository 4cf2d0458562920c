use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use passbook_core::{Direction, Transaction};
use passbook_finance::{category_breakdown, monthly_totals, period_totals, to_forecast_records};
use passbook_ingest::text_fallback::extract_line;
use passbook_ingest::{
    load_input, process_row, BankSignatureMatcher, ParseOptions, ParseOutcome, ParseReport,
    RowOutcome, StatementInput, StatementParser, Table,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::{Config, Dispatch};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PASSBOOK_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "passbook",
    version,
    long_version = LONG_VERSION,
    about = "Normalize bank statement tables and text into transactions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Decoded statement: .json document, .csv grid, or extracted text
    input: PathBuf,

    /// Date substituted for unparseable dates (default: today in parse.timezone)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Skip the regex pass over page text
    #[arg(long)]
    no_text_fallback: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement and print transactions as JSON
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Route by bank signature instead of per-row layout
        #[arg(long)]
        by_bank: bool,

        /// Include the parse report in the output
        #[arg(long)]
        report: bool,

        /// Pretty-print JSON (also `output.pretty` in config)
        #[arg(long)]
        pretty: bool,
    },

    /// Show what happened to every row: layout chosen or why it was rejected
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print which bank strategy a document would be dispatched to
    DetectBank {
        /// Decoded statement file
        input: PathBuf,
    },

    /// Monthly income/expense totals and category breakdowns
    Summary {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long)]
        pretty: bool,
    },

    /// Manage ~/.passbook/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config (keeps an existing file unless --force)
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config
    Show,
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    transactions: &'a [Transaction],
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a ParseReport>,
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    count: usize,
    period: passbook_finance::PeriodTotals,
    months: Vec<passbook_finance::MonthlyTotals>,
    spending: Vec<passbook_finance::CategoryTotal>,
    income: Vec<passbook_finance::CategoryTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a ParseReport>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config_for(&cli.command, config::load_config)?;
    init_tracing(&cfg);

    match cli.command {
        Command::Parse {
            input,
            by_bank,
            report,
            pretty,
        } => {
            let dispatch = if by_bank { Dispatch::Bank } else { cfg.parse.dispatch };
            let (txns, parse_report) = run_parse(&cfg, &input, dispatch)?;
            let out = ParseOutput {
                transactions: &txns,
                count: txns.len(),
                report: parse_report.as_ref().filter(|_| report),
            };
            print_json(&out, pretty || cfg.output.pretty)?;
        }

        Command::Inspect { input } => {
            let opts = parse_options(&cfg, &input)?;
            let doc = load_input(&input.input)?;
            inspect(&doc, &opts);
        }

        Command::DetectBank { input } => {
            let doc = load_input(&input)?;
            println!("{}", BankSignatureMatcher::default().detect_bank(doc.text()));
        }

        Command::Summary { input, pretty } => {
            let (txns, report) = run_parse(&cfg, &input, cfg.parse.dispatch)?;
            let out = SummaryOutput {
                count: txns.len(),
                period: period_totals(&txns),
                months: monthly_totals(&to_forecast_records(&txns)),
                spending: category_breakdown(&txns, Direction::Debit),
                income: category_breakdown(&txns, Direction::Credit),
                report: report.as_ref(),
            };
            print_json(&out, pretty || cfg.output.pretty)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init { force } => config::init_config(force)?,
            ConfigCommand::Show => {
                config::validate(&cfg)?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// `config init` must work even when the existing file is broken, so it
/// never reads it.
fn config_for(command: &Command, load: impl FnOnce() -> Result<Config>) -> Result<Config> {
    match command {
        Command::Config {
            command: ConfigCommand::Init { .. },
        } => Ok(Config::default()),
        _ => load(),
    }
}

/// `RUST_LOG` first, then `log.level` from config. Logs go to stderr.
fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_options(cfg: &Config, input: &InputArgs) -> Result<ParseOptions> {
    let today = match input.today {
        Some(d) => d,
        None => passbook_core::time::processing_date(&cfg.parse.timezone)
            .context("parse.timezone in config")?,
    };
    Ok(ParseOptions::new(today).with_text_fallback(cfg.parse.text_fallback && !input.no_text_fallback))
}

fn run_parse(
    cfg: &Config,
    input: &InputArgs,
    dispatch: Dispatch,
) -> Result<(Vec<Transaction>, Option<ParseReport>)> {
    let opts = parse_options(cfg, input)?;
    let doc = load_input(&input.input)?;
    info!(input = %input.input.display(), ?dispatch, today = %opts.today, "parsing statement");

    if dispatch == Dispatch::Bank {
        let txns = match &doc {
            StatementInput::Grid(rows) => {
                BankSignatureMatcher::default().parse("", std::slice::from_ref(rows), &opts)
            }
            StatementInput::Document(d) => {
                BankSignatureMatcher::default().parse(&d.text, &d.tables, &opts)
            }
            StatementInput::Text(text) => BankSignatureMatcher::default().parse(text, &[], &opts),
        };
        return Ok((txns, None));
    }

    let parser = StatementParser::new(opts);
    let ParseOutcome {
        transactions,
        report,
    } = match &doc {
        StatementInput::Grid(rows) => parser.parse_grid(rows),
        StatementInput::Document(d) => parser.parse_with_report(&d.tables, &d.text),
        StatementInput::Text(text) => parser.parse_with_report(&[], text),
    };
    Ok((transactions, Some(report)))
}

fn inspect(doc: &StatementInput, opts: &ParseOptions) {
    let tables: &[Table] = match doc {
        StatementInput::Grid(rows) => std::slice::from_ref(rows),
        StatementInput::Document(d) => d.tables.as_slice(),
        StatementInput::Text(_) => &[],
    };

    for (t, table) in tables.iter().enumerate() {
        for (r, row) in table.iter().enumerate() {
            let status = match process_row(row, opts) {
                RowOutcome::Header => "header".to_string(),
                RowOutcome::Parsed { layout, transaction } => format!(
                    "{layout}: {} {} {:.2} [{}]",
                    transaction.date,
                    transaction.direction.as_str(),
                    transaction.amount,
                    transaction.category
                ),
                RowOutcome::Rejected { layout: Some(layout), reason } => {
                    format!("rejected ({layout}): {reason}")
                }
                RowOutcome::Rejected { layout: None, reason } => format!("rejected: {reason}"),
            };
            println!("table {t} row {r}: {status}");
        }
    }

    let text = doc.text();
    if text.trim().is_empty() {
        return;
    }
    for (n, line) in text.lines().enumerate() {
        if let Some(txn) = extract_line(line, opts) {
            println!(
                "text line {n}: {} {:.2} {:?} [{}]",
                txn.date, txn.amount, txn.description, txn.category
            );
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{s}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken() -> Result<Config> {
        config::parse_config("[parse\ntimezone = ")
    }

    #[test]
    fn test_init_ignores_broken_config() {
        let cli = Cli::try_parse_from(["passbook", "config", "init", "--force"]).unwrap();
        assert_eq!(config_for(&cli.command, broken).unwrap(), Config::default());
    }

    #[test]
    fn test_other_commands_surface_broken_config() {
        let cli = Cli::try_parse_from(["passbook", "config", "show"]).unwrap();
        assert!(config_for(&cli.command, broken).is_err());

        let cli = Cli::try_parse_from(["passbook", "detect-bank", "statement.txt"]).unwrap();
        assert!(config_for(&cli.command, broken).is_err());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "passbook", "parse", "doc.json", "--by-bank", "--today", "2024-01-31",
        ])
        .unwrap();
        match cli.command {
            Command::Parse { input, by_bank, .. } => {
                assert!(by_bank);
                assert_eq!(input.today, NaiveDate::from_ymd_opt(2024, 1, 31));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
