//! `cadence` CLI — expand, validate, and preview recurring-event series
//! rules from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Expand a rule (stdin → stdout, one line per occurrence)
//! cat rule.json | cadence expand
//!
//! # Expand from file, JSON output, custom cutoff for unbounded rules
//! cadence expand -i rule.json --json --horizon 2025-06-30
//!
//! # Validate a rule file
//! cadence check -i rule.json
//!
//! # Show the next 5 occurrences on or after a date
//! cadence preview -i rule.json --from 2024-03-01 -n 5
//! ```
//!
//! Rules are JSON documents matching `cadence_engine::RuleParams`; parsing
//! one runs the full construction-time validation, so a structurally
//! invalid rule fails every subcommand with the validation message.

use anyhow::{Context, Result};
use cadence_engine::{default_horizon, expand, Occurrence, Pattern, SeriesRule};
use chrono::{Months, NaiveDate};
use clap::{Parser, Subcommand};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "cadence", version, about = "Recurring-event series expansion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a rule into dated occurrences
    Expand {
        /// Input rule file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Expansion cutoff (YYYY-MM-DD); defaults to the rule's end date,
        /// or one year past its start date when unbounded
        #[arg(long)]
        horizon: Option<String>,
        /// Emit the occurrence list as pretty-printed JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a rule file without expanding it
    Check {
        /// Input rule file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show the next N occurrences on or after a date
    Preview {
        /// Input rule file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Starting date (YYYY-MM-DD); defaults to the rule's start date
        #[arg(long)]
        from: Option<String>,
        /// Number of occurrences to show
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Expand {
            input,
            output,
            horizon,
            json,
        } => {
            let rule = read_rule(input.as_deref())?;
            let horizon = match horizon {
                Some(raw) => parse_date(&raw)?,
                None => default_horizon(&rule),
            };
            let occurrences = expand(&rule, horizon);

            let rendered = if json {
                serde_json::to_string_pretty(&occurrences)?
            } else {
                occurrences
                    .iter()
                    .map(format_occurrence)
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check { input } => {
            let rule = read_rule(input.as_deref())?;
            println!("rule ok: {}", describe(&rule));
        }
        Commands::Preview { input, from, count } => {
            let rule = read_rule(input.as_deref())?;
            let from = match from {
                Some(raw) => parse_date(&raw)?,
                None => rule.start_date(),
            };
            // For unbounded rules, look one year ahead of the preview date
            // so a late `--from` is not cut off by the start-anchored default.
            let horizon = rule.end_date().unwrap_or_else(|| {
                from.checked_add_months(Months::new(12))
                    .unwrap_or(NaiveDate::MAX)
            });

            for occ in expand(&rule, horizon)
                .iter()
                .filter(|occ| occ.date >= from)
                .take(count)
            {
                println!("{}", format_occurrence(occ));
            }
        }
    }

    Ok(())
}

/// One human-readable line per occurrence.
fn format_occurrence(occ: &Occurrence) -> String {
    let mut line = format!(
        "{}  {}",
        occ.date.format("%Y-%m-%d %a"),
        occ.payload.name
    );
    if !occ.payload.location.is_empty() {
        line.push_str(" @ ");
        line.push_str(&occ.payload.location);
    }
    if occ.payload.highlight {
        line.push_str("  [highlight]");
    }
    line
}

/// Short rule summary for `check` output.
fn describe(rule: &SeriesRule) -> String {
    match rule.pattern() {
        Pattern::Weekly => format!(
            "series {}, weekly on {}, every {} week(s), from {}",
            rule.series_id(),
            rule.weekday(),
            rule.interval(),
            rule.start_date()
        ),
        Pattern::Monthly => format!(
            "series {}, monthly, {}. {} of every {} month(s), from {}",
            rule.series_id(),
            rule.index_within_interval(),
            rule.weekday(),
            rule.interval(),
            rule.start_date()
        ),
    }
}

fn read_rule(path: Option<&str>) -> Result<SeriesRule> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse series rule")
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    raw.parse()
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
