//! Command-line interface for the surplus allocation calculator.

use crate::config::{CONFIG_PATH_ENV, OutputFormat, SurplusConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use surplus_calculator::{AllocationCalculator, AllocationResult, BatchSummary, Transaction};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "surplus")]
#[command(about = "Opt-in allocation on revenue above a threshold")]
#[command(version)]
pub struct SurplusCli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to surplus.toml when present)
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// Output format, overriding the configured one
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Reject negative or non-finite revenue
    #[arg(long, global = true)]
    pub strict: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the reference scenarios with the default threshold
    Demo,

    /// Compute the allocation for a single revenue figure
    Compute {
        /// Total revenue in euros
        #[arg(allow_negative_numbers = true)]
        revenue: f64,

        /// The user opted in to the allocation
        #[arg(long)]
        opted_in: bool,

        /// Threshold in euros, overriding the configured one
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<f64>,
    },

    /// Sum a JSON array of transactions and compute one allocation
    Batch {
        /// File holding `[{"amount": 3000}, ...]`, or `-` for stdin
        input: PathBuf,

        /// The user opted in to the allocation
        #[arg(long)]
        opted_in: bool,

        /// Threshold in euros, overriding the configured one
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<f64>,
    },
}

#[derive(Serialize)]
struct DemoEntry<'a> {
    title: &'a str,
    result: AllocationResult,
}

const DEMO_SCENARIOS: [(&str, f64, bool); 3] = [
    ("Example 1: Opted In, €10,000 revenue", 10_000.0, true),
    ("Example 2: Opted Out, €10,000 revenue", 10_000.0, false),
    ("Example 3: Opted In, €5,000 revenue (below threshold)", 5_000.0, true),
];

impl SurplusCli {
    /// Loads configuration from the file and environment, then runs the command.
    pub fn execute<W: Write>(&self, out: &mut W) -> Result<()> {
        let config = SurplusConfig::load(self.config.as_deref()).context("loading configuration")?;
        self.execute_with_config(config, out)
    }

    /// Runs the command against an already loaded configuration, reading
    /// `batch -` input from stdin.
    pub fn execute_with_config<W: Write>(&self, config: SurplusConfig, out: &mut W) -> Result<()> {
        self.execute_with_io(config, &mut io::stdin().lock(), out)
    }

    /// Runs the command with `input` standing in for stdin.
    pub fn execute_with_io<R: Read, W: Write>(
        &self,
        mut config: SurplusConfig,
        input: &mut R,
        out: &mut W,
    ) -> Result<()> {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.strict {
            config.calculator.strict = true;
        }
        match &self.command {
            Command::Compute { threshold: Some(threshold), .. }
            | Command::Batch { threshold: Some(threshold), .. } => {
                config.calculator.threshold = *threshold;
            }
            _ => {}
        }
        debug!(?config, "effective configuration");

        let calculator = config.calculator().context("invalid calculator configuration")?;
        let format = config.output.format;
        let strict = config.calculator.strict;

        match &self.command {
            // Scenario titles describe the default threshold.
            Command::Demo => run_demo(&AllocationCalculator::default(), format, out),
            Command::Compute { revenue, opted_in, .. } => {
                let result = if strict {
                    calculator.try_compute(*revenue, *opted_in)?
                } else {
                    calculator.compute(*revenue, *opted_in)
                };
                info!(revenue, opted_in, allocation = result.allocation(), "allocation computed");
                match format {
                    OutputFormat::Text => write!(out, "{}", calculator.render(&result))?,
                    OutputFormat::Json => write_json(out, &result)?,
                }
                Ok(())
            }
            Command::Batch { input: source, opted_in, .. } => {
                let transactions = read_transactions(source, input)?;
                let summary: BatchSummary = if strict {
                    calculator.try_compute_batch(&transactions, *opted_in)?
                } else {
                    calculator.compute_batch(&transactions, *opted_in)
                };
                info!(
                    transactions = summary.transaction_count(),
                    total_revenue = summary.total_revenue(),
                    allocation = summary.total_allocation(),
                    "batch computed"
                );
                match format {
                    OutputFormat::Text => write!(out, "{}", summary.report())?,
                    OutputFormat::Json => write_json(out, &summary)?,
                }
                Ok(())
            }
        }
    }
}

fn run_demo<W: Write>(calculator: &AllocationCalculator, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (index, (title, revenue, opted_in)) in DEMO_SCENARIOS.iter().enumerate() {
                if index > 0 {
                    writeln!(out)?;
                }
                let result = calculator.compute(*revenue, *opted_in);
                writeln!(out, "{title}")?;
                writeln!(out, "{}", "-".repeat(40))?;
                writeln!(out, "{}", calculator.render(&result))?;
            }
        }
        OutputFormat::Json => {
            let entries: Vec<DemoEntry<'_>> = DEMO_SCENARIOS
                .iter()
                .map(|(title, revenue, opted_in)| DemoEntry {
                    title: *title,
                    result: calculator.compute(*revenue, *opted_in),
                })
                .collect();
            write_json(out, &entries)?;
        }
    }
    Ok(())
}

fn read_transactions<R: Read>(source: &Path, stdin: &mut R) -> Result<Vec<Transaction>> {
    let contents = if source.as_os_str() == "-" {
        let mut buffer = String::new();
        stdin.read_to_string(&mut buffer).context("reading transactions from stdin")?;
        buffer
    } else {
        fs::read_to_string(source)
            .with_context(|| format!("reading transactions from '{}'", source.display()))?
    };
    let transactions: Vec<Transaction> =
        serde_json::from_str(&contents).context("parsing transactions as a JSON array")?;
    debug!(count = transactions.len(), "read transactions");
    Ok(transactions)
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
