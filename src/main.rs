use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use qcount::prelude::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Estimate how many of the comma separated indices read from standard input are marked,
/// using quantum counting, and print the relative error of the estimate in percent.
#[derive(Parser, Debug)]
#[command(name = "qcount", version, about)]
struct Cli {
    /// Width of the searched register, the space holds 2^t elements.
    #[arg(long, default_value_t = 4)]
    target_qubits: usize,

    /// Width of the phase estimation register.
    #[arg(long, default_value_t = 4)]
    estimation_qubits: usize,

    /// Reject out of range and repeated indices instead of tolerating them.
    #[arg(long)]
    strict: bool,

    /// Take the peak from this many sampled measurements instead of exact probabilities.
    #[arg(long)]
    shots: Option<usize>,

    /// Seed for sampled measurements.
    #[arg(long, requires = "shots")]
    seed: Option<u64>,

    /// Log more to standard error (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> CountingConfig {
        CountingConfig {
            target_qubits: self.target_qubits,
            estimation_qubits: self.estimation_qubits,
            index_policy: if self.strict {
                IndexPolicy::Strict
            } else {
                IndexPolicy::Tolerant
            },
            shots: self.shots,
            seed: self.seed,
            ..Default::default()
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read standard input")?;
    let marked = parse_marked_indices(&input)?;
    debug!(?marked, "parsed marked indices");

    let counter = QuantumCounter::<f64>::new(cli.config())?;
    let relative_error = counter
        .relative_error(&marked)
        .context("quantum counting failed")?;
    println!("{:?}", relative_error);
    Ok(())
}
