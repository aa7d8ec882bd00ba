use anyhow::Context;
use clap::Parser;
use numfile::generate::{self, GeneratorConfig};
use numfile::interrupt;
use std::path::PathBuf;

/// Fill a file with random integers, one per line, until it reaches a size.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long, default_value = generate::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Stop once the file holds at least this many bytes.
    #[arg(long, default_value_t = generate::DEFAULT_SIZE_THRESHOLD)]
    size_threshold: u64,

    /// Exclusive upper bound of each integer.
    #[arg(long, default_value_t = generate::DEFAULT_UPPER_BOUND)]
    upper_bound: u128,

    /// Lines written between file size checks.
    #[arg(long, default_value_t = generate::DEFAULT_CHECK_INTERVAL,
          value_parser = clap::value_parser!(u64).range(1..))]
    check_interval: u64,

    /// Seed for a reproducible sequence.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    interrupt::install().context("installing signal handlers")?;

    let config = GeneratorConfig {
        output: cli.output,
        size_threshold: cli.size_threshold,
        upper_bound: cli.upper_bound,
        check_interval: cli.check_interval,
        seed: cli.seed,
    };
    let summary = generate::run(&config)
        .with_context(|| format!("generating {}", config.output.display()))?;

    if summary.interrupted {
        anyhow::bail!("interrupted at {} bytes", summary.bytes);
    }
    println!("done...");
    Ok(())
}
