use anyhow::Context;
use clap::Parser;
use numfile::sort::{self, SortConfig};
use std::path::PathBuf;

/// Sort a file of non-negative integers, one per line, in bounded memory.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long, default_value = sort::DEFAULT_INPUT)]
    input: PathBuf,

    #[arg(short, long, default_value = sort::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Directory for sorted chunks.
    #[arg(long, default_value = sort::DEFAULT_CHUNK_DIR)]
    chunk_dir: PathBuf,

    /// Input bytes sorted in memory at once.
    #[arg(long, default_value_t = sort::DEFAULT_CHUNK_BYTES,
          value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    chunk_bytes: usize,

    /// Leave chunk files in place after merging.
    #[arg(long)]
    keep_chunks: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    println!("sorting started...");
    let config = SortConfig {
        input: cli.input,
        output: cli.output,
        chunk_dir: cli.chunk_dir,
        chunk_bytes: cli.chunk_bytes,
        keep_chunks: cli.keep_chunks,
    };
    let summary = sort::sort_file(&config)
        .with_context(|| format!("sorting {}", config.input.display()))?;

    eprintln!("{} lines, {} chunks", summary.lines, summary.chunks);
    println!("sorting finished...");
    Ok(())
}
