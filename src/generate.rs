//! Random integer file generator.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::interrupt;

pub const DEFAULT_OUTPUT: &str = "input.txt";
pub const DEFAULT_SIZE_THRESHOLD: u64 = 4 * 1024 * 1024 * 1024; // 4 Gb
pub const DEFAULT_UPPER_BOUND: u128 = 10_000_000_000_000_000_000_000_000_000;
pub const DEFAULT_CHECK_INTERVAL: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub output: PathBuf,
    /// Generation stops once the file is at least this many bytes.
    pub size_threshold: u64,
    /// Exclusive upper bound of every sample. Zero yields only zeros.
    pub upper_bound: u128,
    /// Lines written between size checks. Zero behaves like one.
    pub check_interval: u64,
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output: PathBuf::from(DEFAULT_OUTPUT),
            size_threshold: DEFAULT_SIZE_THRESHOLD,
            upper_bound: DEFAULT_UPPER_BOUND,
            check_interval: DEFAULT_CHECK_INTERVAL,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub lines: u64,
    /// File size seen at the last check.
    pub bytes: u64,
    pub interrupted: bool,
}

/// Draws one integer uniformly from `[0, upper_bound)`.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, upper_bound: u128) -> u128 {
    if upper_bound == 0 {
        return 0;
    }
    rng.gen_range(0..upper_bound)
}

/// Truncates `config.output` and writes random lines into it until it is big enough.
pub fn run(config: &GeneratorConfig) -> io::Result<Summary> {
    let file = File::create(&config.output)?;
    info!(
        "writing {} until {} bytes (bound {}, check every {} lines)",
        config.output.display(),
        config.size_threshold,
        config.upper_bound,
        config.check_interval
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    write_numbers(&mut rng, file, config, interrupt::flag())
}

/// The generation loop proper. `file` must already be open for writing and
/// empty; it is flushed and closed before returning.
///
/// `stop` is polled at every size check, alongside the threshold.
pub fn write_numbers<R: Rng + ?Sized>(
    rng: &mut R,
    file: File,
    config: &GeneratorConfig,
    stop: &AtomicBool,
) -> io::Result<Summary> {
    let interval = config.check_interval.max(1);
    let mut writer = BufWriter::new(file);
    let mut lines: u64 = 0;

    let summary = loop {
        let num = sample(rng, config.upper_bound);
        writeln!(writer, "{}", num)?;
        lines += 1;

        if lines % interval != 0 {
            continue;
        }

        // stat only sees what has reached the file
        writer.flush()?;
        let bytes = writer.get_ref().metadata()?.len();
        debug!("{} lines, {} bytes", lines, bytes);

        if bytes >= config.size_threshold {
            break Summary { lines, bytes, interrupted: false };
        }
        if stop.load(Ordering::Relaxed) {
            warn!("interrupted after {} lines, {} bytes", lines, bytes);
            break Summary { lines, bytes, interrupted: true };
        }
    };

    writer.into_inner().map_err(|e| e.into_error())?;
    info!("wrote {} lines, {} bytes", summary.lines, summary.bytes);
    Ok(summary)
}
