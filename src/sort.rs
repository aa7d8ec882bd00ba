//! External sort of a file of decimal integers.
//!
//! The input is cut into chunks of bounded size, each chunk is sorted in
//! memory and written to `chunk_dir`, then every chunk is merged into the
//! output with a heap. Lines compare by length first and by bytes second,
//! which is numeric order for non-negative integers without leading zeros.

use log::{debug, info};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::mmap::Mmap;

pub const DEFAULT_INPUT: &str = "input.txt";
pub const DEFAULT_OUTPUT: &str = "output.txt";
pub const DEFAULT_CHUNK_DIR: &str = "chunk";
pub const DEFAULT_CHUNK_BYTES: usize = 256 * 1024 * 1024; // 256 Mb

#[derive(Debug, Clone)]
pub struct SortConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub chunk_dir: PathBuf,
    /// Upper bound on the input bytes sorted in memory at once. A single
    /// longer line still becomes its own chunk.
    pub chunk_bytes: usize,
    pub keep_chunks: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            chunk_dir: PathBuf::from(DEFAULT_CHUNK_DIR),
            chunk_bytes: DEFAULT_CHUNK_BYTES,
            keep_chunks: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSummary {
    pub chunks: usize,
    pub lines: u64,
}

pub fn compare_lines(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Length of the first chunk of `buf`: the longest prefix of at most `limit`
/// bytes that ends on a newline, or the first whole line if none fits.
pub fn chunk_len(buf: &[u8], limit: usize) -> usize {
    let limit = limit.max(1);
    if buf.len() <= limit {
        return buf.len();
    }
    if let Some(i) = buf[..limit].iter().rposition(|&b| b == b'\n') {
        return i + 1;
    }
    match buf[limit..].iter().position(|&b| b == b'\n') {
        Some(i) => limit + i + 1,
        None => buf.len(),
    }
}

/// Lines of `chunk` without their terminators. A missing final newline is
/// tolerated.
pub fn split_lines(chunk: &[u8]) -> Vec<&[u8]> {
    let body = chunk.strip_suffix(b"\n").unwrap_or(chunk);
    if body.is_empty() {
        return Vec::new();
    }
    body.split(|&b| b == b'\n').collect()
}

pub fn sort_file(config: &SortConfig) -> io::Result<SortSummary> {
    info!("sorting {} into {}", config.input.display(), config.output.display());
    let input = Mmap::open(&config.input)?;
    fs::create_dir_all(&config.chunk_dir)?;

    let chunks = sort_chunks(&input, &config.chunk_dir, config.chunk_bytes)?;
    drop(input);

    let lines = merge_chunks(&chunks, &config.output)?;
    if !config.keep_chunks {
        for path in &chunks {
            fs::remove_file(path)?;
        }
    }

    info!("sorted {} lines from {} chunks", lines, chunks.len());
    Ok(SortSummary { chunks: chunks.len(), lines })
}

/// Sorts `input` chunk by chunk into numbered files under `dir`.
pub fn sort_chunks(mut input: &[u8], dir: &Path, chunk_bytes: usize) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    while !input.is_empty() {
        let chunk = paths.len();
        let len = chunk_len(input, chunk_bytes);
        let (head, rest) = input.split_at(len);
        input = rest;
        debug!("chunk {} read, {} bytes", chunk, len);

        let mut lines = split_lines(head);
        debug!("chunk {} parsed, {} lines", chunk, lines.len());

        lines.sort_unstable_by(|a, b| compare_lines(a, b));
        debug!("chunk {} sorted", chunk);

        let path = dir.join(chunk.to_string());
        save_chunk(&path, &lines)?;
        info!("chunk {} saved to {}", chunk, path.display());

        paths.push(path);
    }

    Ok(paths)
}

fn save_chunk(path: &Path, lines: &[&[u8]]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

struct Head {
    line: Vec<u8>,
    source: usize,
}

impl Ord for Head {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_lines(&self.line, &other.line).then(self.source.cmp(&other.source))
    }
}

impl PartialOrd for Head {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Head {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Head {}

fn next_line<R: BufRead>(reader: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    Ok(Some(line))
}

/// Merges sorted chunk files into `output`, returning the number of lines.
pub fn merge_chunks(chunks: &[PathBuf], output: &Path) -> io::Result<u64> {
    let mut readers = chunks
        .iter()
        .map(|path| File::open(path).map(BufReader::new))
        .collect::<io::Result<Vec<_>>>()?;
    let mut writer = BufWriter::new(File::create(output)?);

    let mut heap = BinaryHeap::with_capacity(readers.len());
    for (source, reader) in readers.iter_mut().enumerate() {
        if let Some(line) = next_line(reader)? {
            heap.push(Reverse(Head { line, source }));
        }
    }

    let mut lines: u64 = 0;
    while let Some(Reverse(head)) = heap.pop() {
        writer.write_all(&head.line)?;
        writer.write_all(b"\n")?;
        lines += 1;

        if let Some(line) = next_line(&mut readers[head.source])? {
            heap.push(Reverse(Head { line, source: head.source }));
        }
    }

    writer.flush()?;
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_order() {
        let mut lines: Vec<&[u8]> = vec![&b"100"[..], b"9", b"0", b"42", b"41"];
        lines.sort_by(|a, b| compare_lines(a, b));
        assert_eq!(lines, vec![&b"0"[..], b"9", b"41", b"42", b"100"]);
    }

    #[test]
    fn chunk_ends_on_newline() {
        assert_eq!(chunk_len(b"12\n34\n56\n", 7), 6);
        assert_eq!(chunk_len(b"12\n34\n56\n", 6), 6);
        assert_eq!(chunk_len(b"12\n34\n56\n", 100), 9);
    }

    #[test]
    fn oversized_line_is_own_chunk() {
        assert_eq!(chunk_len(b"123456\n7\n", 3), 7);
        assert_eq!(chunk_len(b"123456", 3), 6);
        assert_eq!(chunk_len(b"1\n", 0), 2);
    }

    #[test]
    fn split_without_trailing_newline() {
        assert_eq!(split_lines(b"1\n22\n3"), vec![&b"1"[..], b"22", b"3"]);
        assert_eq!(split_lines(b"1\n22\n"), vec![&b"1"[..], b"22"]);
        assert!(split_lines(b"").is_empty());
        assert!(split_lines(b"\n").is_empty());
    }

    #[test]
    fn next_line_strips_newline() {
        let mut reader = &b"7\n88"[..];
        assert_eq!(next_line(&mut reader).unwrap(), Some(b"7".to_vec()));
        assert_eq!(next_line(&mut reader).unwrap(), Some(b"88".to_vec()));
        assert_eq!(next_line(&mut reader).unwrap(), None);
    }
}
