#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT: AtomicUsize = AtomicUsize::new(0);

/// Scratch directory removed on drop.
pub struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    pub fn new(name: &str) -> Scratch {
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "numfile-{}-{}-{}",
            name,
            std::process::id(),
            n
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        Scratch { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

/// Every line of `path`, parsed. Panics on anything but `\n`-terminated decimals.
pub fn read_numbers(path: &Path) -> Vec<u128> {
    let text = fs::read_to_string(path).unwrap();
    if text.is_empty() {
        return Vec::new();
    }
    assert!(text.ends_with('\n'), "missing final newline");
    text[..text.len() - 1]
        .split('\n')
        .map(|line| {
            assert!(line.bytes().all(|b| b.is_ascii_digit()), "bad line {:?}", line);
            line.parse::<u128>().unwrap()
        })
        .collect()
}
