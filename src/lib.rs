//! Tools for producing and sorting very large files of random integers.
//!
//! [`generate`] fills a text file with random decimal integers, one per line,
//! until the file reaches a size threshold. [`sort`] orders such a file by
//! numeric value using sorted chunks on disk and a k-way merge.

pub mod generate;
pub mod interrupt;
pub mod mmap;
pub mod sort;
