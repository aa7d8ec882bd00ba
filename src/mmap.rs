//! Read-only memory map of a whole file.

use std::fs::File;
use std::io;
use std::ops::Deref;
use std::os::fd::AsRawFd;
use std::path::Path;
use std::ptr;

#[cfg(target_os = "linux")]
const MAP_POPULATE: libc::c_int = libc::MAP_POPULATE;

#[cfg(not(target_os = "linux"))]
const MAP_POPULATE: libc::c_int = 0;

pub struct Mmap {
    ptr: *mut libc::c_void,
    len: usize,
    _file: File,
}

impl Mmap {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Mmap> {
        let file = File::open(path)?;
        let len = map_len(file.metadata()?.len())?;
        // mmap rejects zero-length mappings
        if len == 0 {
            return Ok(Mmap { ptr: ptr::null_mut(), len, _file: file });
        }

        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ,
                libc::MAP_PRIVATE | MAP_POPULATE,
                file.as_raw_fd(),
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }
        let map = Mmap { ptr, len, _file: file };
        map.advise(libc::MADV_SEQUENTIAL)?;
        map.advise(libc::MADV_WILLNEED)?;
        Ok(map)
    }

    fn advise(&self, advice: libc::c_int) -> io::Result<()> {
        if unsafe { libc::madvise(self.ptr, self.len, advice) } == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

fn map_len(len: u64) -> io::Result<usize> {
    usize::try_from(len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "file too large to map"))
}

impl Deref for Mmap {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        if self.len == 0 {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.ptr as *const u8, self.len) }
    }
}

impl Drop for Mmap {
    fn drop(&mut self) {
        if self.len != 0 {
            unsafe { libc::munmap(self.ptr, self.len) };
        }
    }
}
