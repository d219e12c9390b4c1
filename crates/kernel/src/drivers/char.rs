//! Character devices exposed under `/dev`: the serial console and the
//! usual null/zero/random sinks and sources.

use crate::lib::error::Errno;
use crate::vfs::file::{File, FileOps};

/// `/dev/console` and `/dev/tty`, backed by the serial port.
pub struct ConsoleOps;

impl FileOps for ConsoleOps {
    fn read(&self, _file: &File, buf: &mut [u8]) -> Result<usize, Errno> {
        let mut n = 0;
        while n < buf.len() {
            match crate::arch::x86_64::serial::serial_read() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write(&self, _file: &File, buf: &[u8]) -> Result<usize, Errno> {
        crate::arch::x86_64::serial::serial_write(buf);
        Ok(buf.len())
    }
}

pub static CONSOLE_OPS: ConsoleOps = ConsoleOps;

/// `/dev/null`: discards writes, reads as EOF.
pub struct NullOps;

impl FileOps for NullOps {
    fn read(&self, _file: &File, _buf: &mut [u8]) -> Result<usize, Errno> {
        Ok(0)
    }

    fn write(&self, _file: &File, buf: &[u8]) -> Result<usize, Errno> {
        Ok(buf.len())
    }
}

pub static NULL_OPS: NullOps = NullOps;

/// `/dev/zero`: infinite zero bytes, discards writes.
pub struct ZeroOps;

impl FileOps for ZeroOps {
    fn read(&self, _file: &File, buf: &mut [u8]) -> Result<usize, Errno> {
        buf.fill(0);
        Ok(buf.len())
    }

    fn write(&self, _file: &File, buf: &[u8]) -> Result<usize, Errno> {
        Ok(buf.len())
    }
}

pub static ZERO_OPS: ZeroOps = ZeroOps;

/// `/dev/random` and `/dev/urandom`. Not cryptographically secure: a
/// splitmix64-style generator seeded from the TSC, good enough for the
/// stack canary / ASLR-less bring-up this kernel needs it for.
pub struct RandomOps;

impl RandomOps {
    fn next_u64() -> u64 {
        use core::sync::atomic::{AtomicU64, Ordering};
        static STATE: AtomicU64 = AtomicU64::new(0x9E3779B97F4A7C15);
        let seed = crate::arch::x86_64::tsc::read_tsc() ^ STATE.load(Ordering::Relaxed);
        let mut z = seed.wrapping_add(0x9E3779B97F4A7C15);
        STATE.store(z, Ordering::Relaxed);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl FileOps for RandomOps {
    fn read(&self, _file: &File, buf: &mut [u8]) -> Result<usize, Errno> {
        let mut i = 0;
        while i < buf.len() {
            let bytes = Self::next_u64().to_le_bytes();
            let n = bytes.len().min(buf.len() - i);
            buf[i..i + n].copy_from_slice(&bytes[..n]);
            i += n;
        }
        Ok(buf.len())
    }

    fn write(&self, _file: &File, buf: &[u8]) -> Result<usize, Errno> {
        Ok(buf.len())
    }
}

pub static RANDOM_OPS: RandomOps = RandomOps;
