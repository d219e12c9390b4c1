//! Anonymous pipe: a fixed-capacity ring buffer with a mutex-and-condvar
//! pair for readers/writers to hand off to each other.

use crate::lib::error::{KernelError, KResult};
use crate::sync::condvar::Condvar;
use crate::sync::mutex::Mutex;
use crate::sync::waitqueue::Park;
use alloc::collections::VecDeque;

struct Inner {
    buffer: VecDeque<u8>,
    capacity: usize,
    readers: usize,
    writers: usize,
}

pub struct Pipe<P: Park> {
    state: Mutex<Inner, P>,
    not_empty: Condvar<P>,
    not_full: Condvar<P>,
}

impl<P: Park> Pipe<P> {
    /// `create(capacity)`: a ring buffer of size `max(capacity, 1)`.
    pub fn create(capacity: usize) -> Self {
        Self {
            state: Mutex::new(Inner {
                buffer: VecDeque::new(),
                capacity: capacity.max(1),
                readers: 0,
                writers: 0,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    pub fn open_read(&self, park: &P) {
        self.state.lock(park).readers += 1;
    }

    pub fn open_write(&self, park: &P) {
        self.state.lock(park).writers += 1;
    }

    /// `close(pipe, END)`: decrement the given endpoint and wake both
    /// condvars, since a reader closing can unblock a full writer and vice
    /// versa.
    pub fn close_read(&self, park: &P) {
        {
            let mut inner = self.state.lock(park);
            inner.readers = inner.readers.saturating_sub(1);
        }
        self.not_full.signal(park);
        self.not_empty.signal(park);
    }

    pub fn close_write(&self, park: &P) {
        {
            let mut inner = self.state.lock(park);
            inner.writers = inner.writers.saturating_sub(1);
        }
        self.not_full.signal(park);
        self.not_empty.signal(park);
    }

    /// Returns `Ok(0)` on clean EOF (no writers, buffer drained). Partial
    /// progress from a prior loop iteration is reported as success even if
    /// a later iteration is interrupted.
    pub fn read(&self, park: &P, buf: &mut [u8]) -> KResult<usize> {
        let mut inner = self.state.lock(park);
        let mut total = 0;
        loop {
            while !inner.buffer.is_empty() && total < buf.len() {
                buf[total] = inner.buffer.pop_front().unwrap();
                total += 1;
            }
            if total > 0 {
                drop(inner);
                self.not_full.signal(park);
                return Ok(total);
            }
            if inner.writers == 0 {
                return Ok(0);
            }
            self.not_full.signal(park);
            inner = self.not_empty.wait(inner, park);
        }
    }

    /// Zero readers makes a write fail with `BrokenPipe` immediately. An
    /// interrupted wait still reports success if any bytes were already
    /// transferred.
    pub fn write(&self, park: &P, buf: &[u8]) -> KResult<usize> {
        let mut inner = self.state.lock(park);
        if inner.readers == 0 {
            return Err(KernelError::BrokenPipe);
        }
        let mut total = 0;
        loop {
            while inner.buffer.len() < inner.capacity && total < buf.len() {
                inner.buffer.push_back(buf[total]);
                total += 1;
            }
            if total == buf.len() {
                drop(inner);
                self.not_empty.signal(park);
                return Ok(total);
            }
            if inner.readers == 0 {
                let transferred = total;
                self.not_empty.signal(park);
                return if transferred > 0 { Ok(transferred) } else { Err(KernelError::BrokenPipe) };
            }
            self.not_empty.signal(park);
            inner = self.not_full.wait(inner, park);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    struct FakePark {
        current: u32,
    }
    impl Park for FakePark {
        type Token = u32;
        fn current(&self) -> u32 {
            self.current
        }
        fn block(&self, _timeout_ns: Option<u64>) -> bool {
            true
        }
        fn wake(&self, _token: u32) {}
    }

    #[test]
    fn read_returns_eof_with_no_writers_and_empty_buffer() {
        let pipe: Pipe<FakePark> = Pipe::create(4);
        let park = FakePark { current: 1 };
        pipe.open_read(&park);
        let mut buf = [0u8; 4];
        assert_eq!(pipe.read(&park, &mut buf).unwrap(), 0);
    }

    #[test]
    fn write_with_zero_readers_is_broken_pipe() {
        let pipe: Pipe<FakePark> = Pipe::create(4);
        let park = FakePark { current: 1 };
        pipe.open_write(&park);
        assert_eq!(pipe.write(&park, b"hi"), Err(KernelError::BrokenPipe));
    }

    #[test]
    fn write_then_read_round_trips_data() {
        let pipe: Pipe<FakePark> = Pipe::create(8);
        let park = FakePark { current: 1 };
        pipe.open_read(&park);
        pipe.open_write(&park);
        assert_eq!(pipe.write(&park, b"hello").unwrap(), 5);
        let mut buf = [0u8; 5];
        assert_eq!(pipe.read(&park, &mut buf).unwrap(), 5);
        assert_eq!(&buf, b"hello");
    }

    #[test]
    fn closing_the_only_writer_then_reading_drains_then_eofs() {
        let pipe: Pipe<FakePark> = Pipe::create(8);
        let park = FakePark { current: 1 };
        pipe.open_read(&park);
        pipe.open_write(&park);
        pipe.write(&park, b"x").unwrap();
        pipe.close_write(&park);
        let mut buf = [0u8; 1];
        assert_eq!(pipe.read(&park, &mut buf).unwrap(), 1);
        assert_eq!(pipe.read(&park, &mut buf).unwrap(), 0);
    }
}
