//! In-memory sinks and sources for tests.

use std::io::{self, Read, Seek, SeekFrom, Write};

/// An in-memory log segment that tolerates exactly one seek.
///
/// The seek is recorded but does not move anything: the buffer behaves like
/// an append handle already positioned at the requested offset, so written
/// bytes start at index 0 and reads start at index 0.
#[derive(Debug, Default)]
pub struct SeekOnceBuffer {
    data: Vec<u8>,
    read_pos: usize,
    seeked: bool,
    pub flushes: usize,
}

impl SeekOnceBuffer {
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for SeekOnceBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            data,
            read_pos: 0,
            seeked: false,
            flushes: 0,
        }
    }
}

impl Seek for SeekOnceBuffer {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        assert!(!self.seeked, "should be seeked only once, but was seeked again");
        self.seeked = true;
        match pos {
            SeekFrom::Start(offset) => Ok(offset),
            _ => panic!("only absolute seeks are expected"),
        }
    }
}

impl Write for SeekOnceBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

impl Read for SeekOnceBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let rest = &self.data[self.read_pos..];
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.read_pos += n;
        Ok(n)
    }
}

/// Reports every write as successful but keeps only the first `keep` bytes,
/// leaving behind a log cut off mid-write.
#[derive(Debug)]
pub struct DiscardAfter {
    pub inner: SeekOnceBuffer,
    keep: usize,
}

impl DiscardAfter {
    pub fn new(keep: usize) -> Self {
        Self {
            inner: SeekOnceBuffer::default(),
            keep,
        }
    }
}

impl Seek for DiscardAfter {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl Write for DiscardAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(self.keep);
        self.inner.write_all(&buf[..n])?;
        self.keep -= n;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Accepts `budget` bytes, then fails every write.
#[derive(Debug)]
pub struct FailAfter {
    pub inner: SeekOnceBuffer,
    budget: usize,
    pub write_calls: usize,
}

impl FailAfter {
    pub fn new(budget: usize) -> Self {
        Self {
            inner: SeekOnceBuffer::default(),
            budget,
            write_calls: 0,
        }
    }
}

impl Seek for FailAfter {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_calls += 1;
        if self.budget == 0 {
            return Err(io::Error::other("sink is full"));
        }
        let n = buf.len().min(self.budget);
        self.inner.write_all(&buf[..n])?;
        self.budget -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
