//! Block-position tracking around the log's byte sink and source.
//!
//! Both wrappers seek the underlying stream once, in their constructor, and
//! are strictly sequential afterwards. Neither exposes a seek, so a second
//! one cannot happen.

use std::io::{self, Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::wal_format::{BLOCK_SIZE, HEADER_SIZE};

#[inline]
fn offset_in_block(offset: u64) -> usize {
    (offset % BLOCK_SIZE as u64) as usize
}

pub struct BlockSink<W: Write> {
    dest: W,
    block_offset: usize,
    // Bytes handed to `dest` since the last `reset_written`.
    written: usize,
}

impl<W: Write + Seek> BlockSink<W> {
    /// Seeks `dest` to `offset` from its start and derives the block position.
    pub fn new(mut dest: W, offset: u64) -> io::Result<Self> {
        dest.seek(SeekFrom::Start(offset))?;
        Ok(Self {
            dest,
            block_offset: offset_in_block(offset),
            written: 0,
        })
    }
}

impl<W: Write> BlockSink<W> {
    /// Writes all of `bytes`. The block position advances even when the
    /// sink fails, since the sink may have taken part of the buffer.
    pub fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.written += bytes.len();
        self.advance(bytes.len());
        self.dest.write_all(bytes)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.dest.flush()
    }

    pub fn block_offset(&self) -> usize {
        self.block_offset
    }

    pub fn remaining_in_block(&self) -> usize {
        BLOCK_SIZE - self.block_offset
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn reset_written(&mut self) {
        self.written = 0;
    }

    pub fn get_ref(&self) -> &W {
        &self.dest
    }

    pub fn into_inner(self) -> W {
        self.dest
    }

    fn advance(&mut self, n: usize) {
        self.block_offset = (self.block_offset + n) % BLOCK_SIZE;
    }
}

pub struct BlockSource<R: Read> {
    src: R,
    block_offset: usize,
}

impl<R: Read + Seek> BlockSource<R> {
    /// Seeks `src` to `offset` from its start and derives the block position.
    pub fn new(mut src: R, offset: u64) -> io::Result<Self> {
        src.seek(SeekFrom::Start(offset))?;
        Ok(Self {
            src,
            block_offset: offset_in_block(offset),
        })
    }
}

impl<R: Read> BlockSource<R> {
    /// Fills `buf` completely or fails with `UnexpectedEof`. The block
    /// position only moves on success.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.src.read_exact(buf)?;
        self.block_offset = (self.block_offset + buf.len()) % BLOCK_SIZE;
        Ok(())
    }

    /// Consumes the zero trailer when too few bytes are left in the block
    /// for a header. Returns the number of bytes skipped.
    pub fn skip_end_of_block_trailer(&mut self) -> io::Result<usize> {
        let remaining = BLOCK_SIZE - self.block_offset;
        if remaining >= HEADER_SIZE {
            return Ok(0);
        }
        let mut trailer = [0u8; HEADER_SIZE - 1];
        self.read_exact(&mut trailer[..remaining])?;
        debug!(skipped = remaining, "skipped end-of-block trailer");
        Ok(remaining)
    }

    pub fn block_offset(&self) -> usize {
        self.block_offset
    }

    pub fn into_inner(self) -> R {
        self.src
    }
}
