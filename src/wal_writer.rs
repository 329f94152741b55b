use crate::block::BlockSink;
use crate::crc::Checksum;
use crate::error::{LogError, Result};
use crate::options::LogOptions;
use crate::wal_format::*;

use std::io::{self, Seek, Write};

use tracing::{debug, trace, warn};

const TRAILER_ZEROS: [u8; HEADER_SIZE - 1] = [0; HEADER_SIZE - 1];

/// Splits user records into checksummed, block-aligned fragments.
///
/// One writer owns one sink. Its block position carries over between
/// `write` calls, so records must be written through the same instance in
/// order.
pub struct Writer<W: Write> {
    dest: BlockSink<W>,
    checksum: Checksum,
    flush_each_fragment: bool,
    failed: bool,
}

impl<W: Write + Seek> Writer<W> {
    /// Binds a writer to `dest`, which already holds `offset` bytes of log.
    /// A brand-new log starts at offset 0.
    pub fn new(dest: W, offset: u64) -> Result<Self> {
        Self::with_options(dest, offset, LogOptions::default())
    }

    pub fn with_options(dest: W, offset: u64, opts: LogOptions) -> Result<Self> {
        let dest = BlockSink::new(dest, offset)?;
        debug!(offset, block_offset = dest.block_offset(), "opened log writer");
        Ok(Self {
            dest,
            checksum: opts.checksum,
            flush_each_fragment: opts.flush_each_fragment,
            failed: false,
        })
    }
}

impl<W: Write> Writer<W> {
    /// Appends one user record.
    ///
    /// Returns every byte put on the wire for it: fragment headers and any
    /// trailer padding included, so never less than `payload.len()`. On a
    /// sink error nothing more is written, the writer refuses further
    /// records, and [`Writer::last_write_len`] tells how far it got.
    pub fn write(&mut self, payload: &[u8]) -> Result<usize> {
        if self.failed {
            return Err(LogError::WriterFailed);
        }
        self.dest.reset_written();
        if let Err(err) = self.add_record(payload) {
            self.failed = true;
            warn!(
                written = self.dest.written(),
                error = %err,
                "log sink failed; writer is no longer usable"
            );
            return Err(err.into());
        }
        Ok(self.dest.written())
    }

    fn add_record(&mut self, mut data: &[u8]) -> io::Result<()> {
        let mut begin = true;

        loop {
            let leftover = self.dest.remaining_in_block();
            if leftover < HEADER_SIZE {
                // pad trailer with zeros
                self.dest.write(&TRAILER_ZEROS[..leftover])?;
                debug!(padded = leftover, "padded end-of-block trailer");
            }

            // Exactly HEADER_SIZE left gives avail == 0: a non-empty record
            // then starts with an empty FIRST fragment.
            let avail = self.dest.remaining_in_block() - HEADER_SIZE;
            let frag_len = data.len().min(avail);
            let end = frag_len == data.len();

            let typ = match (begin, end) {
                (true, true) => RecordType::Full,
                (true, false) => RecordType::First,
                (false, true) => RecordType::Last,
                (false, false) => RecordType::Middle,
            };

            self.emit_physical_record(typ, &data[..frag_len])?;
            data = &data[frag_len..];
            begin = false;

            if end {
                break;
            }
        }
        Ok(())
    }

    fn emit_physical_record(&mut self, t: RecordType, payload: &[u8]) -> io::Result<()> {
        let n = payload.len();
        debug_assert!(n <= MAX_FRAGMENT_LEN);
        debug_assert!(self.dest.block_offset() + HEADER_SIZE + n <= BLOCK_SIZE);

        let crc = self.checksum.fragment(t.as_u8(), payload);
        let header = RecordHeader::new(crc, n as u16, t);
        trace!(
            record_type = %t,
            len = n,
            block_offset = self.dest.block_offset(),
            "emitting fragment"
        );

        self.dest.write(&header.to_bytes())?;
        self.dest.write(payload)?;
        if self.flush_each_fragment {
            self.dest.flush()?;
        }
        Ok(())
    }

    /// Bytes handed to the sink by the most recent `write`, including one
    /// that failed part way.
    pub fn last_write_len(&self) -> usize {
        self.dest.written()
    }

    pub fn block_offset(&self) -> usize {
        self.dest.block_offset()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.dest.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        self.dest.get_ref()
    }

    pub fn into_inner(self) -> W {
        self.dest.into_inner()
    }
}
