use crate::block::BlockSource;
use crate::crc::Checksum;
use crate::error::{LogError, Result};
use crate::options::LogOptions;
use crate::sequence::next_is_expected;
use crate::wal_format::*;

use std::io::{self, Read, Seek, Write};

use tracing::{debug, trace, warn};

/// Reassembles user records from a fragment stream.
///
/// Each `read` call returns exactly one user record. Any damage (bad
/// checksum, unknown type, broken fragment sequence) or early end of the
/// source fails the call; the reader never skips ahead to resynchronize.
pub struct Reader<R: Read> {
    src: BlockSource<R>,
    checksum: Checksum,
    // Scratch for one fragment body. Sized for any length a header can
    // announce, so a corrupt length reaches the checksum check.
    buf: Vec<u8>,
}

impl<R: Read + Seek> Reader<R> {
    /// Binds a reader to `src`, positioned at byte `offset` of the log.
    pub fn new(src: R, offset: u64) -> Result<Self> {
        Self::with_options(src, offset, LogOptions::default())
    }

    pub fn with_options(src: R, offset: u64, opts: LogOptions) -> Result<Self> {
        let src = BlockSource::new(src, offset)?;
        debug!(offset, block_offset = src.block_offset(), "opened log reader");
        Ok(Self {
            src,
            checksum: opts.checksum,
            buf: vec![0u8; u16::MAX as usize],
        })
    }
}

impl<R: Read> Reader<R> {
    /// Reads the next user record, streaming its bytes into `out` one
    /// fragment at a time. Returns the record length.
    ///
    /// On failure, fragments already validated have been written to `out`.
    pub fn read<O: Write + ?Sized>(&mut self, out: &mut O) -> Result<usize> {
        self.src
            .skip_end_of_block_trailer()
            .map_err(|e| truncated(e, LogError::HeaderTruncated))?;

        let mut n = 0;
        let mut prev = RecordType::None;
        loop {
            let mut raw = [0u8; HEADER_SIZE];
            self.src
                .read_exact(&mut raw)
                .map_err(|e| truncated(e, LogError::HeaderTruncated))?;
            let header = RecordHeader::from_bytes(raw);

            let length = header.length();
            let body = &mut self.buf[..length as usize];
            self.src
                .read_exact(body)
                .map_err(|e| truncated(e, LogError::BodyTruncated { length }))?;

            let actual = self.checksum.fragment(header.type_byte(), body);
            if actual != header.checksum() {
                warn!(
                    expected = header.checksum(),
                    actual,
                    length,
                    "checksum mismatch in log fragment"
                );
                return Err(LogError::ChecksumMismatch {
                    expected: header.checksum(),
                    actual,
                });
            }

            let curr = match header.record_type() {
                Some(t) => t,
                None => {
                    warn!(type_byte = header.type_byte(), "unknown fragment type");
                    return Err(LogError::UnknownRecordType(header.type_byte()));
                }
            };
            let more = next_is_expected(prev, curr).inspect_err(|err| {
                warn!(error = %err, "illegal fragment sequence");
            })?;
            trace!(
                record_type = %curr,
                len = length,
                block_offset = self.src.block_offset(),
                "read fragment"
            );

            out.write_all(body)?;
            n += body.len();

            if !more {
                return Ok(n);
            }
            prev = curr;
        }
    }

    /// Reads the next user record into a fresh buffer.
    pub fn read_record(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.read(&mut out)?;
        Ok(out)
    }

    pub fn block_offset(&self) -> usize {
        self.src.block_offset()
    }

    pub fn into_inner(self) -> R {
        self.src.into_inner()
    }
}

fn truncated(err: io::Error, eof: LogError) -> LogError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        eof
    } else {
        LogError::Io(err)
    }
}
