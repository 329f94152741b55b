//! Errors surfaced by the log reader and writer.

use std::io;
use thiserror::Error;

use crate::wal_format::RecordType;

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, Error)]
pub enum LogError {
    /// The source ended before a full fragment header could be read.
    #[error("could not read record header: log truncated")]
    HeaderTruncated,

    /// The source ended inside a fragment's payload.
    #[error("could not read record body: log truncated inside a {length}-byte fragment")]
    BodyTruncated {
        /// Payload length announced by the header.
        length: u16,
    },

    /// Stored and recomputed fragment checksums differ.
    #[error("failed checksum for record fragment: {expected:08x} != {actual:08x}")]
    ChecksumMismatch {
        /// Checksum stored in the header.
        expected: u32,
        /// Checksum computed over the bytes read.
        actual: u32,
    },

    /// A fragment type that cannot follow the previous one.
    #[error("unexpected fragment sequence: {curr} after {prev}")]
    FragmentSequenceMismatch { prev: RecordType, curr: RecordType },

    /// A type byte outside the known fragment types.
    #[error("unknown record type {0}")]
    UnknownRecordType(u8),

    /// A previous write hit a sink error; the writer's position is no
    /// longer trustworthy.
    #[error("writer is unusable after an earlier write failure")]
    WriterFailed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LogError {
    /// True for the errors a replaying caller may treat as the end of the log.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::HeaderTruncated | Self::BodyTruncated { .. })
    }

    /// True for the errors that mean the stored bytes are damaged.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::ChecksumMismatch { .. }
                | Self::FragmentSequenceMismatch { .. }
                | Self::UnknownRecordType(_)
        )
    }
}
