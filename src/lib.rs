//! Record framing for an append-only write-ahead log.
//!
//! User records are split into checksummed fragments laid out in fixed 32KB
//! blocks (the LevelDB log layout), and reassembled on the way back:
//!
//! ```no_run
//! use blocklog::{Reader, Writer};
//! use std::fs::OpenOptions;
//!
//! # fn main() -> blocklog::Result<()> {
//! let file = OpenOptions::new().create(true).read(true).write(true).open("000001.log")?;
//! let len = file.metadata()?.len();
//! let mut writer = Writer::new(file, len)?;
//! writer.write(b"put k1 v1")?;
//!
//! let mut reader = Reader::new(writer.into_inner(), len)?;
//! assert_eq!(reader.read_record()?, b"put k1 v1");
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod crc;
pub mod error;
pub mod options;
pub mod sequence;
pub mod wal_format;
pub mod wal_reader;
pub mod wal_writer;

#[cfg(test)]
mod testutil;

pub use crc::Checksum;
pub use error::{LogError, Result};
pub use options::LogOptions;
pub use wal_format::{RecordHeader, RecordType, BLOCK_SIZE, HEADER_SIZE};
pub use wal_reader::Reader;
pub use wal_writer::Writer;
