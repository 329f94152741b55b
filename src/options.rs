//! Reader and writer configuration.

use crate::crc::Checksum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions {
    /// Fragment checksum algorithm. Must match between writer and reader.
    pub checksum: Checksum,

    /// Flush the sink after every fragment. When off, flushing is left to
    /// the caller.
    pub flush_each_fragment: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            checksum: Checksum::Ieee,
            flush_each_fragment: true,
        }
    }
}

impl LogOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn checksum(mut self, checksum: Checksum) -> Self {
        self.checksum = checksum;
        self
    }

    #[must_use]
    pub const fn flush_each_fragment(mut self, value: bool) -> Self {
        self.flush_each_fragment = value;
        self
    }
}
