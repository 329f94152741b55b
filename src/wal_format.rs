//! Log format shared by the reader and the writer.
//!
//! A log is a sequence of 32KB blocks; the tail of the log may hold a partial
//! block. Each block holds a sequence of fragments, optionally followed by a
//! zero-filled trailer when fewer than [`HEADER_SIZE`] bytes are left:
//!
//! ```text
//! block    := fragment* trailer?
//! fragment := checksum: u32 (LE) | length: u16 (LE) | type: u8 | data: [u8; length]
//! ```
//!
//! The checksum covers the type byte followed by the fragment data.

use std::fmt;

pub const BLOCK_SIZE: usize = 32 * 1024;
pub const HEADER_SIZE: usize = 4 + 2 + 1; // checksum(4) + length(2) + type(1)

/// Largest payload a single fragment can carry: a whole block minus its header.
pub const MAX_FRAGMENT_LEN: usize = BLOCK_SIZE - HEADER_SIZE;

const CHECKSUM_AT: usize = 0;
const LENGTH_AT: usize = 4;
const TYPE_AT: usize = 6;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// Nothing seen yet. Start state of the sequence check, never written.
    None = 0,
    Full = 1,
    First = 2,
    Middle = 3,
    Last = 4,
}

impl RecordType {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Maps a type byte read from storage. `0` is rejected along with any
    /// other value outside the four live types, so the sentinel can never be
    /// produced from disk.
    pub const fn from_wire(b: u8) -> Option<Self> {
        match b {
            1 => Some(Self::Full),
            2 => Some(Self::First),
            3 => Some(Self::Middle),
            4 => Some(Self::Last),
            _ => None,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Full => "FULL",
            Self::First => "FIRST",
            Self::Middle => "MIDDLE",
            Self::Last => "LAST",
        };
        f.write_str(name)
    }
}

/// The 7-byte fragment header.
///
/// Held by value; callers get copies of the encoded bytes, never a view
/// into a buffer shared between fragments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RecordHeader([u8; HEADER_SIZE]);

impl RecordHeader {
    pub fn new(checksum: u32, length: u16, record_type: RecordType) -> Self {
        let mut h = Self::default();
        h.set_checksum(checksum);
        h.set_length(length);
        h.set_record_type(record_type);
        h
    }

    pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        self.0
    }

    pub fn checksum(&self) -> u32 {
        let mut b = [0u8; 4];
        b.copy_from_slice(&self.0[CHECKSUM_AT..LENGTH_AT]);
        u32::from_le_bytes(b)
    }

    pub fn set_checksum(&mut self, checksum: u32) {
        self.0[CHECKSUM_AT..LENGTH_AT].copy_from_slice(&checksum.to_le_bytes());
    }

    pub fn length(&self) -> u16 {
        u16::from_le_bytes([self.0[LENGTH_AT], self.0[LENGTH_AT + 1]])
    }

    pub fn set_length(&mut self, length: u16) {
        self.0[LENGTH_AT..TYPE_AT].copy_from_slice(&length.to_le_bytes());
    }

    /// Raw type byte, unvalidated. This is the byte the checksum covers.
    pub fn type_byte(&self) -> u8 {
        self.0[TYPE_AT]
    }

    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_wire(self.type_byte())
    }

    pub fn set_record_type(&mut self, record_type: RecordType) {
        self.0[TYPE_AT] = record_type.as_u8();
    }
}
