//! Fragment checksums.
//!
//! The log format has historically been described as using CRC32C, while
//! existing logs were written with the IEEE CRC32. Both are available; a log
//! must be read with the same algorithm it was written with.

/// Checksum algorithm applied to every fragment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Checksum {
    /// IEEE 802.3 CRC32.
    #[default]
    Ieee,
    /// Castagnoli CRC32C.
    Castagnoli,
}

impl Checksum {
    /// Checksum of `type_byte ++ payload`, unmasked.
    pub fn fragment(self, type_byte: u8, payload: &[u8]) -> u32 {
        match self {
            Self::Ieee => {
                let mut hasher = crc32fast::Hasher::new();
                hasher.update(&[type_byte]);
                hasher.update(payload);
                hasher.finalize()
            }
            Self::Castagnoli => crc32c::extend(crc32c::value(&[type_byte]), payload),
        }
    }
}

pub mod crc32c {
    // Reflected polynomial for CRC32C (Castagnoli).
    // init = 0xFFFF_FFFF, process LSB-first, xorout = 0xFFFF_FFFF.
    const POLY_REFLECTED: u32 = 0x82F6_3B78;

    const TABLE: [u32; 256] = build_table();

    const fn build_table() -> [u32; 256] {
        let mut table = [0u32; 256];
        let mut i = 0;
        while i < 256 {
            let mut crc = i as u32;
            let mut bit = 0;
            while bit < 8 {
                let mask = (crc & 1).wrapping_neg() & POLY_REFLECTED;
                crc = (crc >> 1) ^ mask;
                bit += 1;
            }
            table[i] = crc;
            i += 1;
        }
        table
    }

    #[inline]
    fn update(mut crc: u32, data: &[u8]) -> u32 {
        for &b in data {
            crc = TABLE[((crc ^ b as u32) & 0xFF) as usize] ^ (crc >> 8);
        }
        crc
    }

    #[inline]
    pub fn value(data: &[u8]) -> u32 {
        update(0xFFFF_FFFF, data) ^ 0xFFFF_FFFF
    }

    // Extend a prior CRC with more bytes, i.e. crc(data0 || data1).
    #[inline]
    pub fn extend(initial_crc: u32, data: &[u8]) -> u32 {
        update(initial_crc ^ 0xFFFF_FFFF, data) ^ 0xFFFF_FFFF
    }
}
