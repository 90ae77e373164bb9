//! Byte extraction from bit-level debug logs
//!
//! Produces the raw byte sequence that the code section decoder consumes.
//! Two log shapes are understood:
//!
//! - `Reassembled byte: 00111010 (decimal: 58)` lines, taken in order
//! - `[byte position 17152] ... decimal: 58` records, filtered to a section
//!   and sorted by position

mod parser;
mod report;

pub use parser::{parse_decimal_list, parse_positioned, parse_reassembled};
pub use report::{parse_bitstream_report, write_bitstream_report};

/// Absolute position of the code section inside a cartridge image (0x4300).
pub const CODE_SECTION_START: u64 = 0x4300;

/// Bytes recovered from a log, with their binary spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteLog {
    /// 8-digit binary strings as written in the log.
    pub bits: Vec<String>,
    /// Byte values in log order.
    pub bytes: Vec<u8>,
}

impl ByteLog {
    /// Build a log from plain byte values.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bits: bytes.iter().map(|b| format!("{b:08b}")).collect(),
            bytes: bytes.to_vec(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// All binary strings joined into one continuous bitstream.
    #[must_use]
    pub fn bitstream(&self) -> String {
        self.bits.concat()
    }

    /// Byte values as a comma-separated decimal list.
    #[must_use]
    pub fn decimal_list(&self) -> String {
        self.bytes
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
