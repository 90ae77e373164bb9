//! Code section header parsing
//!
//! Layout (8 bytes):
//! - bytes 0-3: marker `:c:\0`
//! - bytes 4-5: decompressed length, big-endian
//! - bytes 6-7: reserved, expected zero

use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};
use serde::{Deserialize, Serialize};

use super::{CODE_MARKER, HEADER_SIZE};
use crate::error::{Error, Result};

/// How strictly the header marker and reserved bytes are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderValidation {
    /// Mismatches are logged and recorded as warnings; decoding proceeds.
    #[default]
    Lenient,
    /// Mismatches are fatal.
    Strict,
}

/// Non-fatal problem noticed while parsing the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeaderWarning {
    /// Bytes 0-3 were not `:c:\0`.
    MarkerMismatch {
        /// The bytes actually found.
        found: [u8; 4],
    },
    /// Bytes 6-7 were not both zero.
    ReservedBytesNonzero {
        /// The bytes actually found.
        found: [u8; 2],
    },
}

/// Parsed view of the first 8 bytes of a code section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Marker bytes as found in the stream.
    pub marker_bytes: [u8; 4],
    /// Intended size of the decompressed code.
    pub declared_length: u16,
    /// Reserved bytes as found in the stream.
    pub reserved_bytes: [u8; 2],
    /// Whether the reserved bytes were both zero.
    pub reserved_valid: bool,
}

impl Header {
    /// Whether the marker matched `:c:\0`.
    #[must_use]
    pub fn marker_valid(&self) -> bool {
        self.marker_bytes == CODE_MARKER
    }

    /// Soft-validation warnings for this header, in byte order.
    #[must_use]
    pub fn warnings(&self) -> Vec<HeaderWarning> {
        let mut warnings = Vec::new();
        if !self.marker_valid() {
            warnings.push(HeaderWarning::MarkerMismatch {
                found: self.marker_bytes,
            });
        }
        if !self.reserved_valid {
            warnings.push(HeaderWarning::ReservedBytesNonzero {
                found: self.reserved_bytes,
            });
        }
        warnings
    }
}

/// Parse the 8-byte header at the start of `data`.
///
/// Returns the header and the offset of the first instruction, which is always
/// [`HEADER_SIZE`].
///
/// # Errors
///
/// Returns [`Error::HeaderTruncated`] if `data` holds fewer than 8 bytes.
/// In [`HeaderValidation::Strict`] mode, returns [`Error::MarkerMismatch`] or
/// [`Error::ReservedBytesNonzero`] when those checks fail.
pub fn parse_header(data: &[u8], validation: HeaderValidation) -> Result<(Header, usize)> {
    if data.len() < HEADER_SIZE {
        return Err(Error::HeaderTruncated { len: data.len() });
    }

    let mut cursor = Cursor::new(&data[..HEADER_SIZE]);

    let mut marker_bytes = [0u8; 4];
    cursor.read_exact(&mut marker_bytes)?;
    let declared_length = cursor.read_u16::<BigEndian>()?;
    let mut reserved_bytes = [0u8; 2];
    cursor.read_exact(&mut reserved_bytes)?;

    let header = Header {
        marker_bytes,
        declared_length,
        reserved_bytes,
        reserved_valid: reserved_bytes == [0, 0],
    };

    if !header.marker_valid() {
        if validation == HeaderValidation::Strict {
            return Err(Error::MarkerMismatch {
                found: marker_bytes,
            });
        }
        tracing::warn!(
            "Unexpected code section marker {:?} (expected \":c:\\0\")",
            marker_bytes
        );
    }

    if !header.reserved_valid {
        if validation == HeaderValidation::Strict {
            return Err(Error::ReservedBytesNonzero {
                found: reserved_bytes,
            });
        }
        tracing::warn!("Reserved header bytes are nonzero: {:?}", reserved_bytes);
    }

    tracing::debug!("Code section header: {} bytes declared", declared_length);

    Ok((header, HEADER_SIZE))
}
