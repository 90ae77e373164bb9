//! Error types for `P8Code`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `P8Code` operations.
///
/// Only failures that prevent a decode from starting (or that come from the
/// surrounding tooling) are reported here. Problems found while decoding the
/// instruction stream are carried inside
/// [`DecodeResult`](crate::formats::code_section::DecodeResult) together with
/// the partial output.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Header Errors ====================
    /// The input is shorter than the mandatory 8-byte header.
    #[error("code section truncated: header needs 8 bytes, found {len}")]
    HeaderTruncated {
        /// Number of bytes actually available.
        len: usize,
    },

    /// The format marker did not match `:c:\0` (strict validation only).
    #[error("invalid code section marker: expected \":c:\\0\", found {found:?}")]
    MarkerMismatch {
        /// The four marker bytes found in the header.
        found: [u8; 4],
    },

    /// Header bytes 6-7 were not zero (strict validation only).
    #[error("reserved header bytes are nonzero: {found:?}")]
    ReservedBytesNonzero {
        /// The two reserved bytes found in the header.
        found: [u8; 2],
    },

    // ==================== Byte Log Errors ====================
    /// No byte records could be extracted from the log text.
    #[error("no byte values found in {source_kind}")]
    NoBytesFound {
        /// Description of the input that was scanned.
        source_kind: String,
    },

    /// A decimal value in the log does not fit in a byte.
    #[error("byte value {value} out of range (0-255)")]
    ByteOutOfRange {
        /// The offending value.
        value: u64,
    },

    /// A numeric token in the log could not be parsed.
    #[error("invalid number in byte log: {token:?}")]
    InvalidNumber {
        /// The token that failed to parse.
        token: String,
    },

    // ==================== Configuration Errors ====================
    /// The configuration file could not be parsed.
    #[error("invalid config file {path}: {message}")]
    ConfigParse {
        /// Path of the config file.
        path: PathBuf,
        /// The parser's error message.
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `P8Code` operations.
pub type Result<T> = std::result::Result<T, Error>;
