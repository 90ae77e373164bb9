//! Decode outcome types

use serde::Serialize;
use thiserror::Error;

use super::header::{Header, HeaderWarning};

/// Problem that halted the instruction loop.
///
/// Positions are offsets into the code section, header included.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeError {
    /// A two-byte instruction started on the last byte of the stream.
    #[error("instruction 0x{opcode:02x} at byte {position} is missing its operand byte")]
    TruncatedInstruction {
        /// Cursor position of the instruction.
        position: usize,
        /// The opcode that needed an operand.
        opcode: u8,
    },

    /// A back-reference pointed outside the output produced so far.
    #[error(
        "invalid back-reference at byte {position}: offset {offset}, length {length} with only {available} bytes decoded"
    )]
    InvalidBackReference {
        /// Cursor position of the instruction.
        position: usize,
        /// Requested distance back from the end of output.
        offset: usize,
        /// Requested copy length.
        length: usize,
        /// Output length when the instruction ran.
        available: usize,
    },
}

/// Why the decode loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Output reached the declared length.
    Complete,
    /// The stream ran out before the declared length was reached.
    InputExhausted,
    /// The configured instruction limit was reached.
    InstructionLimit,
    /// A [`DecodeError`] halted decoding.
    Error,
}

/// Everything a decode run produced.
#[derive(Debug, Clone)]
pub struct DecodeResult {
    /// The parsed header.
    pub header: Header,
    /// Decoded bytes, possibly partial and possibly past the declared length.
    pub output: Vec<u8>,
    /// Number of instructions executed successfully.
    pub instructions: usize,
    /// Cursor position when decoding stopped.
    pub cursor: usize,
    /// Why decoding stopped.
    pub termination: Termination,
    /// The halting error, if any.
    pub error: Option<DecodeError>,
}

impl DecodeResult {
    /// Declared length from the header.
    #[must_use]
    pub fn declared_length(&self) -> usize {
        usize::from(self.header.declared_length)
    }

    /// Decoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.output
    }

    /// Decoded output as text, mapping each byte to the code point of the
    /// same value.
    #[must_use]
    pub fn to_text(&self) -> String {
        bytes_to_text(&self.output)
    }

    /// No error and at least the declared number of bytes.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.output.len() >= self.declared_length()
    }

    /// Bytes produced past the declared length.
    #[must_use]
    pub fn overshoot(&self) -> usize {
        self.output.len().saturating_sub(self.declared_length())
    }

    /// Header warnings recorded during lenient parsing.
    #[must_use]
    pub fn warnings(&self) -> Vec<HeaderWarning> {
        self.header.warnings()
    }

    /// Serializable summary of this result.
    #[must_use]
    pub fn summary(&self) -> DecodeSummary {
        DecodeSummary {
            declared_length: self.declared_length(),
            output_length: self.output.len(),
            instructions: self.instructions,
            cursor: self.cursor,
            termination: self.termination,
            error: self.error,
            warnings: self.warnings(),
        }
    }
}

/// Machine-readable overview of a [`DecodeResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeSummary {
    pub declared_length: usize,
    pub output_length: usize,
    pub instructions: usize,
    pub cursor: usize,
    pub termination: Termination,
    pub error: Option<DecodeError>,
    pub warnings: Vec<HeaderWarning>,
}

/// Map bytes 1:1 to chars (Latin-1).
#[must_use]
pub fn bytes_to_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
