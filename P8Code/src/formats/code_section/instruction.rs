//! Instruction decoding for the compressed code stream
//!
//! Each instruction is selected by its first byte:
//!
//! | Opcode        | Width | Meaning                                  |
//! |---------------|-------|------------------------------------------|
//! | `0x00`        | 2     | literal: next byte is emitted verbatim   |
//! | `0x01..=0x3b` | 1     | emit [`LOOKUP_TABLE`]`[opcode]`          |
//! | `0x3c..=0xff` | 2     | copy `length` bytes from `offset` back   |

use serde::Serialize;

use super::result::DecodeError;
use super::table::{LOOKUP_TABLE, MAX_TABLE_OPCODE};

/// Opcode of the literal escape.
pub const LITERAL_OPCODE: u8 = 0x00;

/// First opcode of the back-reference range.
pub const BACK_REFERENCE_BASE: u8 = 0x3c;

/// Shortest span a back-reference can copy.
pub const MIN_COPY_LENGTH: usize = 2;

/// Longest span a back-reference can copy.
pub const MAX_COPY_LENGTH: usize = 17;

/// A single decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    /// Emit the byte as-is.
    Literal(u8),
    /// Emit the table entry at this index (1..=59).
    TableLookup(u8),
    /// Copy `length` bytes starting `offset` bytes before the end of output.
    BackReference {
        /// Distance back from the current end of output.
        offset: usize,
        /// Number of bytes to copy (2..=17).
        length: usize,
    },
}

impl Instruction {
    /// Number of stream bytes this instruction occupies.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Instruction::TableLookup(_) => 1,
            Instruction::Literal(_) | Instruction::BackReference { .. } => 2,
        }
    }

    /// Short label for reports.
    #[must_use]
    pub fn action_name(&self) -> &'static str {
        match self {
            Instruction::Literal(_) => "LITERAL CHARACTER",
            Instruction::TableLookup(_) => "LOOKUP TABLE",
            Instruction::BackReference { .. } => "COPY FROM HISTORY",
        }
    }
}

/// Split a back-reference opcode pair into `(offset, length)`.
///
/// `opcode` must be at least [`BACK_REFERENCE_BASE`].
#[must_use]
pub fn back_reference_operands(opcode: u8, next: u8) -> (usize, usize) {
    let offset = usize::from(opcode - BACK_REFERENCE_BASE) * 16 + usize::from(next & 0x0f);
    let length = usize::from(next >> 4) + MIN_COPY_LENGTH;
    (offset, length)
}

/// Decode the instruction that starts at `cursor`.
///
/// The caller guarantees `cursor < stream.len()`.
///
/// # Errors
///
/// Returns [`DecodeError::TruncatedInstruction`] if a two-byte instruction
/// starts on the last byte of the stream.
pub fn decode_instruction(stream: &[u8], cursor: usize) -> Result<Instruction, DecodeError> {
    let opcode = stream[cursor];

    if (1..=MAX_TABLE_OPCODE).contains(&opcode) {
        return Ok(Instruction::TableLookup(opcode));
    }

    let Some(&next) = stream.get(cursor + 1) else {
        return Err(DecodeError::TruncatedInstruction {
            position: cursor,
            opcode,
        });
    };

    if opcode == LITERAL_OPCODE {
        Ok(Instruction::Literal(next))
    } else {
        let (offset, length) = back_reference_operands(opcode, next);
        Ok(Instruction::BackReference { offset, length })
    }
}

/// Apply an instruction to the output buffer.
///
/// Returns the number of bytes appended. Back-references only read bytes
/// that existed before this call.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidBackReference`] if the copy span does not
/// lie entirely inside the current output; nothing is appended in that case.
pub fn apply_instruction(
    instruction: Instruction,
    output: &mut Vec<u8>,
    position: usize,
) -> Result<usize, DecodeError> {
    match instruction {
        Instruction::Literal(byte) => {
            output.push(byte);
            Ok(1)
        }
        Instruction::TableLookup(index) => {
            output.push(LOOKUP_TABLE[usize::from(index)]);
            Ok(1)
        }
        Instruction::BackReference { offset, length } => {
            let available = output.len();
            let start = available
                .checked_sub(offset)
                .filter(|start| start + length <= available)
                .ok_or(DecodeError::InvalidBackReference {
                    position,
                    offset,
                    length,
                    available,
                })?;
            output.extend_from_within(start..start + length);
            Ok(length)
        }
    }
}
