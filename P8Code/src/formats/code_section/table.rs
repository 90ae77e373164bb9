//! Character lookup table for the compressed code format

/// Number of entries in the lookup table (indices 0..=59).
pub const TABLE_LEN: usize = 60;

/// Highest opcode that selects a table entry.
pub const MAX_TABLE_OPCODE: u8 = 0x3b;

/// Fixed 60-entry character table.
///
/// Index 0 is a placeholder: opcode `0x00` is the literal escape, so the
/// decoder only ever reads indices 1..=59.
pub const LOOKUP_TABLE: [u8; TABLE_LEN] =
    *b" \n 0123456789abcdefghijklmnopqrstuvwxyz!#%(){}[]<>+=/*:;.,~_";

/// Look up the character for a table opcode.
///
/// Returns `None` for the literal escape (`0x00`) and for back-reference
/// opcodes (`0x3c` and above).
#[must_use]
pub fn lookup(opcode: u8) -> Option<u8> {
    match opcode {
        1..=MAX_TABLE_OPCODE => Some(LOOKUP_TABLE[usize::from(opcode)]),
        _ => None,
    }
}
