//! Source file loading for decode commands

use std::path::Path;

use super::InputFormat;
use crate::bytelog::{parse_bitstream_report, parse_decimal_list, parse_positioned, parse_reassembled};
use crate::error::Result;
use crate::formats::code_section::CODE_MARKER;

/// Guess the format of a source file from its content.
pub fn detect_format(data: &[u8]) -> InputFormat {
    if data.starts_with(&CODE_MARKER) {
        return InputFormat::Binary;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return InputFormat::Binary;
    };

    if text.contains("DECIMAL BYTE VALUES") {
        InputFormat::Report
    } else if text.contains("[byte position") {
        InputFormat::Positioned
    } else if text.to_ascii_lowercase().contains("reassembled byte:") {
        InputFormat::Log
    } else if !text.trim().is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c.is_whitespace())
    {
        InputFormat::Decimal
    } else {
        InputFormat::Binary
    }
}

/// Turn file content into code section bytes.
///
/// # Errors
/// Returns an error if the content does not parse as `format`.
pub fn bytes_from_input(data: &[u8], format: InputFormat, section_start: u64) -> Result<Vec<u8>> {
    let format = match format {
        InputFormat::Auto => detect_format(data),
        other => other,
    };
    tracing::debug!("Reading input as {:?}", format);

    let text = || String::from_utf8_lossy(data);
    match format {
        InputFormat::Binary | InputFormat::Auto => Ok(data.to_vec()),
        InputFormat::Report => parse_bitstream_report(&text()),
        InputFormat::Log => Ok(parse_reassembled(&text())?.into_bytes()),
        InputFormat::Positioned => parse_positioned(&text(), section_start),
        InputFormat::Decimal => parse_decimal_list(&text()),
    }
}

/// Read a source file and turn it into code section bytes.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_input(path: &Path, format: InputFormat, section_start: u64) -> Result<Vec<u8>> {
    let data = std::fs::read(path)?;
    bytes_from_input(&data, format, section_start)
}
