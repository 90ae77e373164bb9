//! Bitstream report writing and reading

use std::io::Write;

use lazy_static::lazy_static;
use regex::Regex;

use super::ByteLog;
use super::parser::parse_decimal_list;
use crate::error::{Error, Result};

const RULE_WIDTH: usize = 70;

lazy_static! {
    static ref DECIMAL_SECTION: Regex =
        Regex::new(r"DECIMAL BYTE VALUES[^\n]*\n[^\n]*\n([0-9, ]*)")
            .expect("valid decimal section regex");
}

fn rule(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn section(out: &mut impl Write, title: &str) -> std::io::Result<()> {
    rule(out)?;
    writeln!(out, "{title}")?;
    rule(out)
}

/// Write the bitstream report for an extracted log.
///
/// The report carries totals, the continuous bitstream and the
/// comma-separated decimal values that [`parse_bitstream_report`] reads back.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_bitstream_report(log: &ByteLog, out: &mut impl Write) -> Result<()> {
    let bitstream = log.bitstream();

    section(out, "COMPRESSED DATA BITSTREAM")?;
    writeln!(out)?;
    writeln!(out, "Total extracted bytes: {}", log.len())?;
    writeln!(out, "Total bits: {}", bitstream.len())?;
    writeln!(out)?;

    section(out, "CONTINUOUS BINARY BITSTREAM:")?;
    writeln!(out, "{bitstream}")?;
    writeln!(out)?;

    section(out, "DECIMAL BYTE VALUES (comma-separated):")?;
    writeln!(out, "{}", log.decimal_list())?;
    writeln!(out)?;

    section(out, "END OF BITSTREAM")?;
    Ok(())
}

/// Read the decimal values back out of a bitstream report.
///
/// # Errors
///
/// Returns [`Error::NoBytesFound`] if the report has no decimal section, or
/// any error from [`parse_decimal_list`].
pub fn parse_bitstream_report(text: &str) -> Result<Vec<u8>> {
    let caps = DECIMAL_SECTION
        .captures(text)
        .ok_or_else(|| Error::NoBytesFound {
            source_kind: "bitstream report".to_string(),
        })?;
    parse_decimal_list(&caps[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_log() -> ByteLog {
        ByteLog::from_bytes(&[58, 99, 58, 0])
    }

    #[test]
    fn test_report_layout() {
        let mut out = Vec::new();
        write_bitstream_report(&sample_log(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Total extracted bytes: 4\n"));
        assert!(text.contains("Total bits: 32\n"));
        assert!(text.contains("00111010011000110011101000000000\n"));
        assert!(text.contains("58,99,58,0\n"));
    }

    #[test]
    fn test_report_reads_back() {
        let mut out = Vec::new();
        write_bitstream_report(&sample_log(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(parse_bitstream_report(&text).unwrap(), vec![58, 99, 58, 0]);
    }

    #[test]
    fn test_report_without_section() {
        assert!(matches!(
            parse_bitstream_report("Total bits: 0"),
            Err(Error::NoBytesFound { .. })
        ));
    }
}
