//! Regex scanners for byte dump logs

use lazy_static::lazy_static;
use regex::Regex;

use super::ByteLog;
use crate::error::{Error, Result};

lazy_static! {
    /// `Reassembled byte: 00111010 (decimal: 58)`
    static ref REASSEMBLED: Regex =
        Regex::new(r"(?i)reassembled byte:\s+([01]{8})\s+\(decimal:\s+(\d+)\)")
            .expect("valid reassembled-byte regex");

    /// `[byte position 17152] ... decimal: 58`, possibly spanning lines
    static ref POSITIONED: Regex =
        Regex::new(r"(?s)\[byte position (\d+)\].*?decimal:\s+(\d+)")
            .expect("valid positioned-byte regex");
}

fn parse_number(token: &str) -> Result<u64> {
    token.parse::<u64>().map_err(|_| Error::InvalidNumber {
        token: token.to_string(),
    })
}

fn parse_byte(token: &str) -> Result<u8> {
    let value = parse_number(token)?;
    u8::try_from(value).map_err(|_| Error::ByteOutOfRange { value })
}

/// Collect every `Reassembled byte: <bits> (decimal: <n>)` record in order.
///
/// # Errors
///
/// Returns [`Error::NoBytesFound`] if the text contains no records and
/// [`Error::ByteOutOfRange`] if a decimal value exceeds 255.
pub fn parse_reassembled(text: &str) -> Result<ByteLog> {
    let mut log = ByteLog::default();

    for caps in REASSEMBLED.captures_iter(text) {
        log.bits.push(caps[1].to_string());
        log.bytes.push(parse_byte(&caps[2])?);
    }

    if log.is_empty() {
        return Err(Error::NoBytesFound {
            source_kind: "reassembled byte log".to_string(),
        });
    }

    tracing::debug!("Extracted {} reassembled bytes", log.len());
    Ok(log)
}

/// Collect `[byte position P] ... decimal: N` records at or after
/// `section_start`, ordered by position.
///
/// # Errors
///
/// Returns [`Error::NoBytesFound`] if no record falls inside the section and
/// [`Error::ByteOutOfRange`] if a decimal value exceeds 255.
pub fn parse_positioned(text: &str, section_start: u64) -> Result<Vec<u8>> {
    let mut records = Vec::new();

    for caps in POSITIONED.captures_iter(text) {
        let position = parse_number(&caps[1])?;
        if position >= section_start {
            records.push((position, parse_byte(&caps[2])?));
        }
    }

    if records.is_empty() {
        return Err(Error::NoBytesFound {
            source_kind: format!("positioned byte log (from position {section_start})"),
        });
    }

    records.sort_by_key(|(position, _)| *position);
    tracing::debug!(
        "Extracted {} bytes from position {} onwards",
        records.len(),
        section_start
    );

    Ok(records.into_iter().map(|(_, value)| value).collect())
}

/// Parse a list of decimal byte values separated by commas and/or whitespace.
///
/// # Errors
///
/// Returns [`Error::InvalidNumber`] for non-numeric tokens,
/// [`Error::ByteOutOfRange`] for values above 255 and [`Error::NoBytesFound`]
/// if the list is empty.
pub fn parse_decimal_list(text: &str) -> Result<Vec<u8>> {
    let bytes = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_byte)
        .collect::<Result<Vec<_>>>()?;

    if bytes.is_empty() {
        return Err(Error::NoBytesFound {
            source_kind: "decimal list".to_string(),
        });
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REASSEMBLED_LOG: &str = "\
[bit 0] 0
Reassembled byte: 00111010 (decimal: 58)
noise line
reassembled byte:   01100011 (decimal: 99)
Reassembled byte: 00111010 (decimal: 58)
";

    #[test]
    fn test_parse_reassembled() {
        let log = parse_reassembled(REASSEMBLED_LOG).unwrap();

        assert_eq!(log.bytes, vec![58, 99, 58]);
        assert_eq!(log.bits, vec!["00111010", "01100011", "00111010"]);
    }

    #[test]
    fn test_parse_reassembled_empty() {
        assert!(matches!(
            parse_reassembled("nothing here"),
            Err(Error::NoBytesFound { .. })
        ));
    }

    #[test]
    fn test_parse_reassembled_out_of_range() {
        let err = parse_reassembled("Reassembled byte: 11111111 (decimal: 300)").unwrap_err();
        assert!(matches!(err, Error::ByteOutOfRange { value: 300 }));
    }

    #[test]
    fn test_parse_positioned_filters_and_sorts() {
        let text = "\
[byte position 17153]
  bits: 01100011
  decimal: 99
[byte position 100] decimal: 7
[byte position 17152]
  bits: 00111010
  decimal: 58
";
        assert_eq!(parse_positioned(text, 17152).unwrap(), vec![58, 99]);
        assert_eq!(parse_positioned(text, 0).unwrap(), vec![7, 58, 99]);
    }

    #[test]
    fn test_parse_positioned_nothing_in_section() {
        let text = "[byte position 5] decimal: 1";
        assert!(parse_positioned(text, 17152).is_err());
    }

    #[test]
    fn test_parse_decimal_list() {
        assert_eq!(parse_decimal_list("58,99, 58\n0 1").unwrap(), vec![58, 99, 58, 0, 1]);
        assert!(matches!(
            parse_decimal_list("1,x"),
            Err(Error::InvalidNumber { .. })
        ));
        assert!(parse_decimal_list(" , ").is_err());
    }
}
