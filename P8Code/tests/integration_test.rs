use p8code::bytelog::{ByteLog, parse_bitstream_report, write_bitstream_report};
use p8code::formats::code_section::LOOKUP_TABLE;
use p8code::prelude::*;
use pretty_assertions::assert_eq;

fn section(declared_length: u16, body: &[u8]) -> Vec<u8> {
    let [hi, lo] = declared_length.to_be_bytes();
    let mut data = vec![b':', b'c', b':', 0, hi, lo, 0, 0];
    data.extend_from_slice(body);
    data
}

/// Render bytes the way the upstream bit dumper does.
fn as_reassembled_log(bytes: &[u8]) -> String {
    bytes
        .iter()
        .enumerate()
        .map(|(i, b)| format!("[bit {}] ...\nReassembled byte: {b:08b} (decimal: {b})\n", i * 8))
        .collect()
}

#[test]
fn test_literal_scenario() {
    let result = decompress(&section(2, &[0x00, 0x41, 0x00, 0x42])).unwrap();

    assert_eq!(result.to_text(), "AB");
    assert_eq!(result.instructions, 2);
    assert_eq!(result.termination, Termination::Complete);
}

#[test]
fn test_every_table_byte() {
    for opcode in 0x01..=0x3bu8 {
        let result = decompress(&section(1, &[opcode])).unwrap();
        assert_eq!(result.as_bytes(), &[LOOKUP_TABLE[usize::from(opcode)]]);
        assert_eq!(result.cursor, 9);
    }
}

#[test]
fn test_code_snippet() {
    // "x=1\n" from the table and one literal, then copy 4 from 4 back
    let body = [0x24, 0x00, b'=', 0x04, 0x01, 0x3c, 0x24];
    let result = decompress(&section(8, &body)).unwrap();

    assert_eq!(result.to_text(), "x=1\nx=1\n");
    assert!(result.is_complete());
    assert_eq!(result.overshoot(), 0);
}

#[test]
fn test_partial_output_is_kept_on_error() {
    let body = [0x0d, 0x0e, 0x3c, 0x25];
    let result = decompress(&section(20, &body)).unwrap();

    assert_eq!(result.to_text(), "ab");
    assert!(matches!(
        result.error,
        Some(DecodeError::InvalidBackReference { offset: 5, length: 4, available: 2, .. })
    ));
    assert!(!result.is_complete());
}

#[test]
fn test_log_to_output() {
    let data = section(5, &[0x14, 0x11, 0x18, 0x18]);
    let log_text = as_reassembled_log(&data);

    let log = parse_reassembled(&log_text).unwrap();
    assert_eq!(log.bytes, data);

    let result = decompress(&log.into_bytes()).unwrap();
    assert_eq!(result.to_text(), "hell");
    assert_eq!(result.termination, Termination::InputExhausted);
}

#[test]
fn test_report_round_trip_through_decoder() {
    let data = section(3, &[0x00, b'{', 0x02, 0x00, b'}']);
    let mut report = Vec::new();
    write_bitstream_report(&ByteLog::from_bytes(&data), &mut report).unwrap();

    let bytes = parse_bitstream_report(&String::from_utf8(report).unwrap()).unwrap();
    assert_eq!(decompress(&bytes).unwrap().to_text(), "{ }");
}

#[test]
fn test_positioned_log_is_sliced() {
    let data = section(1, &[0x0d]);
    let mut text = String::from("[byte position 17151]\n  decimal: 99\n");
    for (i, b) in data.iter().enumerate().rev() {
        text.push_str(&format!("[byte position {}]\n  bits: {b:08b}\n  decimal: {b}\n", 17152 + i));
    }

    let bytes = parse_positioned(&text, 17152).unwrap();
    assert_eq!(bytes, data);
    assert_eq!(decompress(&bytes).unwrap().to_text(), "a");
}

#[test]
fn test_traced_decode_matches_plain() {
    let data = section(8, &[0x24, 0x00, b'=', 0x04, 0x01, 0x3c, 0x24]);
    let mut report = TraceReport::new(Vec::new(), TraceOptions::default());
    let traced = decompress_observed(&data, &DecodeOptions::default(), &mut report).unwrap();
    let text = String::from_utf8(report.finish(&traced).unwrap()).unwrap();

    let plain = decompress(&data).unwrap();
    assert_eq!(traced.output, plain.output);
    assert!(text.contains("Total steps: 5"));
}

#[test]
fn test_strict_header_from_config() {
    let config = ToolConfig::from_toml(
        "[decode]\nvalidation = \"strict\"\n",
        std::path::Path::new("p8code.toml"),
    )
    .unwrap();
    let mut data = section(1, &[0x0d]);
    data[1] = b'x';

    assert!(matches!(
        decompress_with(&data, &config.decode),
        Err(Error::MarkerMismatch { .. })
    ));
    assert_eq!(decompress(&data).unwrap().warnings().len(), 1);
}
