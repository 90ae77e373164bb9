//! Compressed code section (`:c:\0` format)
//!
//! A code section is an 8-byte header followed by a stream of one- and
//! two-byte instructions. Decoding never fails once the header has been read:
//! truncated instructions and bad back-references stop the loop and are
//! reported in the [`DecodeResult`] next to whatever output was produced.
//!
//! ```
//! use p8code::formats::code_section::decompress;
//!
//! let data = [b':', b'c', b':', 0, 0, 2, 0, 0, 0x00, b'A', 0x00, b'B'];
//! let result = decompress(&data)?;
//! assert_eq!(result.to_text(), "AB");
//! # Ok::<(), p8code::Error>(())
//! ```

pub mod decoder;
pub mod header;
pub mod instruction;
pub mod result;
pub mod table;

pub use decoder::{DecodeObserver, DecodeOptions, Decoder, StepEvent};
pub use header::{Header, HeaderValidation, HeaderWarning, parse_header};
pub use instruction::{Instruction, back_reference_operands, decode_instruction};
pub use result::{DecodeError, DecodeResult, DecodeSummary, Termination, bytes_to_text};
pub use table::{LOOKUP_TABLE, lookup};

use crate::error::Result;

/// Marker identifying the compressed code variant.
pub const CODE_MARKER: [u8; 4] = *b":c:\0";

/// Size of the header; the first instruction starts here.
pub const HEADER_SIZE: usize = 8;

/// Decompress a code section with default options.
///
/// # Errors
/// Returns an error if the header is shorter than 8 bytes.
pub fn decompress(data: &[u8]) -> Result<DecodeResult> {
    decompress_with(data, &DecodeOptions::default())
}

/// Decompress a code section.
///
/// # Errors
/// Returns an error if the header is truncated or fails strict validation.
pub fn decompress_with(data: &[u8], options: &DecodeOptions) -> Result<DecodeResult> {
    Ok(Decoder::new(data, options.clone())?.run())
}

/// Decompress a code section, reporting every step to `observer`.
///
/// # Errors
/// Returns an error if the header is truncated or fails strict validation.
pub fn decompress_observed<O: DecodeObserver + ?Sized>(
    data: &[u8],
    options: &DecodeOptions,
    observer: &mut O,
) -> Result<DecodeResult> {
    Ok(Decoder::new(data, options.clone())?.run_observed(observer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_header(declared_length: u16, body: &[u8]) -> Vec<u8> {
        let mut data = CODE_MARKER.to_vec();
        data.extend_from_slice(&declared_length.to_be_bytes());
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn test_literal_pairs() {
        let data = with_header(2, &[0x00, 0x41, 0x00, 0x42]);
        let result = decompress(&data).unwrap();

        assert_eq!(result.as_bytes(), b"AB");
        assert_eq!(result.to_text(), "AB");
        assert!(result.is_complete());
    }

    #[test]
    fn test_single_table_byte() {
        let result = decompress(&with_header(1, &[0x04])).unwrap();
        assert_eq!(result.to_text(), "1");

        let result = decompress(&with_header(1, &[0x03])).unwrap();
        assert_eq!(result.to_text(), "0");
    }

    #[test]
    fn test_copy_after_hello() {
        // h e l l o from the table, then copy 2 from 5 back
        let data = with_header(7, &[0x14, 0x11, 0x18, 0x18, 0x1b, 0x3c, 0x05]);
        let result = decompress(&data).unwrap();

        assert_eq!(result.to_text(), "hellohe");
        assert_eq!(result.instructions, 6);
        assert_eq!(result.cursor, data.len());
    }

    #[test]
    fn test_longest_copy() {
        // 17 literals then a 17-byte copy of all of them
        let mut body = Vec::new();
        for b in b'A'..=b'Q' {
            body.extend_from_slice(&[0x00, b]);
        }
        body.extend_from_slice(&[0x3d, 0xf1]);
        let result = decompress(&with_header(34, &body)).unwrap();

        assert_eq!(result.output.len(), 34);
        assert_eq!(&result.output[17..], &result.output[..17]);
    }

    #[test]
    fn test_short_input_is_an_error() {
        assert!(decompress(&CODE_MARKER).is_err());
    }

    #[test]
    fn test_strict_options() {
        let mut data = with_header(1, &[0x0d]);
        data[7] = 1;
        let options = DecodeOptions {
            validation: HeaderValidation::Strict,
            ..DecodeOptions::default()
        };

        assert!(decompress_with(&data, &options).is_err());
        assert_eq!(decompress(&data).unwrap().to_text(), "a");
    }
}
