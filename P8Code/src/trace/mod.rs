//! Human-readable decode traces
//!
//! [`TraceReport`] is a [`DecodeObserver`] that writes one annotated block per
//! instruction, framed by a header section and a final output section. It
//! only reads decoder state, so a traced decode yields the same
//! [`DecodeResult`] as an untraced one.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formats::code_section::{
    CODE_MARKER, DecodeError, DecodeObserver, DecodeResult, Header, Instruction, StepEvent,
    Termination, bytes_to_text,
};

const RULE_WIDTH: usize = 80;

/// Rendering options for a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    /// Added to stream positions so they match the enclosing artifact.
    pub base_offset: u64,
    /// Number of trailing output characters shown after each step.
    pub preview_chars: usize,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            base_offset: 0,
            preview_chars: 80,
        }
    }
}

/// Writes a step-by-step trace of a decode run.
pub struct TraceReport<W: Write> {
    out: W,
    options: TraceOptions,
    error: Option<io::Error>,
}

impl<W: Write> TraceReport<W> {
    pub fn new(out: W, options: TraceOptions) -> Self {
        Self {
            out,
            options,
            error: None,
        }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    fn rule(&mut self, ch: char) -> io::Result<()> {
        writeln!(self.out, "{}", ch.to_string().repeat(RULE_WIDTH))
    }

    fn banner(&mut self, title: &str) -> io::Result<()> {
        self.rule('=')?;
        writeln!(self.out, "{title}")?;
        self.rule('=')
    }

    fn position(&self, position: usize) -> u64 {
        self.options.base_offset + position as u64
    }

    fn preview(&self, output: &[u8]) -> String {
        let skip = output.len().saturating_sub(self.options.preview_chars);
        let tail = bytes_to_text(&output[skip..]);
        if skip > 0 { format!("...{tail}") } else { tail }
    }

    fn write_header(&mut self, header: &Header) -> io::Result<()> {
        let m = header.marker_bytes;
        let [hi, lo] = header.declared_length.to_be_bytes();
        let [r0, r1] = header.reserved_bytes;

        self.banner("COMPRESSED CODE DECOMPRESSION TRACE")?;
        writeln!(self.out)?;
        writeln!(self.out, "STEP 1: Read compression header")?;
        self.rule('-')?;
        writeln!(self.out, "Bytes 0-3: {m:?}")?;
        writeln!(
            self.out,
            "  = '{}' + null byte",
            bytes_to_text(&m[..3])
        )?;
        if header.marker_valid() {
            writeln!(self.out, "This is the compressed code marker: ':c:\\x00'")?;
        } else {
            writeln!(
                self.out,
                "WARNING: expected marker {:?} (':c:\\x00')",
                CODE_MARKER
            )?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "Bytes 4-5: {hi}, {lo}")?;
        writeln!(
            self.out,
            "Decompressed code length = ({hi} << 8) | {lo} = {} bytes",
            header.declared_length
        )?;
        writeln!(self.out)?;
        let note = if header.reserved_valid {
            "should be zero"
        } else {
            "WARNING: should be zero"
        };
        writeln!(self.out, "Bytes 6-7: {r0}, {r1} ({note})")?;
        writeln!(self.out)?;
        self.banner("STEP 2: Decompress the data byte-by-byte")?;
        writeln!(self.out)
    }

    fn write_step(&mut self, event: &StepEvent<'_>) -> io::Result<()> {
        let op = event.opcode;
        let position = self.position(event.position);
        let fragment = bytes_to_text(event.fragment);

        writeln!(self.out)?;
        writeln!(self.out, "--- Step {} (byte position {position}) ---", event.step)?;
        writeln!(self.out, "Current byte: {op} (0x{op:02x}, binary: {op:08b})")?;
        writeln!(self.out, "Action: {}", event.instruction.action_name())?;

        match event.instruction {
            Instruction::Literal(byte) => {
                writeln!(self.out, "  Next byte: {byte} = '{fragment}'")?;
            }
            Instruction::TableLookup(index) => {
                writeln!(self.out, "  Table index: {index}")?;
                writeln!(self.out, "  Character from table: '{fragment}'")?;
            }
            Instruction::BackReference { offset, length } => {
                let next = event.operand.unwrap_or_default();
                writeln!(
                    self.out,
                    "  Current: {op} (0x{op:02x}), Next: {next} (0x{next:02x})"
                )?;
                writeln!(
                    self.out,
                    "  Offset: ({op} - 60) * 16 + ({next} & 15) = {offset} chars back"
                )?;
                writeln!(self.out, "  Length: ({next} >> 4) + 2 = {length} chars")?;
                writeln!(self.out, "  Copying: '{fragment}'")?;
            }
        }

        let preview = self.preview(event.output);
        writeln!(
            self.out,
            "Output so far ({} chars): {preview}",
            event.output.len()
        )
    }

    fn write_error(&mut self, step: usize, error: &DecodeError, output: &[u8]) -> io::Result<()> {
        let position = match *error {
            DecodeError::TruncatedInstruction { position, .. }
            | DecodeError::InvalidBackReference { position, .. } => self.position(position),
        };

        writeln!(self.out)?;
        writeln!(self.out, "--- Step {step} (byte position {position}) ---")?;
        match *error {
            DecodeError::TruncatedInstruction { opcode, .. } => writeln!(
                self.out,
                "  ERROR: instruction 0x{opcode:02x} is missing its second byte (end of input)"
            )?,
            DecodeError::InvalidBackReference { offset, length, .. } => writeln!(
                self.out,
                "  ERROR: Invalid offset {offset} (length {length}): current output is only {} chars",
                output.len()
            )?,
        }
        Ok(())
    }

    fn write_footer(&mut self, result: &DecodeResult) -> io::Result<()> {
        writeln!(self.out)?;
        self.banner(&format!("FINAL OUTPUT ({} bytes):", result.output.len()))?;
        writeln!(self.out)?;
        write!(self.out, "{}", result.to_text())?;
        writeln!(self.out)?;
        writeln!(self.out)?;

        match result.termination {
            Termination::Complete => self.banner("DECOMPRESSION COMPLETE")?,
            Termination::InputExhausted => self.banner("DECOMPRESSION STOPPED: input exhausted")?,
            Termination::InstructionLimit => {
                self.banner("DECOMPRESSION STOPPED: step limit reached")?;
            }
            Termination::Error => self.banner("DECOMPRESSION STOPPED: decode error")?,
        }

        writeln!(self.out, "Total steps: {}", result.instructions)?;
        writeln!(
            self.out,
            "Output length: {} bytes (expected: {})",
            result.output.len(),
            result.declared_length()
        )?;
        if let Some(error) = &result.error {
            writeln!(self.out, "Error: {error}")?;
        }
        if result.termination == Termination::InstructionLimit {
            writeln!(
                self.out,
                "[Output truncated at {} steps for readability]",
                result.instructions
            )?;
            writeln!(
                self.out,
                "Full decompression would produce {} bytes total",
                result.declared_length()
            )?;
        }
        self.rule('=')
    }

    /// Write the final section and hand back the writer.
    ///
    /// # Errors
    /// Returns the first IO error hit while tracing, or while writing the
    /// final section.
    pub fn finish(mut self, result: &DecodeResult) -> Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e.into());
        }
        self.write_footer(result)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> DecodeObserver for TraceReport<W> {
    fn on_header(&mut self, header: &Header) {
        let result = self.write_header(header);
        self.record(result);
    }

    fn on_step(&mut self, event: &StepEvent<'_>) {
        if self.error.is_none() {
            let result = self.write_step(event);
            self.record(result);
        }
    }

    fn on_error(&mut self, step: usize, error: &DecodeError, output: &[u8]) {
        if self.error.is_none() {
            let result = self.write_error(step, error, output);
            self.record(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::code_section::{DecodeOptions, decompress, decompress_observed};

    fn section(declared_length: u16, body: &[u8]) -> Vec<u8> {
        let mut data = CODE_MARKER.to_vec();
        data.extend_from_slice(&declared_length.to_be_bytes());
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(body);
        data
    }

    fn trace(data: &[u8], decode: &DecodeOptions, options: TraceOptions) -> (DecodeResult, String) {
        let mut report = TraceReport::new(Vec::new(), options);
        let result = decompress_observed(data, decode, &mut report).unwrap();
        let bytes = report.finish(&result).unwrap();
        (result, String::from_utf8(bytes).unwrap())
    }

    #[test]
    fn test_trace_annotates_each_action() {
        let data = section(7, &[0x14, 0x11, 0x18, 0x18, 0x1b, 0x3c, 0x05]);
        let (_, text) = trace(&data, &DecodeOptions::default(), TraceOptions::default());

        assert!(text.contains("Decompressed code length = (0 << 8) | 7 = 7 bytes"));
        assert!(text.contains("--- Step 1 (byte position 8) ---"));
        assert!(text.contains("Character from table: 'h'"));
        assert!(text.contains("Action: COPY FROM HISTORY"));
        assert!(text.contains("Offset: (60 - 60) * 16 + (5 & 15) = 5 chars back"));
        assert!(text.contains("Length: (5 >> 4) + 2 = 2 chars"));
        assert!(text.contains("Copying: 'he'"));
        assert!(text.contains("Output so far (7 chars): hellohe"));
        assert!(text.contains("DECOMPRESSION COMPLETE"));
        assert!(text.contains("Output length: 7 bytes (expected: 7)"));
    }

    #[test]
    fn test_trace_does_not_change_result() {
        let data = section(4, &[0x00, b'x', 0x0d, 0x3c, 0x02, 0x0e]);
        let (traced, _) = trace(&data, &DecodeOptions::default(), TraceOptions::default());
        let plain = decompress(&data).unwrap();

        assert_eq!(traced.output, plain.output);
        assert_eq!(traced.instructions, plain.instructions);
        assert_eq!(traced.cursor, plain.cursor);
    }

    #[test]
    fn test_trace_reports_errors_and_offsets() {
        let data = section(9, &[0x0d, 0x3c, 0x07]);
        let options = TraceOptions {
            base_offset: 17152,
            ..TraceOptions::default()
        };
        let (result, text) = trace(&data, &DecodeOptions::default(), options);

        assert!(result.error.is_some());
        assert!(text.contains("--- Step 1 (byte position 17160) ---"));
        assert!(text.contains("--- Step 2 (byte position 17161) ---"));
        assert!(text.contains("ERROR: Invalid offset 7"));
        assert!(text.contains("DECOMPRESSION STOPPED: decode error"));
    }

    #[test]
    fn test_trace_step_limit_note() {
        let data = section(3, &[0x0d, 0x0e, 0x0f]);
        let decode = DecodeOptions {
            max_instructions: Some(1),
            ..DecodeOptions::default()
        };
        let (_, text) = trace(&data, &decode, TraceOptions::default());

        assert!(text.contains("[Output truncated at 1 steps for readability]"));
        assert!(text.contains("Full decompression would produce 3 bytes total"));
    }

    #[test]
    fn test_preview_keeps_tail() {
        let data = section(5, &[0x0d, 0x0e, 0x0f, 0x10, 0x11]);
        let options = TraceOptions {
            preview_chars: 2,
            ..TraceOptions::default()
        };
        let (_, text) = trace(&data, &DecodeOptions::default(), options);

        assert!(text.contains("Output so far (5 chars): ...de"));
    }
}
