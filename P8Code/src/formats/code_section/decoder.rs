//! Instruction loop for the compressed code format

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::header::{Header, HeaderValidation, parse_header};
use super::instruction::{Instruction, MAX_COPY_LENGTH, apply_instruction, decode_instruction};
use super::result::{DecodeError, DecodeResult, Termination};
use crate::error::Result;

/// Options controlling a decode run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Stop after this many instructions.
    pub max_instructions: Option<usize>,
    /// Header validation mode.
    pub validation: HeaderValidation,
    /// Trim output that runs past the declared length.
    pub exact_length: bool,
}

/// One executed instruction, as seen by a [`DecodeObserver`].
#[derive(Debug, Clone, Copy)]
pub struct StepEvent<'a> {
    /// 1-based instruction count.
    pub step: usize,
    /// Cursor position of the opcode byte.
    pub position: usize,
    /// The opcode byte.
    pub opcode: u8,
    /// Second byte of a two-byte instruction.
    pub operand: Option<u8>,
    pub instruction: Instruction,
    /// Bytes this instruction appended.
    pub fragment: &'a [u8],
    /// Whole output after this instruction.
    pub output: &'a [u8],
}

/// Read-only hook into the decode loop.
///
/// Observers see every state transition but cannot change the outcome.
pub trait DecodeObserver {
    /// Called once after the header has been parsed.
    fn on_header(&mut self, _header: &Header) {}

    /// Called after each successfully applied instruction.
    fn on_step(&mut self, event: &StepEvent<'_>);

    /// Called when an instruction halts decoding.
    fn on_error(&mut self, _step: usize, _error: &DecodeError, _output: &[u8]) {}
}

impl DecodeObserver for () {
    fn on_step(&mut self, _event: &StepEvent<'_>) {}
}

#[derive(Debug, Clone)]
struct Step {
    position: usize,
    instruction: Instruction,
    fragment: Range<usize>,
}

/// Decoder state for a single code section.
#[derive(Debug)]
pub struct Decoder<'a> {
    stream: &'a [u8],
    header: Header,
    cursor: usize,
    output: Vec<u8>,
    instructions: usize,
    options: DecodeOptions,
}

impl<'a> Decoder<'a> {
    /// Parse the header and position the cursor on the first instruction.
    ///
    /// # Errors
    /// Returns an error if the header is truncated, or fails strict validation.
    pub fn new(stream: &'a [u8], options: DecodeOptions) -> Result<Self> {
        let (header, cursor) = parse_header(stream, options.validation)?;
        let capacity = usize::from(header.declared_length) + MAX_COPY_LENGTH - 1;

        Ok(Self {
            stream,
            header,
            cursor,
            output: Vec::with_capacity(capacity),
            instructions: 0,
            options,
        })
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Output decoded so far.
    #[must_use]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    fn declared_length(&self) -> usize {
        usize::from(self.header.declared_length)
    }

    fn should_continue(&self) -> bool {
        self.output.len() < self.declared_length()
            && self.cursor < self.stream.len()
            && self
                .options
                .max_instructions
                .is_none_or(|limit| self.instructions < limit)
    }

    /// Decode and apply one instruction.
    ///
    /// Returns `Ok(None)` once the loop condition no longer holds.
    fn step(&mut self) -> std::result::Result<Option<Step>, DecodeError> {
        if !self.should_continue() {
            return Ok(None);
        }

        let position = self.cursor;
        let instruction = decode_instruction(self.stream, position)?;
        let before = self.output.len();
        apply_instruction(instruction, &mut self.output, position)?;

        self.cursor += instruction.width();
        self.instructions += 1;

        tracing::trace!("byte {}: {:?}", position, instruction);

        Ok(Some(Step {
            position,
            instruction,
            fragment: before..self.output.len(),
        }))
    }

    /// Run to completion without observing individual steps.
    #[must_use]
    pub fn run(self) -> DecodeResult {
        self.run_observed(&mut ())
    }

    /// Run to completion, reporting each transition to `observer`.
    pub fn run_observed<O: DecodeObserver + ?Sized>(mut self, observer: &mut O) -> DecodeResult {
        observer.on_header(&self.header);

        let error = loop {
            match self.step() {
                Ok(Some(step)) => {
                    let event = StepEvent {
                        step: self.instructions,
                        position: step.position,
                        opcode: self.stream[step.position],
                        operand: (step.instruction.width() == 2)
                            .then(|| self.stream[step.position + 1]),
                        instruction: step.instruction,
                        fragment: &self.output[step.fragment],
                        output: &self.output,
                    };
                    observer.on_step(&event);
                }
                Ok(None) => break None,
                Err(e) => {
                    tracing::debug!("Decoding halted after {} instructions: {}", self.instructions, e);
                    observer.on_error(self.instructions + 1, &e, &self.output);
                    break Some(e);
                }
            }
        };

        self.finish(error)
    }

    fn finish(mut self, error: Option<DecodeError>) -> DecodeResult {
        let declared = self.declared_length();
        let termination = if error.is_some() {
            Termination::Error
        } else if self.output.len() >= declared {
            Termination::Complete
        } else if self.cursor >= self.stream.len() {
            Termination::InputExhausted
        } else {
            Termination::InstructionLimit
        };

        if termination == Termination::InputExhausted {
            tracing::warn!(
                "Input exhausted after {} of {} declared bytes",
                self.output.len(),
                declared
            );
        }

        if self.options.exact_length && self.output.len() > declared {
            self.output.truncate(declared);
        }

        tracing::debug!(
            "Decoded {} bytes in {} instructions ({:?})",
            self.output.len(),
            self.instructions,
            termination
        );

        DecodeResult {
            header: self.header,
            output: self.output,
            instructions: self.instructions,
            cursor: self.cursor,
            termination,
            error,
        }
    }
}
