//! CLI command for code section decompression

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::InputFormat;
use super::input::load_input;
use crate::cli::progress::{DISK, GEAR, LOOKING_GLASS, print_done, print_step, print_warning};
use crate::formats::code_section::{DecodeOptions, DecodeResult, Termination, decompress_with};

/// Settings for a decompress run, after merging config and flags.
#[derive(Debug, Clone)]
pub struct DecompressArgs {
    pub input_format: InputFormat,
    pub section_start: u64,
    pub options: DecodeOptions,
    pub raw: bool,
    pub json: Option<PathBuf>,
    pub quiet: bool,
}

/// Describe a non-complete result for the user.
pub fn outcome_message(result: &DecodeResult) -> Option<String> {
    match result.termination {
        Termination::Complete => None,
        Termination::InputExhausted => Some(format!(
            "Input ended after {} of {} declared bytes",
            result.output.len(),
            result.declared_length()
        )),
        Termination::InstructionLimit => Some(format!(
            "Stopped at the step limit ({} steps, {} of {} bytes)",
            result.instructions,
            result.output.len(),
            result.declared_length()
        )),
        Termination::Error => result
            .error
            .map(|e| format!("Decoding halted: {e} (partial output kept)")),
    }
}

/// Decompress `source` into `destination`.
pub fn execute(source: &Path, destination: &Path, args: &DecompressArgs) -> anyhow::Result<()> {
    let started = Instant::now();
    let say = |step, emoji, msg: &str| {
        if !args.quiet {
            print_step(step, 3, emoji, msg);
        }
    };

    say(1, LOOKING_GLASS, &format!("Reading {}...", source.display()));
    let data = load_input(source, args.input_format, args.section_start)?;

    say(2, GEAR, &format!("Decoding {} bytes...", data.len()));
    let result = decompress_with(&data, &args.options)?;

    say(3, DISK, &format!("Writing {}...", destination.display()));
    if args.raw {
        std::fs::write(destination, result.as_bytes())?;
    } else {
        std::fs::write(destination, result.to_text())?;
    }

    if let Some(json_path) = &args.json {
        let json = serde_json::to_string_pretty(&result.summary())?;
        std::fs::write(json_path, json)?;
    }

    for warning in result.warnings() {
        print_warning(&format!("Header: {warning:?}"));
    }
    if let Some(message) = outcome_message(&result) {
        print_warning(&message);
    }

    if !args.quiet {
        println!(
            "Decoded {} bytes (declared {}) in {} steps",
            result.output.len(),
            result.declared_length(),
            result.instructions
        );
        print_done(started.elapsed());
    }
    Ok(())
}
