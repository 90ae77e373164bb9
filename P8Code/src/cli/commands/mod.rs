use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod decompress;
pub mod execute;
pub mod extract;
pub mod input;
pub mod trace;

/// How to interpret a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputFormat {
    /// Detect from content
    #[default]
    Auto,
    /// Bitstream report written by `extract`
    Report,
    /// Log with `Reassembled byte: ... (decimal: N)` lines
    Log,
    /// Log with `[byte position P] ... decimal: N` records
    Positioned,
    /// Raw code section bytes
    Binary,
    /// Comma or whitespace separated decimal values
    Decimal,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract byte values from a debug log into a bitstream report
    Extract {
        /// Debug log to scan
        #[arg(short, long)]
        source: PathBuf,

        /// Bitstream report to write
        #[arg(short, long)]
        destination: PathBuf,

        /// Read `[byte position P]` records instead of reassembled-byte lines
        #[arg(long)]
        positioned: bool,

        /// First byte position kept with --positioned (default 17152)
        #[arg(long, requires = "positioned")]
        section_start: Option<u64>,
    },

    /// Decompress a code section
    Decompress {
        /// Input file (report, log, decimal list or raw bytes)
        #[arg(short, long)]
        source: PathBuf,

        /// Output file for the decoded code
        #[arg(short, long)]
        destination: PathBuf,

        /// Input format
        #[arg(short = 'i', long, value_enum, default_value_t = InputFormat::Auto)]
        input_format: InputFormat,

        /// Stop after this many instructions
        #[arg(long)]
        max_steps: Option<usize>,

        /// Reject a bad marker or nonzero reserved bytes
        #[arg(long)]
        strict: bool,

        /// Trim output past the declared length
        #[arg(long)]
        exact_length: bool,

        /// Write decoded bytes verbatim instead of as UTF-8 text
        #[arg(long)]
        raw: bool,

        /// Also write a JSON summary of the decode
        #[arg(long)]
        json: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write a step-by-step decode trace
    Trace {
        /// Input file (report, log, decimal list or raw bytes)
        #[arg(short, long)]
        source: PathBuf,

        /// Trace file to write
        #[arg(short, long)]
        destination: PathBuf,

        /// Input format
        #[arg(short = 'i', long, value_enum, default_value_t = InputFormat::Auto)]
        input_format: InputFormat,

        /// Stop after this many instructions
        #[arg(long)]
        max_steps: Option<usize>,

        /// Added to byte positions in the trace (e.g. 17152)
        #[arg(long)]
        base_offset: Option<u64>,

        /// Trailing output characters shown per step
        #[arg(long)]
        preview: Option<usize>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}
