//! # P8Code
//!
//! A pure-Rust decoder for the `:c:\0` compressed code sections found in
//! cartridge images, plus the tooling around it.
//!
//! ## Modules
//!
//! - **formats::code_section** - header parsing and the instruction decoder
//! - **bytelog** - byte extraction from bit-level debug logs
//! - **trace** - step-by-step decode reports
//! - **config** - TOML tool configuration
//!
//! ## Quick Start
//!
//! ```
//! use p8code::prelude::*;
//!
//! // ":c:\0", declared length 3, then "a", "b" and a literal "!"
//! let data = [b':', b'c', b':', 0, 0, 3, 0, 0, 0x0d, 0x0e, 0x00, b'!'];
//! let result = decompress(&data)?;
//!
//! assert_eq!(result.to_text(), "ab!");
//! assert!(result.is_complete());
//! # Ok::<(), p8code::Error>(())
//! ```
//!
//! ### From a debug log
//!
//! ```no_run
//! use p8code::bytelog::parse_reassembled;
//! use p8code::formats::code_section::decompress;
//!
//! let text = std::fs::read_to_string("meaningful-bits.txt")?;
//! let bytes = parse_reassembled(&text)?.into_bytes();
//! let result = decompress(&bytes)?;
//! println!("{}", result.to_text());
//! # Ok::<(), p8code::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `p8code` command-line binary

pub mod bytelog;
pub mod config;
pub mod error;
pub mod formats;
pub mod trace;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::code_section::{
        DecodeError, DecodeObserver, DecodeOptions, DecodeResult, Decoder, Header,
        HeaderValidation, Instruction, StepEvent, Termination, decompress, decompress_observed,
        decompress_with,
    };
    pub use crate::bytelog::{ByteLog, parse_positioned, parse_reassembled};
    pub use crate::trace::{TraceOptions, TraceReport};
    pub use crate::config::ToolConfig;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
