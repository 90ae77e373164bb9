//! File format handlers
//!
//! Only the `:c:\0` compressed code section is supported; the plain-text and
//! PNG cartridge containers are handled by the caller.

pub mod code_section;

// Re-export the decoding entry points
pub use code_section::{DecodeOptions, DecodeResult, decompress, decompress_with};
