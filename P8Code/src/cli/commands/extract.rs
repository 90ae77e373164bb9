//! CLI command for byte log extraction

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use crate::bytelog::{ByteLog, parse_positioned, parse_reassembled, write_bitstream_report};
use crate::cli::progress::{DISK, LOOKING_GLASS, print_done, print_step};

/// Extract bytes from `source` and write a bitstream report.
///
/// With `section_start` set, `[byte position P]` records are read and only
/// positions at or after it are kept.
pub fn execute(source: &Path, destination: &Path, section_start: Option<u64>) -> anyhow::Result<()> {
    let started = Instant::now();

    print_step(1, 2, LOOKING_GLASS, &format!("Scanning {}...", source.display()));
    let text = std::fs::read_to_string(source)?;
    let log = match section_start {
        Some(start) => ByteLog::from_bytes(&parse_positioned(&text, start)?),
        None => parse_reassembled(&text)?,
    };

    print_step(2, 2, DISK, &format!("Writing {}...", destination.display()));
    let mut out = BufWriter::new(File::create(destination)?);
    write_bitstream_report(&log, &mut out)?;

    println!("Extracted {} bytes ({} bits)", log.len(), log.len() * 8);
    print_done(started.elapsed());
    Ok(())
}
