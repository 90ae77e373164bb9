//! CLI command for decode traces

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;

use super::InputFormat;
use super::decompress::outcome_message;
use super::input::load_input;
use crate::cli::progress::{LOOKING_GLASS, print_done, print_step, print_warning, simple_spinner};
use crate::config::TraceConfig;
use crate::formats::code_section::{
    DecodeError, DecodeObserver, DecodeOptions, Header, StepEvent, decompress_observed,
};
use crate::trace::TraceReport;

/// Trace report that also ticks a spinner every `interval` steps.
struct ProgressTrace<W: Write> {
    report: TraceReport<W>,
    spinner: Option<ProgressBar>,
    interval: usize,
}

impl<W: Write> DecodeObserver for ProgressTrace<W> {
    fn on_header(&mut self, header: &Header) {
        self.report.on_header(header);
    }

    fn on_step(&mut self, event: &StepEvent<'_>) {
        self.report.on_step(event);
        let due = self.interval > 0 && event.step % self.interval == 0;
        if let (true, Some(spinner)) = (due, &self.spinner) {
            spinner.set_message(format!(
                "Progress: {} steps, {} chars decompressed...",
                event.step,
                event.output.len()
            ));
        }
    }

    fn on_error(&mut self, step: usize, error: &DecodeError, output: &[u8]) {
        self.report.on_error(step, error, output);
    }
}

/// Decode `source` and write a step-by-step trace to `destination`.
pub fn execute(
    source: &Path,
    destination: &Path,
    input_format: InputFormat,
    section_start: u64,
    options: &DecodeOptions,
    config: &TraceConfig,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        print_step(1, 2, LOOKING_GLASS, &format!("Reading {}...", source.display()));
    }
    let data = load_input(source, input_format, section_start)?;

    let spinner = (!quiet).then(|| simple_spinner("[2/2] Tracing decode..."));
    let mut observer = ProgressTrace {
        report: TraceReport::new(BufWriter::new(File::create(destination)?), config.report.clone()),
        spinner,
        interval: config.progress_interval,
    };

    let result = decompress_observed(&data, options, &mut observer)?;
    if let Some(spinner) = &observer.spinner {
        spinner.finish_and_clear();
    }
    observer.report.finish(&result)?;

    if let Some(message) = outcome_message(&result) {
        print_warning(&message);
    }
    if !quiet {
        println!(
            "Traced {} steps, {} bytes written to {}",
            result.instructions,
            result.output.len(),
            destination.display()
        );
        print_done(started.elapsed());
    }
    Ok(())
}
