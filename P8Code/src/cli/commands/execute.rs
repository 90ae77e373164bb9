//! Command execution implementations

use super::{Commands, decompress, extract, trace};
use crate::config::ToolConfig;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, config: &ToolConfig) -> anyhow::Result<()> {
        match self {
            Commands::Extract {
                source,
                destination,
                positioned,
                section_start,
            } => {
                let section_start = positioned
                    .then(|| section_start.unwrap_or(config.extract.section_start));
                extract::execute(source, destination, section_start)
            }
            Commands::Decompress {
                source,
                destination,
                input_format,
                max_steps,
                strict,
                exact_length,
                raw,
                json,
                quiet,
            } => {
                let mut options = config.decode.clone();
                if max_steps.is_some() {
                    options.max_instructions = *max_steps;
                }
                if *strict {
                    options.validation = crate::formats::code_section::HeaderValidation::Strict;
                }
                options.exact_length |= *exact_length;

                decompress::execute(
                    source,
                    destination,
                    &decompress::DecompressArgs {
                        input_format: *input_format,
                        section_start: config.extract.section_start,
                        options,
                        raw: *raw,
                        json: json.clone(),
                        quiet: *quiet,
                    },
                )
            }
            Commands::Trace {
                source,
                destination,
                input_format,
                max_steps,
                base_offset,
                preview,
                quiet,
            } => {
                let mut options = config.decode.clone();
                if max_steps.is_some() {
                    options.max_instructions = *max_steps;
                }
                let mut trace_config = config.trace.clone();
                if let Some(base_offset) = base_offset {
                    trace_config.report.base_offset = *base_offset;
                }
                if let Some(preview) = preview {
                    trace_config.report.preview_chars = *preview;
                }

                trace::execute(
                    source,
                    destination,
                    *input_format,
                    config.extract.section_start,
                    &options,
                    &trace_config,
                    *quiet,
                )
            }
            Commands::Config => {
                print!("{}", config.to_toml()?);
                Ok(())
            }
        }
    }
}
