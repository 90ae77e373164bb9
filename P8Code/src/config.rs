//! Tool configuration
//!
//! Settings are read from an optional TOML file; every key has a default so a
//! partial file (or no file at all) is valid:
//!
//! ```toml
//! [decode]
//! max_instructions = 200
//! validation = "strict"
//! exact_length = false
//!
//! [extract]
//! section_start = 17152
//!
//! [trace]
//! base_offset = 17152
//! preview_chars = 60
//! progress_interval = 1000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bytelog::CODE_SECTION_START;
use crate::error::{Error, Result};
use crate::formats::code_section::DecodeOptions;
use crate::trace::TraceOptions;

/// Byte extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// First absolute byte position kept by the positioned extractor.
    pub section_start: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            section_start: CODE_SECTION_START,
        }
    }
}

/// Trace rendering and progress settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    #[serde(flatten)]
    pub report: TraceOptions,
    /// Steps between progress updates.
    pub progress_interval: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            report: TraceOptions::default(),
            progress_interval: 1000,
        }
    }
}

/// Complete tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub decode: DecodeOptions,
    pub extract: ExtractConfig,
    pub trace: TraceConfig,
}

impl ToolConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    /// Returns [`Error::ConfigParse`] if the text is not valid for this schema.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the configuration file, or the defaults when no path is given.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text, path)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Render the configuration as TOML.
    ///
    /// # Errors
    /// Returns [`Error::ConfigParse`] if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigParse {
            path: PathBuf::from("<memory>"),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::code_section::HeaderValidation;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ToolConfig::default();
        assert_eq!(config.extract.section_start, 17152);
        assert_eq!(config.trace.report.preview_chars, 80);
        assert_eq!(config.trace.progress_interval, 1000);
        assert_eq!(config.decode.validation, HeaderValidation::Lenient);
        assert!(!config.decode.exact_length);
    }

    #[test]
    fn test_partial_file() {
        let text = "\
[decode]
max_instructions = 200
validation = \"strict\"

[trace]
preview_chars = 60
";
        let config = ToolConfig::from_toml(text, Path::new("p8code.toml")).unwrap();

        assert_eq!(config.decode.max_instructions, Some(200));
        assert_eq!(config.decode.validation, HeaderValidation::Strict);
        assert_eq!(config.trace.report.preview_chars, 60);
        assert_eq!(config.trace.report.base_offset, 0);
        assert_eq!(config.extract, ExtractConfig::default());
    }

    #[test]
    fn test_invalid_file() {
        let err = ToolConfig::from_toml("[decode]\nvalidation = \"loose\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(ToolConfig::load(None).unwrap(), ToolConfig::default());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p8code.toml");
        std::fs::write(&path, "[extract]\nsection_start = 0\n").unwrap();

        let config = ToolConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.extract.section_start, 0);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ToolConfig::default();
        config.decode.max_instructions = Some(5);
        let text = config.to_toml().unwrap();

        assert_eq!(ToolConfig::from_toml(&text, Path::new("x")).unwrap(), config);
    }
}
