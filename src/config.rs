//! Application configuration loaded from TOML

use crate::error::{DxfError, Result};
use crate::vectorize::ConversionOptions;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "DXF_VECTORIZE_CONFIG";

/// Root of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub conversion: ConversionOptions,
    #[serde(default)]
    pub batch: BatchConfig,
}

impl AppConfig {
    /// Load configuration from an explicit path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| DxfError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_toml(&content).map_err(|err| match err {
            DxfError::Config { message, .. } => DxfError::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|err| DxfError::Config {
            path: PathBuf::new(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no drawing could be converted with
    pub fn validate(&self) -> Result<()> {
        if self.conversion.default_thickness <= 0 {
            return Err(DxfError::Config {
                path: PathBuf::new(),
                message: format!(
                    "conversion.default_thickness must be positive, got {}",
                    self.conversion.default_thickness
                ),
            });
        }
        Ok(())
    }

    /// Locate and load the configuration: `$DXF_VECTORIZE_CONFIG`, then
    /// `./config/default.toml`, then built-in defaults
    pub fn discover() -> Result<Self> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = env::current_dir()?.join("config").join("default.toml");
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Explicit path if given, otherwise [`AppConfig::discover`]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::discover(),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// `[batch]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of files converted at once
    #[serde(default = "BatchConfig::default_jobs")]
    pub jobs: usize,
    /// Subdirectory of the data directory holding the inputs
    #[serde(default = "BatchConfig::default_split")]
    pub split: String,
    /// Log progress after this many files; 0 disables
    #[serde(default = "BatchConfig::default_progress_every")]
    pub progress_every: usize,
}

impl BatchConfig {
    fn default_jobs() -> usize {
        64
    }

    fn default_split() -> String {
        "dxf".to_string()
    }

    fn default_progress_every() -> usize {
        100
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs: Self::default_jobs(),
            split: Self::default_split(),
            progress_every: Self::default_progress_every(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorize::CommandTaxonomy;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.batch.jobs, 64);
        assert_eq!(cfg.batch.split, "dxf");
        assert_eq!(cfg.conversion.default_thickness, 50);
        assert_eq!(cfg.conversion.taxonomy, CommandTaxonomy::Collapsed);
        assert!(!cfg.conversion.legacy_arc_points);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [conversion]
            taxonomy = "full"

            [batch]
            jobs = 8
            "#,
        )
        .unwrap();
        assert_eq!(cfg.conversion.taxonomy, CommandTaxonomy::Full);
        assert_eq!(cfg.conversion.default_thickness, 50);
        assert_eq!(cfg.batch.jobs, 8);
        assert_eq!(cfg.batch.progress_every, 100);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_load_from_temp_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [logging]
            level = "debug"

            [conversion]
            default_thickness = 35
            legacy_arc_points = true
            "#
        )
        .unwrap();

        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.conversion.default_thickness, 35);
        assert!(cfg.conversion.legacy_arc_points);
    }

    #[test]
    fn test_errors_name_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[batch]\njobs = \"many\"").unwrap();
        match AppConfig::from_file(file.path()) {
            Err(DxfError::Config { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("unexpected {other:?}"),
        }

        let missing = AppConfig::from_file("/definitely/not/here.toml");
        assert!(matches!(missing, Err(DxfError::Config { .. })));
    }

    #[test]
    fn test_non_positive_default_thickness_rejected() {
        for value in ["0", "-5"] {
            let text = format!("[conversion]\ndefault_thickness = {value}");
            assert!(matches!(
                AppConfig::from_toml(&text),
                Err(DxfError::Config { .. })
            ));
        }

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[conversion]\ndefault_thickness = 0").unwrap();
        match AppConfig::from_file(file.path()) {
            Err(DxfError::Config { path, message }) => {
                assert_eq!(path, file.path());
                assert!(message.contains("default_thickness"));
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(AppConfig::default().validate().is_ok());
    }
}
