//! Configuration settings for the constraint puzzle runner

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub encoding: EncodingConfig,
    pub sampling: SamplingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub preset: SolverPreset,
    /// Per-check limit; an expired check is reported as indeterminate
    pub timeout_seconds: Option<f32>,
    /// Cap for tuple enumeration
    pub max_solutions: usize,
    /// Re-evaluate every model against the constraint set
    pub verify_models: bool,
}

/// CaDiCaL option presets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverPreset {
    Default,
    Plain,
    Sat,
    Unsat,
}

impl SolverPreset {
    pub fn as_str(self) -> &'static str {
        match self {
            SolverPreset::Default => "default",
            SolverPreset::Plain => "plain",
            SolverPreset::Sat => "sat",
            SolverPreset::Unsat => "unsat",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Two's-complement width of every integer variable
    pub bit_width: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

pub const MIN_BIT_WIDTH: u32 = 2;
pub const MAX_BIT_WIDTH: u32 = 32;

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                preset: SolverPreset::Default,
                timeout_seconds: None,
                max_solutions: 64,
                verify_models: true,
            },
            encoding: EncodingConfig { bit_width: 16 },
            sampling: SamplingConfig { seed: None },
            output: OutputConfig {
                format: OutputFormat::Text,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let width = self.encoding.bit_width;
        if !(MIN_BIT_WIDTH..=MAX_BIT_WIDTH).contains(&width) {
            anyhow::bail!(
                "Bit width must be between {} and {}, got {}",
                MIN_BIT_WIDTH,
                MAX_BIT_WIDTH,
                width
            );
        }

        if self.solver.max_solutions == 0 {
            anyhow::bail!("Maximum solutions must be positive");
        }

        if let Some(timeout) = self.solver.timeout_seconds {
            if !timeout.is_finite() || timeout < 0.0 {
                anyhow::bail!("Timeout must be a non-negative number of seconds, got {}", timeout);
            }
        }

        Ok(())
    }

    /// Per-check timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.solver.timeout_seconds.map(Duration::from_secs_f32)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(bit_width) = cli_overrides.bit_width {
            self.encoding.bit_width = bit_width;
        }
        if let Some(seed) = cli_overrides.seed {
            self.sampling.seed = Some(seed);
        }
        if let Some(timeout) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = Some(timeout);
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bit_width: Option<u32>,
    pub seed: Option<u64>,
    pub timeout_seconds: Option<f32>,
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.encoding.bit_width, 16);
        assert_eq!(settings.timeout(), None);
    }

    #[test]
    fn test_validation_errors() {
        let mut settings = Settings::default();
        settings.encoding.bit_width = 1;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.encoding.bit_width = 33;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.solver.max_solutions = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.solver.timeout_seconds = Some(-1.0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.sampling.seed = Some(7);
        settings.solver.preset = SolverPreset::Plain;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.sampling.seed, Some(7));
        assert_eq!(loaded.solver.preset, SolverPreset::Plain);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "solver: [not, a, map]").unwrap();

        assert!(Settings::from_file(&path).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            bit_width: Some(8),
            seed: Some(42),
            timeout_seconds: Some(1.5),
            format: Some(OutputFormat::Json),
        });

        assert_eq!(settings.encoding.bit_width, 8);
        assert_eq!(settings.sampling.seed, Some(42));
        assert_eq!(settings.timeout(), Some(Duration::from_secs_f32(1.5)));
        assert_eq!(settings.output.format, OutputFormat::Json);
    }
}
