//! Configuration types for a Game of Life run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Immutable per-run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParams {
    /// Grid width in cells (columns).
    pub image_width: usize,
    /// Grid height in cells (rows).
    pub image_height: usize,
    /// Number of generations to execute.
    pub turns: usize,
    /// Number of workers a generation is split across.
    pub threads: usize,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            image_width: 64,
            image_height: 64,
            turns: 100,
            threads: 4,
        }
    }
}

impl RunParams {
    /// Total number of cells (width * height).
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.image_width * self.image_height
    }

    /// Name of the image the initial grid is read from, `HEIGHTxWIDTH`.
    pub fn input_filename(&self) -> String {
        format!("{}x{}", self.image_height, self.image_width)
    }

    /// Name of the image the final grid is written to.
    ///
    /// A zero-turn run writes back under the input name. Otherwise the turn
    /// count is appended, plus the worker count when more than one was used.
    pub fn output_filename(&self) -> String {
        match (self.turns, self.threads) {
            (0, _) => self.input_filename(),
            (turns, 1) => format!("{}x{}x{}", self.image_height, self.image_width, turns),
            (turns, threads) => format!(
                "{}x{}x{}-{}",
                self.image_height, self.image_width, turns, threads
            ),
        }
    }

    /// Validate run parameters.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(ParamsError::InvalidDimensions);
        }
        if self.threads == 0 {
            return Err(ParamsError::InvalidThreads);
        }
        Ok(())
    }
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

/// Where the PGM images live on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoConfig {
    /// Directory holding `HEIGHTxWIDTH.pgm` input images.
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
    /// Directory final images are written to.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
            out_dir: default_out_dir(),
        }
    }
}

/// Top-level configuration file as read by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(flatten)]
    pub params: RunParams,
    #[serde(default)]
    pub io: IoConfig,
}

/// Run parameter validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamsError {
    #[error("Grid dimensions (width, height) must be non-zero")]
    InvalidDimensions,
    #[error("Thread count must be non-zero")]
    InvalidThreads,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(turns: usize, threads: usize) -> RunParams {
        RunParams {
            image_width: 64,
            image_height: 16,
            turns,
            threads,
        }
    }

    #[test]
    fn test_default_params_valid() {
        assert!(RunParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let mut p = params(1, 1);
        p.image_height = 0;
        assert_eq!(p.validate(), Err(ParamsError::InvalidDimensions));

        let mut p = params(1, 1);
        p.image_width = 0;
        assert_eq!(p.validate(), Err(ParamsError::InvalidDimensions));
    }

    #[test]
    fn test_rejects_zero_threads() {
        assert_eq!(params(1, 0).validate(), Err(ParamsError::InvalidThreads));
    }

    #[test]
    fn test_filenames() {
        assert_eq!(params(10, 1).input_filename(), "16x64");
        assert_eq!(params(0, 8).output_filename(), "16x64");
        assert_eq!(params(100, 1).output_filename(), "16x64x100");
        assert_eq!(params(100, 8).output_filename(), "16x64x100-8");
        assert_eq!(params(0, 1).grid_size(), 16 * 64);
    }

    #[test]
    fn test_config_io_defaults() {
        let json = r#"{"image_width":16,"image_height":16,"turns":10,"threads":2}"#;
        let config: SimulationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.params.turns, 10);
        assert_eq!(config.params.threads, 2);
        assert_eq!(config.io, IoConfig::default());
    }

    #[test]
    fn test_serialization() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
