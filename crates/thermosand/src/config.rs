//! Simulation configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `thermosand.ron` file (if exists), or the file passed with `--config`
//! 3. Environment variables prefixed with `THERMOSAND_`
//!
//! Example environment variable: `THERMOSAND_RUN__FRAMES=200`

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thermosand_core::MaterialKind;
use thermosand_core::world::Region;

/// Base name of the optional configuration file in the working directory
pub const CONFIG_FILE: &str = "thermosand";

/// Main simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub run: RunConfig,

    /// Material regions filled in order when the grid is built
    #[serde(default = "default_regions")]
    pub regions: Vec<Region>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            run: RunConfig::default(),
            regions: default_regions(),
        }
    }
}

/// Grid dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 20, cols: 50 }
    }
}

/// Driving loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of frames to simulate
    pub frames: usize,
    /// RNG seed; drawn from OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Wait for the user to type `start`
    pub prompt: bool,
    /// Draw the grid to the terminal every frame
    pub render: bool,
    /// Pause after each frame, in milliseconds
    pub frame_delay_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 1500,
            seed: None,
            prompt: true,
            render: true,
            frame_delay_ms: 0,
        }
    }
}

/// Sand resting above a plutonium floor, a band of steam below a heatsink ceiling
pub fn default_regions() -> Vec<Region> {
    let region = |kind, rows: (usize, usize), cols: (usize, usize), density| Region {
        kind,
        row_min: rows.0,
        row_max: rows.1,
        col_min: cols.0,
        col_max: cols.1,
        density,
    };

    vec![
        region(MaterialKind::Sand, (1, 4), (5, 46), 0.7),
        region(MaterialKind::Steam, (10, 14), (6, 49), 1.0),
        region(MaterialKind::Plutonium, (0, 0), (0, 49), 1.0),
        region(MaterialKind::Heatsink, (19, 19), (0, 49), 1.0),
    ]
}

impl SimConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `path` if given (must exist), otherwise `thermosand.ron` (if exists)
    /// 3. Environment variables prefixed with `THERMOSAND_` (highest priority)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name(CONFIG_FILE)
                .format(FileFormat::Ron)
                .required(false),
        };

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("grid.rows", 20_i64)?
            .set_default("grid.cols", 50_i64)?
            .set_default("run.frames", 1500_i64)?
            .set_default("run.prompt", true)?
            .set_default("run.render", true)?
            .set_default("run.frame_delay_ms", 0_i64)?
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (THERMOSAND_RUN__FRAMES, etc.)
            .add_source(
                Environment::with_prefix("THERMOSAND")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Pretty RON, suitable as a starting `thermosand.ron`
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration to RON")
    }
}
