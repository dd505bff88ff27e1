//! Driving loop: builds the grid from configuration and runs frames

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};
use thermosand_core::simulation::FrameReport;
use thermosand_core::world::{FrameStats, Grid, seeding};

use crate::config::SimConfig;
use crate::render;

/// Word the user types to begin a prompted run
pub const START_WORD: &str = "start";

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: usize,
    /// Time spent drawing and stepping, excluding frame delay
    pub busy_time: Duration,
    pub stats: FrameStats,
}

impl RunSummary {
    pub fn average_frame_time(&self) -> Duration {
        match u32::try_from(self.frames) {
            Ok(frames) if frames > 0 => self.busy_time / frames,
            _ => Duration::ZERO,
        }
    }
}

pub struct App {
    config: SimConfig,
    grid: Grid,
    rng: Xoshiro256StarStar,
    stats: FrameStats,
}

impl App {
    /// Fill the configured regions and build the grid
    pub fn new(config: SimConfig) -> Result<Self> {
        let mut rng = match config.run.seed {
            Some(seed) => {
                log::info!("Using RNG seed {}", seed);
                Xoshiro256StarStar::seed_from_u64(seed)
            }
            None => Xoshiro256StarStar::from_entropy(),
        };

        let seeds = seeding::fill_regions(&config.regions, &mut rng)
            .context("Invalid material region in configuration")?;
        let grid = Grid::new(config.grid.rows, config.grid.cols, seeds)
            .context("Failed to build grid")?;

        Ok(Self {
            config,
            grid,
            rng,
            stats: FrameStats::default(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Temperature, pressure and movement once each
    pub fn step(&mut self) -> FrameReport {
        self.grid.step(&mut self.rng, &mut self.stats)
    }

    /// Ask for the start word; anything else declines the run
    fn confirm_start(input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
        write!(out, "Enter '{}' to begin program: ", START_WORD)?;
        out.flush()?;

        let mut line = String::new();
        input.read_line(&mut line).context("Failed to read start prompt")?;
        Ok(line.trim() == START_WORD)
    }

    /// Run the configured number of frames, drawing each one first when
    /// rendering is enabled
    pub fn run(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> Result<RunSummary> {
        let mut summary = RunSummary {
            frames: 0,
            busy_time: Duration::ZERO,
            stats: self.stats,
        };

        if self.config.run.prompt && !Self::confirm_start(input, out)? {
            log::info!("Run not started");
            return Ok(summary);
        }

        let delay = Duration::from_millis(self.config.run.frame_delay_ms);
        log::info!("Running {} frames", self.config.run.frames);

        for frame in 0..self.config.run.frames {
            let start = Instant::now();

            if self.config.run.render {
                render::draw(&self.grid, out).context("Failed to draw frame")?;
            }
            let report = self.step();

            summary.busy_time += start.elapsed();
            summary.frames += 1;
            log::debug!(
                "Frame {}: average temperature {:.2}, {} updates",
                frame,
                report.temperature.average_temperature(),
                report.updates()
            );

            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }

        summary.stats = self.stats;
        writeln!(out, "Frames executed: {}", summary.frames)?;
        writeln!(
            out,
            "Average frame time: {:.3} ms",
            summary.average_frame_time().as_secs_f64() * 1000.0
        )?;
        log::info!(
            "Finished {} frames: {} moves, {} state changes, {} pressure exchanges",
            summary.frames,
            summary.stats.cells_moved,
            summary.stats.state_changes,
            summary.stats.pressure_exchanges
        );

        Ok(summary)
    }
}
