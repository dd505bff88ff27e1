//! Simulation systems - phase transitions and the three per-frame passes

pub mod movement;
pub mod pressure;
pub mod state_changes;
pub mod temperature;

use smallvec::SmallVec;
use std::fmt;

use crate::world::CellIndex;

pub use movement::MovementSystem;
pub use pressure::PressureSystem;
pub use state_changes::StateChangeSystem;
pub use temperature::TemperatureSystem;

/// Cells a single source update acted on, source first
///
/// Empty when the update was a no-op.
pub type Touched = SmallVec<[CellIndex; 9]>;

/// One whole-grid scan applying a single update rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    Temperature,
    Pressure,
    Movement,
}

impl Pass {
    /// Order the passes run in every frame
    pub const FRAME_ORDER: [Pass; 3] = [Pass::Temperature, Pass::Pressure, Pass::Movement];
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pass::Temperature => "temperature",
            Pass::Pressure => "pressure",
            Pass::Movement => "movement",
        })
    }
}

/// Summary of one pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassReport {
    pub pass: Pass,
    /// Columns were scanned right to left
    pub reversed: bool,
    /// Source cells whose update changed something
    pub updates: usize,
    /// Cells flagged as visited when the scan finished
    pub cells_visited: usize,
    pub cells_scanned: usize,
    /// Sum of temperatures read while scanning
    pub temperature_sum: f64,
}

impl PassReport {
    pub fn new(pass: Pass, reversed: bool) -> Self {
        Self {
            pass,
            reversed,
            updates: 0,
            cells_visited: 0,
            cells_scanned: 0,
            temperature_sum: 0.0,
        }
    }

    /// Mean temperature observed during the scan
    pub fn average_temperature(&self) -> f64 {
        if self.cells_scanned == 0 {
            0.0
        } else {
            self.temperature_sum / self.cells_scanned as f64
        }
    }
}

/// Reports for the three passes of one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub temperature: PassReport,
    pub pressure: PassReport,
    pub movement: PassReport,
}

impl FrameReport {
    pub fn updates(&self) -> usize {
        self.temperature.updates + self.pressure.updates + self.movement.updates
    }
}
