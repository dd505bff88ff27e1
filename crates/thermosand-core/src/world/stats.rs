//! Simulation statistics collection trait

/// Trait for collecting simulation statistics
///
/// Passes record events here so front ends can report them without the core
/// knowing how they are displayed.
pub trait SimStats {
    /// Record that a material swapped positions during the movement pass
    fn record_cell_moved(&mut self);

    /// Record that a temperature threshold converted a material
    fn record_state_change(&mut self);

    /// Record that a cell exchanged pressure with its neighbors
    fn record_pressure_exchange(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_cell_moved(&mut self) {}
    fn record_state_change(&mut self) {}
    fn record_pressure_exchange(&mut self) {}
}

/// Running event counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub cells_moved: u64,
    pub state_changes: u64,
    pub pressure_exchanges: u64,
}

impl FrameStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SimStats for FrameStats {
    fn record_cell_moved(&mut self) {
        self.cells_moved += 1;
    }

    fn record_state_change(&mut self) {
        self.state_changes += 1;
    }

    fn record_pressure_exchange(&mut self) {
        self.pressure_exchanges += 1;
    }
}
