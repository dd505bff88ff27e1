//! World management - cells, topology, seeding

mod cell;
mod direction;
mod grid;
pub mod rng_trait;
pub mod seeding;
pub mod stats;

pub use cell::{
    Cell, CellFlags, CellIndex, DEFAULT_PRESSURE, DEFAULT_TEMPERATURE, NeighborKind,
    PRESSURE_EPSILON,
};
pub use direction::Direction;
pub use grid::{Grid, GridError};
pub use rng_trait::SimRng;
pub use seeding::{Region, Seed, SeedError};
pub use stats::{FrameStats, NoopStats, SimStats};
