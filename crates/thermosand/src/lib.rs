//! # Thermosand - terminal heat and pressure sandbox
//!
//! A falling-sand grid where every cell carries a temperature and a pressure.
//! Heat diffuses, pressure vents and equalizes, and materials boil, freeze or
//! melt as they cross their thresholds.

pub mod app;
pub mod config;
pub mod render;

// Re-export core modules for convenience
pub use thermosand_core::simulation;
pub use thermosand_core::world;

pub use app::{App, RunSummary};
pub use config::SimConfig;
